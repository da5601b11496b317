/// Errors raised by the wrapper itself (never by the external tool).
use std::io;
use std::time::Duration;

use thiserror::Error;

use crate::exitcode;

/// Everything that can stop the wrapper before or while running the tool.
///
/// A nonzero exit from the tool is not an error here: it is a normal outcome
/// that gets relayed verbatim.
#[derive(Debug, Error)]
pub enum WrapError {
    /// The frame-rate positional is not a non-negative integer.
    #[error("Invalid frame rate '{value}': expected a non-negative integer")]
    InvalidFps {
        /// The raw argument as given.
        value: String,
    },

    /// The executable could not be found on `PATH` (or at the given path).
    #[error("External tool '{program}' not found; install it or pass --executable")]
    ToolNotFound {
        /// Program name or path that was looked up.
        program: String,
    },

    /// The executable exists but the OS refused to start it.
    #[error("Unable to launch external tool '{program}': {source}")]
    ToolLaunch {
        /// Program name or path.
        program: String,
        /// Underlying spawn error.
        source: io::Error,
    },

    /// Waiting on the child or draining its pipes failed.
    #[error("I/O error while {context}: {source}")]
    Io {
        /// What the wrapper was doing.
        context: &'static str,
        /// Underlying error.
        source: io::Error,
    },

    /// The child outlived `--timeout` and was killed.
    #[error("External tool '{program}' did not finish within {}s and was killed", .after.as_secs())]
    Timeout {
        /// Program name or path.
        program: String,
        /// Configured limit.
        after: Duration,
    },

    /// Building the `--ffmpeg-config` JSON failed.
    #[error("Failed to serialize ffmpeg config: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl WrapError {
    /// Return the CLI exit code for this error.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidFps { .. } => exitcode::DATAERR,
            Self::ToolNotFound { .. } => exitcode::NOT_FOUND,
            Self::ToolLaunch { .. } => exitcode::CANNOT_EXECUTE,
            Self::Io { .. } => exitcode::IOERR,
            Self::Timeout { .. } => exitcode::TIMEOUT,
            Self::Serialize(_) => exitcode::SOFTWARE,
        }
    }

    /// Machine-readable error code used in the JSON error envelope.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidFps { .. } => "invalid_fps",
            Self::ToolNotFound { .. } => "tool_not_found",
            Self::ToolLaunch { .. } => "tool_launch_failed",
            Self::Io { .. } => "io_error",
            Self::Timeout { .. } => "timeout",
            Self::Serialize(_) => "internal_error",
        }
    }

    /// Classify a failed `Command::spawn`.
    #[must_use]
    pub fn from_spawn(program: &str, err: io::Error) -> Self {
        if err.kind() == io::ErrorKind::NotFound {
            Self::ToolNotFound {
                program: program.to_owned(),
            }
        } else {
            Self::ToolLaunch {
                program: program.to_owned(),
                source: err,
            }
        }
    }
}
