/// Shared serializable output types.
///
/// These types are what gets written for `--dry-run` and for errors — either as
/// JSON or rendered as a table/line. They are decoupled from the internal
/// request and command types.
use serde::{Deserialize, Serialize};

use crate::invocation::{InvocationRequest, ToolCommand, WrapError};

/// The resolved invocation, shown by `--dry-run` instead of running the tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvocationPlan {
    /// Parsed positionals.
    pub request: InvocationRequest,
    /// The `--ffmpeg-config` value exactly as passed.
    pub ffmpeg_config: String,
    /// Executable to spawn.
    pub program: String,
    /// Arguments, in order.
    pub args: Vec<String>,
    /// Program and arguments joined for display.
    pub command_line: String,
    /// Configured timeout, or null when unbounded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl InvocationPlan {
    /// Assemble the plan from an already built command.
    #[must_use]
    pub fn new(
        request: InvocationRequest,
        cmd: &ToolCommand,
        ffmpeg_config: String,
        timeout_secs: Option<u64>,
    ) -> Self {
        Self {
            request,
            ffmpeg_config,
            program: cmd.program.clone(),
            args: cmd.args.clone(),
            command_line: cmd.to_string(),
            timeout_secs,
        }
    }
}

/// A structured error envelope for JSON error output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorOutput {
    /// Always `false`.
    pub ok: bool,
    /// Error details.
    pub error: ErrorDetail,
}

/// Error detail in the JSON error envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Machine-readable error code (snake_case).
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Process exit code that accompanies this error.
    pub exit_code: i32,
}

impl ErrorOutput {
    /// Construct from a `WrapError`.
    #[must_use]
    pub fn from_wrap_error(err: &WrapError) -> Self {
        Self {
            ok: false,
            error: ErrorDetail {
                code: err.code().to_owned(),
                message: err.to_string(),
                exit_code: err.exit_code(),
            },
        }
    }
}
