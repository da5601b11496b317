//! Exit codes used by the wrapper.
//!
//! Codes 126/127/124 follow the shell and coreutils `timeout` conventions so
//! the wrapper can sit in scripts that already check for them.

/// Successful termination (or dry run).
pub const OK: i32 = 0;

/// Wrong positional count or unknown option.
pub const USAGE: i32 = 1;

/// Positional present but malformed (frame rate).
pub const DATAERR: i32 = 2;

/// Internal software error
pub const SOFTWARE: i32 = 70;

/// Input/output error while talking to the child
pub const IOERR: i32 = 74;

/// Child killed after `--timeout`
pub const TIMEOUT: i32 = 124;

/// Tool found but not executable
pub const CANNOT_EXECUTE: i32 = 126;

/// Tool not found
pub const NOT_FOUND: i32 = 127;

/// Base for "killed by signal N" (exit code is `SIGNAL_BASE + N`)
pub const SIGNAL_BASE: i32 = 128;
