/// Command handling: turn parsed CLI arguments into a tool run or a dry-run plan.
pub mod deface;

use crate::cli::{Cli, OutputCtx};
use crate::invocation::WrapError;

/// Run the wrapper for `cli` and return the exit code to terminate with.
///
/// # Errors
///
/// Returns `WrapError` for local failures; tool failures are an `Ok` exit code.
pub fn dispatch(cli: &Cli, ctx: &OutputCtx) -> Result<i32, WrapError> {
    deface::run(cli, ctx)
}
