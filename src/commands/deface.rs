/// The one command: build the `deface` invocation, run it, relay its result.
use std::time::Duration;

use crate::cli::output::{write_command_line, write_outcome, write_plan};
use crate::cli::{Cli, OutputCtx};
use crate::exitcode;
use crate::invocation::{InvocationRequest, ToolCommand, ToolOptions, WrapError, mask};
use crate::runner;
use crate::types::InvocationPlan;

impl Cli {
    /// Tool settings taken from the optional flags.
    #[must_use]
    pub fn tool_options(&self) -> ToolOptions {
        ToolOptions {
            executable: self.executable.clone(),
            mask_scale: self.mask_scale,
            threshold: self.thresh,
            timeout: self.timeout.map(Duration::from_secs),
        }
    }
}

/// Run `deface-wrap`.
///
/// Returns the exit code to mirror: 0 on success (or dry run), the tool's own
/// code when it fails.
///
/// # Errors
///
/// Returns `WrapError` on an invalid frame rate, spawn failure, timeout, or
/// I/O failure while waiting on the tool.
pub fn run(cli: &Cli, ctx: &OutputCtx) -> Result<i32, WrapError> {
    let request = InvocationRequest::parse(cli.positionals.as_raw())?;
    mask::warn_if_unknown(&request.mask_style);

    let opts = cli.tool_options();
    let cmd = ToolCommand::build(&request, &opts)?;
    tracing::info!(program = %cmd.program, args = cmd.args.len(), "assembled tool command");

    if cli.dry_run {
        let ffmpeg_config = request.ffmpeg_config().to_json()?;
        let plan = InvocationPlan::new(request, &cmd, ffmpeg_config, cli.timeout);
        write_plan(&plan, ctx);
        return Ok(exitcode::OK);
    }

    write_command_line(&cmd);

    let timer = ctx.timer("run_tool");
    let outcome = runner::run(&cmd, opts.timeout)?;
    drop(timer);

    write_outcome(&outcome);

    if outcome.success() {
        Ok(exitcode::OK)
    } else {
        tracing::info!(status = outcome.status_code, "external tool failed");
        Ok(outcome.status_code)
    }
}
