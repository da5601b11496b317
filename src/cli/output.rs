/// Output formatting: command echo, stream relay, dry-run plan, errors.
use std::io::{IsTerminal, Write};

use comfy_table::{Cell, Table, presets::UTF8_BORDERS_ONLY};
use serde::Serialize;

use super::args::OutputFormat;
use crate::invocation::ToolCommand;
use crate::runner::ToolOutcome;
use crate::types::{ErrorOutput, InvocationPlan};

/// Resolve the effective output format, handling `--json` flag and TTY auto-detection.
#[must_use]
pub fn resolve_format(fmt: OutputFormat, json_flag: bool) -> OutputFormat {
    if json_flag {
        return OutputFormat::Json;
    }
    if fmt == OutputFormat::Auto {
        if std::io::stdout().is_terminal() {
            OutputFormat::Table
        } else {
            OutputFormat::Json
        }
    } else {
        fmt
    }
}

/// Output context passed to the command handler.
pub struct OutputCtx {
    pub format: OutputFormat,
}

impl OutputCtx {
    /// Construct from CLI args.
    #[must_use]
    pub fn new(fmt: OutputFormat, json_flag: bool) -> Self {
        Self {
            format: resolve_format(fmt, json_flag),
        }
    }

    /// Start a named timer that logs elapsed time at debug level on drop.
    #[must_use]
    pub fn timer(&self, label: &'static str) -> DebugTimer {
        DebugTimer::new(label)
    }
}

// --- Invocation ---

/// Echo the assembled command line on stdout before it runs.
pub fn write_command_line(cmd: &ToolCommand) {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let _ = writeln!(out, "Running command: {cmd}");
    let _ = out.flush();
}

/// Relay the tool's captured output: stdout on success, stderr on failure.
pub fn write_outcome(outcome: &ToolOutcome) {
    if outcome.success() {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        let _ = out.write_all(outcome.stdout.as_bytes());
        let _ = out.flush();
    } else {
        let stderr = std::io::stderr();
        let mut err = stderr.lock();
        let _ = err.write_all(outcome.stderr.as_bytes());
        let _ = err.flush();
    }
}

// --- Dry-run plan ---

/// Write the resolved invocation plan to stdout.
pub fn write_plan(plan: &InvocationPlan, ctx: &OutputCtx) {
    match ctx.format {
        OutputFormat::Json => print_json(plan),
        OutputFormat::Compact => print_compact_json(plan),
        OutputFormat::Table | OutputFormat::Auto => write_plan_table(plan),
    }
}

fn write_plan_table(plan: &InvocationPlan) {
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec![Cell::new("FIELD"), Cell::new("VALUE")]);

    let req = &plan.request;
    let timeout = plan
        .timeout_secs
        .map_or_else(|| "none".to_owned(), |s| format!("{s}s"));
    let rows: [(&str, String); 9] = [
        ("input", req.input_path.clone()),
        ("output", req.output_path.clone()),
        ("mask style", req.mask_style.clone()),
        ("keep audio", if req.keep_audio { "yes" } else { "no" }.to_owned()),
        ("fps", req.fps.to_string()),
        ("resolution", format!("{} (not forwarded)", req.resolution)),
        ("ffmpeg config", plan.ffmpeg_config.clone()),
        ("timeout", timeout),
        ("command", plan.command_line.clone()),
    ];
    for (field, value) in rows {
        table.add_row(vec![Cell::new(field), Cell::new(value)]);
    }

    println!("{table}");
}

// --- Errors ---

/// Write a structured error to stderr.
pub fn write_error(err: &ErrorOutput, format: OutputFormat, json_flag: bool) {
    let fmt = resolve_format(format, json_flag);
    let stderr = std::io::stderr();
    let mut out = stderr.lock();
    match fmt {
        OutputFormat::Json | OutputFormat::Compact => {
            let s = serde_json::to_string_pretty(err).unwrap_or_default();
            let _ = writeln!(out, "{s}");
        }
        _ => {
            let _ = writeln!(out, "Error: {}", err.error.message);
        }
    }
}

// --- Debug timer ---

/// A RAII timer that logs elapsed milliseconds on drop.
///
/// Created via [`OutputCtx::timer`]. Silent unless debug logging is enabled.
pub struct DebugTimer {
    label: &'static str,
    start: std::time::Instant,
}

impl DebugTimer {
    #[must_use]
    fn new(label: &'static str) -> Self {
        Self {
            label,
            start: std::time::Instant::now(),
        }
    }
}

impl Drop for DebugTimer {
    fn drop(&mut self) {
        let ms = self.start.elapsed().as_secs_f64() * 1000.0;
        tracing::debug!(label = self.label, "{ms:.2}ms");
    }
}

// --- Generic JSON helpers ---

fn print_json<T: Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{s}"),
        Err(e) => eprintln!("JSON serialization error: {e}"),
    }
}

fn print_compact_json<T: Serialize + ?Sized>(value: &T) {
    match serde_json::to_string(value) {
        Ok(s) => println!("{s}"),
        Err(e) => eprintln!("JSON serialization error: {e}"),
    }
}
