/// Logging setup: a `tracing` fmt layer on stderr.
///
/// Logs never go to stdout, which is reserved for the command echo, the
/// tool's output, and the dry-run plan.
use std::io::IsTerminal;

use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, fmt};

/// Map the `-d` count to a level filter.
#[must_use]
pub fn level_for(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// Install the global subscriber. `RUST_LOG`, when set, wins over `-d`.
pub fn setup_logging(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::default().add_directive(level_for(verbosity).into()));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(verbosity >= 2)
        .with_thread_names(false)
        .with_filter(filter);

    let _ = tracing_subscriber::registry().with(fmt_layer).try_init();

    tracing::debug!(verbosity, "logging initialized");
}
