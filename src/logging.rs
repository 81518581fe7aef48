//! Tracing subscriber setup for the binary.

use tracing_subscriber::EnvFilter;

/// Effective log level: each `-v` raises the configured level one step.
pub fn effective_level(configured: &str, verbose: u8) -> &'static str {
    const ORDER: [&str; 5] = ["error", "warn", "info", "debug", "trace"];
    let base = ORDER.iter().position(|l| *l == configured).unwrap_or(2);
    ORDER[(base + usize::from(verbose)).min(ORDER.len() - 1)]
}

/// Initializes logging to stderr.
///
/// `RUST_LOG` takes precedence over `configured` and `verbose`. Calling this
/// more than once keeps the first subscriber.
pub fn init_logging(configured: &str, verbose: u8) {
    let level = effective_level(configured, verbose);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbose >= 2)
        .with_line_number(verbose >= 3)
        .try_init();

    tracing::debug!(level, verbose, "logging initialized");
}
