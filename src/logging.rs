//! Tracing setup for the stdio server.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Pick the filter: `RUST_LOG` when set and valid, otherwise `default_directive`.
///
/// An unparseable default falls back to `info`.
pub fn build_filter(rust_log: Option<&str>, default_directive: &str) -> EnvFilter {
    rust_log
        .and_then(|directive| EnvFilter::try_new(directive).ok())
        .or_else(|| EnvFilter::try_new(default_directive).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

/// Install the global subscriber. Output goes to stderr since stdout
/// carries the MCP transport.
pub fn init_tracing(default_directive: &str) {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::registry()
        .with(build_filter(rust_log.as_deref(), default_directive))
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(false)
                .with_target(true),
        )
        .init();
}
