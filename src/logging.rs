//! Logging initialization.

use tracing_subscriber::EnvFilter;

/// Initialize the global tracing subscriber. Call once at startup, after
/// configuration has been loaded.
///
/// `RUST_LOG` wins over the configured level when set.
pub fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.to_string()));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
