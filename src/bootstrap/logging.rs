use tracing_subscriber::{fmt, EnvFilter};

const DEFAULT_FILTER: &str = "info,mountfs=debug";

/// Initializes the global subscriber; `RUST_LOG` overrides the default filter
pub fn initialize() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
