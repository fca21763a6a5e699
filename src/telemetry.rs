use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

/// Initializes structured logging.
///
/// `RUST_LOG` takes precedence over the configured filter, e.g.
/// `RUST_LOG=rust_food_delivery_service=debug`.
pub fn setup_tracing(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.filter.as_str()));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
