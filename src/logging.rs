//! Structured logging initialization.
//!
//! The SDK only emits `tracing` events. Binaries and tests that want to see
//! them call [`init`]. `RUST_LOG` takes precedence over the configured level.

use tracing_subscriber::prelude::*;
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{EnvFilter, fmt};

use crate::config::{LogFormat, LoggingConfig};

/// Install a global subscriber.
///
/// Returns an error instead of panicking if one is already installed.
///
/// # Example
///
/// ```no_run
/// use momento_sdk::config::LoggingConfig;
///
/// momento_sdk::logging::init(&LoggingConfig::default()).ok();
/// tracing::info!("client starting");
/// ```
pub fn init(config: &LoggingConfig) -> Result<(), TryInitError> {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::new(config.level.as_str())
    };
    let registry = tracing_subscriber::registry().with(filter);

    match (config.format, config.timestamps) {
        (LogFormat::Pretty, true) => registry
            .with(fmt::layer().with_target(config.target))
            .try_init(),
        (LogFormat::Pretty, false) => registry
            .with(fmt::layer().with_target(config.target).without_time())
            .try_init(),
        (LogFormat::Compact, true) => registry
            .with(fmt::layer().compact().with_target(config.target))
            .try_init(),
        (LogFormat::Compact, false) => registry
            .with(
                fmt::layer()
                    .compact()
                    .with_target(config.target)
                    .without_time(),
            )
            .try_init(),
        (LogFormat::Json, true) => registry
            .with(fmt::layer().json().with_target(config.target))
            .try_init(),
        (LogFormat::Json, false) => registry
            .with(fmt::layer().json().with_target(config.target).without_time())
            .try_init(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_is_an_error() {
        let config = LoggingConfig {
            level: "warn".into(),
            format: LogFormat::Compact,
            timestamps: false,
            target: true,
        };
        // Another test may have installed a subscriber already; either way
        // the call after this one must fail rather than panic.
        let _ = init(&config);
        assert!(init(&config).is_err());
    }
}
