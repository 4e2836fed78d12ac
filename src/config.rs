//! Client configuration.
//!
//! The SDK itself only reads the per-call deadline. Everything else under
//! [`TransportConfig`] is handed to the [`Connector`](crate::transport::Connector)
//! unchanged.

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::validate;

/// Errors from loading a configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(#[from] crate::MomentoError),
}

/// Client configuration, loadable from TOML.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Configuration {
    /// Channel and call tunables
    #[serde(default)]
    pub transport: TransportConfig,

    /// Logging for binaries that call [`crate::logging::init`]
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Configuration {
    /// Defaults suited to a developer machine talking to a remote region.
    pub fn laptop() -> Self {
        Self {
            transport: TransportConfig::default(),
            logging: LoggingConfig::default(),
        }
    }

    /// Tighter deadline for clients running in the same region as the cache.
    pub fn in_region() -> Self {
        Self {
            transport: TransportConfig {
                deadline_ms: 1100,
                keep_alive_ms: 5000,
                keep_alive_timeout_ms: 1000,
                keep_alive_without_calls: true,
                ..TransportConfig::default()
            },
            logging: LoggingConfig::default(),
        }
    }

    /// Copy with a different per-call deadline.
    ///
    /// Whole milliseconds, saturating at `u64::MAX`. A sub-millisecond
    /// deadline becomes 0 and fails [`Configuration::validate`].
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.transport.deadline_ms = u64::try_from(deadline.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// The per-call deadline.
    pub fn deadline(&self) -> Duration {
        Duration::from_millis(self.transport.deadline_ms)
    }

    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Parse configuration from TOML text.
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let config: Configuration = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Check values the SDK depends on.
    pub fn validate(&self) -> Result<(), crate::MomentoError> {
        validate::request_deadline(self.deadline())
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self::laptop()
    }
}

/// Tunables passed through to the transport.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct TransportConfig {
    /// Per-call deadline in milliseconds (default: 5000).
    pub deadline_ms: u64,
    /// Connect timeout in milliseconds (default: 5000).
    pub connect_timeout_ms: u64,
    /// Largest request the channel will send (default: 5 MiB).
    pub max_send_message_bytes: usize,
    /// Largest response the channel will accept (default: 5 MiB).
    pub max_receive_message_bytes: usize,
    /// HTTP/2 keep-alive ping interval in milliseconds; 0 disables.
    pub keep_alive_ms: u64,
    /// How long to wait for a keep-alive ack.
    pub keep_alive_timeout_ms: u64,
    /// Send keep-alive pings on idle channels.
    pub keep_alive_without_calls: bool,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            deadline_ms: 5000,
            connect_timeout_ms: 5000,
            max_send_message_bytes: 5 * 1024 * 1024,
            max_receive_message_bytes: 5 * 1024 * 1024,
            keep_alive_ms: 0,
            keep_alive_timeout_ms: 1000,
            keep_alive_without_calls: false,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct LoggingConfig {
    /// Filter directive, e.g. "info" or "momento_sdk=debug"
    pub level: String,
    /// Output format
    pub format: LogFormat,
    /// Include timestamps
    pub timestamps: bool,
    /// Include the event target (module path)
    pub target: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
            timestamps: true,
            target: false,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Compact,
    Json,
}
