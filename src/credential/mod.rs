//! Momento credential handling.
//!
//! A [`Credential`] is the resolved form of an API key: the control and data
//! plane hosts plus the raw key presented on every call. It is built once,
//! never partially, from one of:
//!
//! - a V2 key and an endpoint: [`Credential::from_api_key_v2`],
//!   [`Credential::from_env_var_v2`], [`Credential::from_env`]
//! - a legacy or V1 key that embeds its endpoints: [`Credential::from_string`],
//!   [`Credential::from_env_var`], [`Credential::from_disposable_token`]
//! - a local emulator: [`Credential::momento_local`]
//!
//! Every failure is [`ErrorKind::InvalidArgument`](crate::ErrorKind::InvalidArgument).

pub mod token;

use std::fmt;

use crate::error::{MomentoError, Result};

pub use token::{Endpoints, Token, TokenKind};

/// Environment variable read by [`Credential::from_env`] for the API key.
pub const DEFAULT_API_KEY_VAR: &str = "MOMENTO_API_KEY";
/// Environment variable read by [`Credential::from_env`] for the endpoint.
pub const DEFAULT_ENDPOINT_VAR: &str = "MOMENTO_ENDPOINT";

const DEFAULT_PORT: u16 = 443;
const LOCAL_HOST: &str = "127.0.0.1";
const LOCAL_PORT: u16 = 8080;

/// Replacement hosts applied on top of the endpoints decoded from a key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostOverrides {
    pub control: Option<String>,
    pub cache: Option<String>,
}

impl HostOverrides {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn with_control(mut self, host: impl Into<String>) -> Self {
        self.control = Some(host.into());
        self
    }

    pub fn with_cache(mut self, host: impl Into<String>) -> Self {
        self.cache = Some(host.into());
        self
    }

    fn apply(self, endpoints: Endpoints) -> Result<Endpoints> {
        let pick = |host: Option<String>, decoded: String, which: &str| match host {
            Some(h) if h.trim().is_empty() => Err(MomentoError::invalid_argument(format!(
                "{which} host override cannot be empty"
            ))),
            Some(h) => Ok(h),
            None => Ok(decoded),
        };
        Ok(Endpoints {
            control: pick(self.control, endpoints.control, "Control")?,
            cache: pick(self.cache, endpoints.cache, "Cache")?,
        })
    }
}

/// Resolved endpoints and key used to route and authenticate every call.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    control_endpoint: String,
    data_endpoint: String,
    raw_key: String,
    port: u16,
    secure: bool,
}

impl Credential {
    /// Resolve a V2 (global) API key against an explicit endpoint.
    ///
    /// The endpoint is the bare cell host, e.g. `cell-1.example.com`; the
    /// `control.` and `cache.` prefixes are added here.
    pub fn from_api_key_v2(api_key: impl AsRef<str>, endpoint: impl AsRef<str>) -> Result<Self> {
        let (api_key, endpoint) = (api_key.as_ref(), endpoint.as_ref());
        if api_key.trim().is_empty() {
            return Err(MomentoError::invalid_argument(
                "Auth token string cannot be empty",
            ));
        }
        if endpoint.trim().is_empty() {
            return Err(MomentoError::invalid_argument(
                "Endpoint string cannot be empty",
            ));
        }
        if token::classify(api_key) != TokenKind::V2 {
            return Err(MomentoError::invalid_argument(
                "Received an invalid V2 API key. Are you using the correct key? \
                 Or did you mean to use `from_string()` or `from_env_var()` instead?",
            ));
        }

        Ok(Self::service(Endpoints::for_host(endpoint), api_key.to_string()))
    }

    /// Resolve a V2 key and endpoint from two environment variables.
    pub fn from_env_var_v2(api_key_var: &str, endpoint_var: &str) -> Result<Self> {
        if api_key_var.trim().is_empty() {
            return Err(MomentoError::invalid_argument(
                "ApiKey env var name cannot be empty",
            ));
        }
        if endpoint_var.trim().is_empty() {
            return Err(MomentoError::invalid_argument(
                "Endpoint env var name cannot be empty",
            ));
        }
        let api_key = read_var(api_key_var)
            .ok_or_else(|| MomentoError::invalid_argument(format!("Env var {api_key_var} must be set")))?;
        let endpoint = read_var(endpoint_var).ok_or_else(|| {
            MomentoError::invalid_argument(format!("Env var {endpoint_var} must be set"))
        })?;

        Self::from_api_key_v2(api_key, endpoint)
    }

    /// Resolve a V2 key from `MOMENTO_API_KEY` and `MOMENTO_ENDPOINT`.
    pub fn from_env() -> Result<Self> {
        Self::from_env_var_v2(DEFAULT_API_KEY_VAR, DEFAULT_ENDPOINT_VAR)
    }

    /// Resolve a legacy or V1 key, which carries its own endpoints.
    ///
    /// V2 keys are rejected; use [`Credential::from_api_key_v2`] for those.
    pub fn from_string(api_key: impl AsRef<str>, overrides: HostOverrides) -> Result<Self> {
        let api_key = api_key.as_ref();
        if token::classify(api_key) == TokenKind::V2 {
            return Err(MomentoError::invalid_argument(
                "Received a V2 API key. Are you using the correct key? \
                 Or did you mean to use `from_api_key_v2()` or `from_env_var_v2()` instead?",
            ));
        }

        let decoded = token::decode(api_key).map_err(|e| {
            tracing::debug!(error = %e, "failed to decode api key");
            MomentoError::invalid_argument("Invalid API key")
        })?;
        let Some(endpoints) = decoded.endpoints() else {
            return Err(MomentoError::invalid_argument("Invalid API key"));
        };
        tracing::debug!(kind = ?decoded.kind(), "resolved api key");

        Ok(Self::service(
            overrides.apply(endpoints)?,
            decoded.api_key().to_string(),
        ))
    }

    /// Resolve a legacy or V1 key read from an environment variable.
    pub fn from_env_var(var_name: &str, overrides: HostOverrides) -> Result<Self> {
        let api_key = read_var(var_name).ok_or_else(|| {
            MomentoError::invalid_argument(format!("Environment variable {var_name} not set"))
        })?;
        Self::from_string(api_key, overrides)
    }

    /// Resolve a disposable token. These share the legacy/V1 encodings.
    pub fn from_disposable_token(token: impl AsRef<str>, overrides: HostOverrides) -> Result<Self> {
        Self::from_string(token, overrides)
    }

    /// Plaintext credential for a Momento Local emulator.
    pub fn momento_local(host: impl Into<String>, port: u16) -> Self {
        let host = host.into();
        Self {
            control_endpoint: host.clone(),
            data_endpoint: host,
            raw_key: String::new(),
            port,
            secure: false,
        }
    }

    /// Momento Local on `127.0.0.1:8080`.
    pub fn momento_local_default() -> Self {
        Self::momento_local(LOCAL_HOST, LOCAL_PORT)
    }

    fn service(endpoints: Endpoints, raw_key: String) -> Self {
        Self {
            control_endpoint: endpoints.control,
            data_endpoint: endpoints.cache,
            raw_key,
            port: DEFAULT_PORT,
            secure: true,
        }
    }

    /// Host for administrative calls.
    pub fn control_endpoint(&self) -> &str {
        &self.control_endpoint
    }

    /// Host for item-level calls.
    pub fn data_endpoint(&self) -> &str {
        &self.data_endpoint
    }

    /// The key sent in the `authorization` header.
    pub fn raw_key(&self) -> &str {
        &self.raw_key
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn is_secure(&self) -> bool {
        self.secure
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("control_endpoint", &self.control_endpoint)
            .field("data_endpoint", &self.data_endpoint)
            .field("raw_key", &"<redacted>")
            .field("port", &self.port)
            .field("secure", &self.secure)
            .finish()
    }
}

/// Read a variable, treating unset and blank alike.
fn read_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}
