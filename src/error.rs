//! Error taxonomy and the transport fault mapper.
//!
//! Every per-operation `Error` variant carries a [`MomentoError`]. Local
//! validation failures are always [`ErrorKind::InvalidArgument`] and never
//! carry [`TransportDetails`]; faults that came back from the transport are
//! translated by [`map_status`], which is total over [`Code`].

use std::fmt;

use crate::metadata::{self, Metadata};
use crate::status::{Code, Status};
use crate::transport::Plane;

/// Result type for fallible SDK calls that are not per-operation responses.
pub type Result<T> = std::result::Result<T, MomentoError>;

/// Which account limit a `LimitExceeded` fault refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LimitExceededCause {
    TopicSubscriptions,
    OperationsRate,
    ThroughputRate,
    RequestSize,
    ItemSize,
    ElementSize,
    Unknown,
}

impl LimitExceededCause {
    /// Resolve the cause from the `err` trailer if the server sent a known
    /// tag, falling back to keywords in the detail text.
    pub fn resolve(err_cause: Option<&str>, details: &str) -> Self {
        err_cause
            .and_then(Self::from_err_cause)
            .unwrap_or_else(|| Self::from_details(details))
    }

    /// Match a server cause tag such as `item_size_limit_exceeded`.
    pub fn from_err_cause(tag: &str) -> Option<Self> {
        match tag.to_ascii_lowercase().as_str() {
            "topic_subscriptions_limit_exceeded" => Some(Self::TopicSubscriptions),
            "operations_rate_limit_exceeded" => Some(Self::OperationsRate),
            "throughput_rate_limit_exceeded" => Some(Self::ThroughputRate),
            "request_size_limit_exceeded" => Some(Self::RequestSize),
            "item_size_limit_exceeded" => Some(Self::ItemSize),
            "element_size_limit_exceeded" => Some(Self::ElementSize),
            _ => None,
        }
    }

    /// Scan detail text for limit keywords. First match in priority order wins.
    pub fn from_details(details: &str) -> Self {
        const KEYWORDS: &[(&[&str], LimitExceededCause)] = &[
            (&["subscribers"], LimitExceededCause::TopicSubscriptions),
            (&["operations"], LimitExceededCause::OperationsRate),
            (&["throughput"], LimitExceededCause::ThroughputRate),
            (&["request limit", "request size"], LimitExceededCause::RequestSize),
            (&["item size"], LimitExceededCause::ItemSize),
            (&["element size"], LimitExceededCause::ElementSize),
        ];

        let details = details.to_lowercase();
        KEYWORDS
            .iter()
            .find(|(words, _)| words.iter().any(|w| details.contains(w)))
            .map(|(_, cause)| *cause)
            .unwrap_or(Self::Unknown)
    }

    /// The user-facing message for this cause.
    pub fn message(self) -> &'static str {
        match self {
            Self::TopicSubscriptions => "Topic subscriptions limit exceeded for this account",
            Self::OperationsRate => "Request rate limit exceeded for this account",
            Self::ThroughputRate => "Bandwidth limit exceeded for this account",
            Self::RequestSize => "Request size limit exceeded for this account",
            Self::ItemSize => "Item size limit exceeded for this account",
            Self::ElementSize => "Element size limit exceeded for this account",
            Self::Unknown => "Limit exceeded for this account",
        }
    }
}

/// Flat classification of every failure an operation can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Rejected locally before dispatch, or by server-side validation.
    InvalidArgument,
    AuthenticationError,
    PermissionDenied,
    NotFound,
    AlreadyExists,
    LimitExceeded(LimitExceededCause),
    InternalServerError,
    TimeoutError,
    ServerUnavailable,
    Cancelled,
    UnknownServiceError,
}

impl ErrorKind {
    /// Stable upper-snake error code.
    pub fn code(self) -> &'static str {
        match self {
            Self::InvalidArgument => "INVALID_ARGUMENT_ERROR",
            Self::AuthenticationError => "AUTHENTICATION_ERROR",
            Self::PermissionDenied => "PERMISSION_ERROR",
            Self::NotFound => "NOT_FOUND_ERROR",
            Self::AlreadyExists => "ALREADY_EXISTS_ERROR",
            Self::LimitExceeded(_) => "LIMIT_EXCEEDED_ERROR",
            Self::InternalServerError => "INTERNAL_SERVER_ERROR",
            Self::TimeoutError => "TIMEOUT_ERROR",
            Self::ServerUnavailable => "SERVER_UNAVAILABLE",
            Self::Cancelled => "CANCELLED_ERROR",
            Self::UnknownServiceError => "UNKNOWN_SERVICE_ERROR",
        }
    }

    /// The fixed message used when a transport fault maps to this kind.
    fn default_message(self) -> &'static str {
        match self {
            Self::InvalidArgument => "Invalid argument passed to Momento client",
            Self::AuthenticationError => {
                "Invalid authentication credentials to connect to cache service"
            }
            Self::PermissionDenied => {
                "Insufficient permissions to perform an operation on a cache"
            }
            Self::NotFound => "A cache with the specified name does not exist",
            Self::AlreadyExists => "A cache with the specified name already exists",
            Self::LimitExceeded(cause) => cause.message(),
            Self::InternalServerError => {
                "Unexpected exception occurred while trying to fulfill the request"
            }
            Self::TimeoutError => {
                "The client's configured timeout was exceeded; you may need to use a Configuration with more lenient timeouts"
            }
            Self::ServerUnavailable => {
                "The server was unable to handle the request; consider retrying"
            }
            Self::Cancelled => "The request was cancelled by the server; please contact Momento",
            Self::UnknownServiceError => {
                "Service returned an unknown response; please contact Momento"
            }
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// What the transport reported for a fault that crossed dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportDetails {
    pub code: Code,
    pub details: String,
    /// Metadata the call was sent with, if any.
    pub metadata: Option<Metadata>,
}

/// The structured cause carried by every per-operation `Error` variant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct MomentoError {
    kind: ErrorKind,
    message: String,
    transport: Option<TransportDetails>,
}

impl MomentoError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            transport: None,
        }
    }

    /// A local validation failure.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidArgument, message)
    }

    /// A client-side invariant failure, such as an unexpected response shape.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InternalServerError, message)
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Stable upper-snake error code, e.g. `LIMIT_EXCEEDED_ERROR`.
    pub fn error_code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Transport fault details. `None` for local failures.
    pub fn transport_details(&self) -> Option<&TransportDetails> {
        self.transport.as_ref()
    }
}

/// Translate a transport fault into the error taxonomy.
///
/// `call_metadata` is the metadata the failed call was sent with; it is kept
/// on the error for diagnostics.
pub fn map_status(status: &Status, call_metadata: Option<&Metadata>) -> MomentoError {
    let kind = match status.code() {
        Code::Cancelled => ErrorKind::Cancelled,
        Code::DeadlineExceeded => ErrorKind::TimeoutError,
        Code::InvalidArgument
        | Code::OutOfRange
        | Code::FailedPrecondition
        | Code::Unimplemented => ErrorKind::InvalidArgument,
        Code::NotFound => ErrorKind::NotFound,
        Code::AlreadyExists => ErrorKind::AlreadyExists,
        Code::PermissionDenied => ErrorKind::PermissionDenied,
        Code::Unauthenticated => ErrorKind::AuthenticationError,
        Code::ResourceExhausted => ErrorKind::LimitExceeded(LimitExceededCause::resolve(
            status.trailers().get(metadata::ERR),
            status.details(),
        )),
        Code::Aborted | Code::Internal | Code::DataLoss => ErrorKind::InternalServerError,
        Code::Unavailable => ErrorKind::ServerUnavailable,
        Code::Unknown | Code::Ok => ErrorKind::UnknownServiceError,
    };

    MomentoError {
        kind,
        message: kind.default_message().to_string(),
        transport: Some(TransportDetails {
            code: status.code(),
            details: status.details().to_string(),
            metadata: call_metadata.cloned(),
        }),
    }
}

/// Fatal failures while constructing a client.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("invalid client configuration: {0}")]
    InvalidConfiguration(#[from] MomentoError),
    #[error("failed to connect {plane} channel to {endpoint}: {source}")]
    Connect {
        plane: Plane,
        endpoint: String,
        #[source]
        source: std::io::Error,
    },
}
