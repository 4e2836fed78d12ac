//! Transport fault model.
//!
//! A [`Status`] is what a [`Transport`](crate::transport::Transport) hands
//! back when a call does not produce a response: a gRPC status code, the
//! free-text detail the server attached, and any trailer metadata.

use std::fmt;

use crate::metadata::Metadata;

/// gRPC status codes (different from HTTP status codes).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Code {
    /// The operation completed successfully.
    Ok = 0,
    /// The operation was cancelled.
    Cancelled = 1,
    /// Unknown error.
    Unknown = 2,
    /// Invalid argument was provided.
    InvalidArgument = 3,
    /// Deadline expired before operation could complete.
    DeadlineExceeded = 4,
    /// Requested entity was not found.
    NotFound = 5,
    /// Entity already exists.
    AlreadyExists = 6,
    /// Permission denied.
    PermissionDenied = 7,
    /// Resource has been exhausted.
    ResourceExhausted = 8,
    /// Operation was rejected because the system is not in a state required for execution.
    FailedPrecondition = 9,
    /// Operation was aborted.
    Aborted = 10,
    /// Operation was attempted past the valid range.
    OutOfRange = 11,
    /// Operation is not implemented or supported.
    Unimplemented = 12,
    /// Internal error.
    Internal = 13,
    /// Service is currently unavailable.
    Unavailable = 14,
    /// Unrecoverable data loss or corruption.
    DataLoss = 15,
    /// Request does not have valid authentication credentials.
    Unauthenticated = 16,
}

impl Code {
    /// Create a Code from its numeric value. Out of range values are `Unknown`.
    pub fn from_u32(value: u32) -> Self {
        match value {
            0 => Code::Ok,
            1 => Code::Cancelled,
            3 => Code::InvalidArgument,
            4 => Code::DeadlineExceeded,
            5 => Code::NotFound,
            6 => Code::AlreadyExists,
            7 => Code::PermissionDenied,
            8 => Code::ResourceExhausted,
            9 => Code::FailedPrecondition,
            10 => Code::Aborted,
            11 => Code::OutOfRange,
            12 => Code::Unimplemented,
            13 => Code::Internal,
            14 => Code::Unavailable,
            15 => Code::DataLoss,
            16 => Code::Unauthenticated,
            _ => Code::Unknown,
        }
    }

    /// Get the numeric value of this code.
    pub fn as_u32(self) -> u32 {
        self as u32
    }

    /// Canonical upper-snake name, as it appears on the wire in `grpc-status` text.
    pub fn as_str(self) -> &'static str {
        match self {
            Code::Ok => "OK",
            Code::Cancelled => "CANCELLED",
            Code::Unknown => "UNKNOWN",
            Code::InvalidArgument => "INVALID_ARGUMENT",
            Code::DeadlineExceeded => "DEADLINE_EXCEEDED",
            Code::NotFound => "NOT_FOUND",
            Code::AlreadyExists => "ALREADY_EXISTS",
            Code::PermissionDenied => "PERMISSION_DENIED",
            Code::ResourceExhausted => "RESOURCE_EXHAUSTED",
            Code::FailedPrecondition => "FAILED_PRECONDITION",
            Code::Aborted => "ABORTED",
            Code::OutOfRange => "OUT_OF_RANGE",
            Code::Unimplemented => "UNIMPLEMENTED",
            Code::Internal => "INTERNAL",
            Code::Unavailable => "UNAVAILABLE",
            Code::DataLoss => "DATA_LOSS",
            Code::Unauthenticated => "UNAUTHENTICATED",
        }
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fault returned by the transport in place of a response.
#[derive(Debug, Clone)]
pub struct Status {
    code: Code,
    details: String,
    trailers: Metadata,
}

impl Status {
    /// Create a status with a code and detail text.
    pub fn new(code: Code, details: impl Into<String>) -> Self {
        Self {
            code,
            details: details.into(),
            trailers: Metadata::new(),
        }
    }

    /// Create a status from just a code.
    pub fn from_code(code: Code) -> Self {
        Self::new(code, "")
    }

    /// Attach trailer metadata (e.g. the `err` cause tag).
    pub fn with_trailers(mut self, trailers: Metadata) -> Self {
        self.trailers = trailers;
        self
    }

    pub fn cancelled(details: impl Into<String>) -> Self {
        Self::new(Code::Cancelled, details)
    }

    pub fn deadline_exceeded(details: impl Into<String>) -> Self {
        Self::new(Code::DeadlineExceeded, details)
    }

    pub fn invalid_argument(details: impl Into<String>) -> Self {
        Self::new(Code::InvalidArgument, details)
    }

    pub fn not_found(details: impl Into<String>) -> Self {
        Self::new(Code::NotFound, details)
    }

    pub fn already_exists(details: impl Into<String>) -> Self {
        Self::new(Code::AlreadyExists, details)
    }

    pub fn resource_exhausted(details: impl Into<String>) -> Self {
        Self::new(Code::ResourceExhausted, details)
    }

    pub fn internal(details: impl Into<String>) -> Self {
        Self::new(Code::Internal, details)
    }

    pub fn unavailable(details: impl Into<String>) -> Self {
        Self::new(Code::Unavailable, details)
    }

    pub fn unauthenticated(details: impl Into<String>) -> Self {
        Self::new(Code::Unauthenticated, details)
    }

    /// Get the status code.
    pub fn code(&self) -> Code {
        self.code
    }

    /// Free-text detail supplied by the server. May be empty.
    pub fn details(&self) -> &str {
        &self.details
    }

    /// Trailer metadata that came back with the fault.
    pub fn trailers(&self) -> &Metadata {
        &self.trailers
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.details.is_empty() {
            write!(f, "{}", self.code)
        } else {
            write!(f, "{}: {}", self.code, self.details)
        }
    }
}

impl std::error::Error for Status {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_from_u32() {
        assert_eq!(Code::from_u32(0), Code::Ok);
        assert_eq!(Code::from_u32(8), Code::ResourceExhausted);
        assert_eq!(Code::from_u32(16), Code::Unauthenticated);
        assert_eq!(Code::from_u32(2), Code::Unknown);
        assert_eq!(Code::from_u32(999), Code::Unknown);
    }

    #[test]
    fn test_code_roundtrip() {
        for value in 0..=16 {
            assert_eq!(Code::from_u32(value).as_u32(), value);
        }
    }

    #[test]
    fn test_code_display() {
        assert_eq!(Code::DeadlineExceeded.to_string(), "DEADLINE_EXCEEDED");
        assert_eq!(Code::Unauthenticated.to_string(), "UNAUTHENTICATED");
    }

    #[test]
    fn test_status_display() {
        assert_eq!(Status::from_code(Code::NotFound).to_string(), "NOT_FOUND");
        assert_eq!(
            Status::internal("boom").to_string(),
            "INTERNAL: boom".to_string()
        );
    }

    #[test]
    fn test_status_trailers() {
        let mut trailers = Metadata::new();
        trailers.insert("Err", "item_size_limit_exceeded");
        let status = Status::resource_exhausted("too big").with_trailers(trailers);
        assert_eq!(status.code(), Code::ResourceExhausted);
        assert_eq!(status.details(), "too big");
        assert_eq!(status.trailers().get("err"), Some("item_size_limit_exceeded"));
    }
}
