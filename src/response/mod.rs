//! Per-operation results.
//!
//! Every operation returns its own closed enum: a data-bearing success
//! (`Hit`), a data-less success (`Success`, `Miss`), or `Error` carrying a
//! [`MomentoError`]. Callers can match on the variant, or call
//! [`MomentoResponse::into_result`] and propagate the error with `?`.
//!
//! ```no_run
//! # use momento_sdk::response::{GetResponse, MomentoResponse};
//! # fn handle(response: GetResponse) -> Result<(), momento_sdk::MomentoError> {
//! match response.into_result()? {
//!     GetResponse::Hit(value) => println!("{} bytes", value.len()),
//!     _ => println!("miss"),
//! }
//! # Ok(())
//! # }
//! ```

mod control;
mod list;
mod scalar;

pub use control::{CacheCreateResponse, CacheDeleteResponse, CacheFlushResponse, CacheInfo, CacheListResponse};
pub use list::{
    ListConcatenateBackResponse, ListConcatenateFrontResponse, ListFetchResponse,
    ListLengthResponse, ListPopBackResponse, ListPopFrontResponse, ListPushBackResponse,
    ListPushFrontResponse, ListRemoveValueResponse, ListRetainResponse,
};
pub use scalar::{DeleteResponse, GetResponse, SetResponse};

use crate::error::MomentoError;

mod sealed {
    pub trait Sealed {}
}

/// Behavior shared by every operation result.
///
/// Sealed: only the result types in this module implement it.
pub trait MomentoResponse: Sized + sealed::Sealed {
    /// The `Error` variant wrapping `error`.
    fn from_error(error: MomentoError) -> Self;

    /// The cause, if this is the `Error` variant.
    fn error(&self) -> Option<&MomentoError>;

    /// `Err` for the `Error` variant, otherwise `Ok(self)`.
    fn into_result(self) -> Result<Self, MomentoError>;

    fn is_error(&self) -> bool {
        self.error().is_some()
    }
}

/// Implements [`MomentoResponse`] and `From<MomentoError>` for an enum with
/// an `Error(MomentoError)` variant.
macro_rules! momento_response {
    ($($name:ident),+ $(,)?) => {
        $(
            impl $crate::response::sealed::Sealed for $name {}

            impl $crate::response::MomentoResponse for $name {
                fn from_error(error: $crate::error::MomentoError) -> Self {
                    $name::Error(error)
                }

                fn error(&self) -> Option<&$crate::error::MomentoError> {
                    match self {
                        $name::Error(e) => Some(e),
                        _ => None,
                    }
                }

                fn into_result(self) -> Result<Self, $crate::error::MomentoError> {
                    match self {
                        $name::Error(e) => Err(e),
                        other => Ok(other),
                    }
                }
            }

            impl From<$crate::error::MomentoError> for $name {
                fn from(error: $crate::error::MomentoError) -> Self {
                    $name::Error(error)
                }
            }
        )+
    };
}

pub(crate) use momento_response;
