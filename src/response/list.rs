//! Results for list operations.

use bytes::Bytes;

use super::momento_response;
use crate::error::MomentoError;

/// Result of appending values to the back of a list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListConcatenateBackResponse {
    /// The list's length after the write.
    Success { list_length: u32 },
    Error(MomentoError),
}

/// Result of prepending values to the front of a list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListConcatenateFrontResponse {
    Success { list_length: u32 },
    Error(MomentoError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListPushBackResponse {
    Success { list_length: u32 },
    Error(MomentoError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListPushFrontResponse {
    Success { list_length: u32 },
    Error(MomentoError),
}

/// Result of fetching a list or a slice of one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListFetchResponse {
    Hit(Vec<Bytes>),
    /// The list does not exist.
    Miss,
    Error(MomentoError),
}

impl ListFetchResponse {
    pub fn values(&self) -> Option<&[Bytes]> {
        match self {
            ListFetchResponse::Hit(values) => Some(values),
            _ => None,
        }
    }

    /// Values decoded as UTF-8 with invalid sequences replaced.
    pub fn values_string(&self) -> Option<Vec<String>> {
        self.values().map(|values| {
            values
                .iter()
                .map(|v| String::from_utf8_lossy(v).into_owned())
                .collect()
        })
    }

    pub fn into_values(self) -> Option<Vec<Bytes>> {
        match self {
            ListFetchResponse::Hit(values) => Some(values),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListLengthResponse {
    Hit(u32),
    /// The list does not exist.
    Miss,
    Error(MomentoError),
}

impl ListLengthResponse {
    pub fn length(&self) -> Option<u32> {
        match self {
            ListLengthResponse::Hit(length) => Some(*length),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListPopBackResponse {
    Hit(Bytes),
    /// The list does not exist or is empty.
    Miss,
    Error(MomentoError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListPopFrontResponse {
    Hit(Bytes),
    Miss,
    Error(MomentoError),
}

impl ListPopBackResponse {
    pub fn value(&self) -> Option<&Bytes> {
        match self {
            ListPopBackResponse::Hit(v) => Some(v),
            _ => None,
        }
    }
}

impl ListPopFrontResponse {
    pub fn value(&self) -> Option<&Bytes> {
        match self {
            ListPopFrontResponse::Hit(v) => Some(v),
            _ => None,
        }
    }
}

/// Removing from a missing list, or a value that is not present, succeeds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListRemoveValueResponse {
    Success,
    Error(MomentoError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListRetainResponse {
    Success,
    Error(MomentoError),
}

macro_rules! list_length {
    ($($name:ident),+) => {
        $(
            impl $name {
                /// The list's length after the write.
                pub fn list_length(&self) -> Option<u32> {
                    match self {
                        $name::Success { list_length } => Some(*list_length),
                        _ => None,
                    }
                }
            }
        )+
    };
}

list_length!(
    ListConcatenateBackResponse,
    ListConcatenateFrontResponse,
    ListPushBackResponse,
    ListPushFrontResponse
);

momento_response!(
    ListConcatenateBackResponse,
    ListConcatenateFrontResponse,
    ListPushBackResponse,
    ListPushFrontResponse,
    ListFetchResponse,
    ListLengthResponse,
    ListPopBackResponse,
    ListPopFrontResponse,
    ListRemoveValueResponse,
    ListRetainResponse,
);
