//! Results for get, set and delete.

use std::borrow::Cow;

use bytes::Bytes;

use super::momento_response;
use crate::error::MomentoError;

/// Result of a get.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GetResponse {
    /// The key was found.
    Hit(Bytes),
    /// The key was not found.
    Miss,
    Error(MomentoError),
}

impl GetResponse {
    pub fn is_hit(&self) -> bool {
        matches!(self, GetResponse::Hit(_))
    }

    pub fn is_miss(&self) -> bool {
        matches!(self, GetResponse::Miss)
    }

    /// The value on a hit.
    pub fn value(&self) -> Option<&Bytes> {
        match self {
            GetResponse::Hit(v) => Some(v),
            _ => None,
        }
    }

    /// The value on a hit, decoded as UTF-8 with invalid sequences replaced.
    pub fn value_string(&self) -> Option<Cow<'_, str>> {
        self.value().map(|v| String::from_utf8_lossy(v))
    }

    pub fn into_value(self) -> Option<Bytes> {
        match self {
            GetResponse::Hit(v) => Some(v),
            _ => None,
        }
    }
}

/// Result of a set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetResponse {
    Success,
    Error(MomentoError),
}

/// Result of a delete. Deleting a missing key is a success.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteResponse {
    Success,
    Error(MomentoError),
}

momento_response!(GetResponse, SetResponse, DeleteResponse);
