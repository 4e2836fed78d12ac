//! Results for control plane operations.

use std::fmt;

use super::momento_response;
use crate::error::MomentoError;

/// Number of cache names shown when a list result is displayed.
const DISPLAYED_CACHE_NAMES: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheCreateResponse {
    Success,
    Error(MomentoError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheDeleteResponse {
    Success,
    Error(MomentoError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheFlushResponse {
    Success,
    Error(MomentoError),
}

/// Metadata about one cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheInfo {
    name: String,
}

impl CacheInfo {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheListResponse {
    Success(Vec<CacheInfo>),
    Error(MomentoError),
}

impl CacheListResponse {
    pub fn caches(&self) -> Option<&[CacheInfo]> {
        match self {
            CacheListResponse::Success(caches) => Some(caches),
            CacheListResponse::Error(_) => None,
        }
    }
}

impl fmt::Display for CacheListResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheListResponse::Success(caches) => {
                let names: Vec<&str> = caches
                    .iter()
                    .take(DISPLAYED_CACHE_NAMES)
                    .map(CacheInfo::name)
                    .collect();
                write!(f, "Success: caches: \"{}\"", names.join("\", \""))?;
                if caches.len() > DISPLAYED_CACHE_NAMES {
                    write!(f, "...")?;
                }
                Ok(())
            }
            CacheListResponse::Error(e) => write!(f, "Error: {e}"),
        }
    }
}

momento_response!(
    CacheCreateResponse,
    CacheDeleteResponse,
    CacheFlushResponse,
    CacheListResponse,
);
