//! Argument checks run before any request is built.
//!
//! Each check is pure and returns an `InvalidArgument` error with a fixed
//! message on violation.

use std::time::Duration;

use crate::error::{MomentoError, Result};

pub const CACHE_NAME_REQUIRED: &str = "Non-empty cache name is required";
pub const LIST_NAME_REQUIRED: &str = "Non-empty list name is required";
pub const SET_NAME_REQUIRED: &str = "Non-empty set name is required";
pub const DICTIONARY_NAME_REQUIRED: &str = "Non-empty dictionary name is required";
pub const TTL_MUST_BE_POSITIVE: &str = "Cache item TTL must be positive";
pub const TRUNCATE_TO_SIZE_MUST_BE_POSITIVE: &str = "Truncate to size must be positive";
pub const INDEX_RANGE_INVALID: &str = "End index must be greater than start index";
pub const OFFSET_MUST_BE_NON_NEGATIVE: &str = "Offset must be greater than or equal to 0.";
pub const COUNT_MUST_BE_POSITIVE: &str = "Count must be greater than 0.";
pub const REQUEST_DEADLINE_MUST_BE_POSITIVE: &str = "Request deadline must be positive";

fn non_blank(name: &str, message: &'static str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(MomentoError::invalid_argument(message));
    }
    Ok(())
}

pub fn cache_name(name: &str) -> Result<()> {
    non_blank(name, CACHE_NAME_REQUIRED)
}

pub fn list_name(name: &str) -> Result<()> {
    non_blank(name, LIST_NAME_REQUIRED)
}

pub fn set_name(name: &str) -> Result<()> {
    non_blank(name, SET_NAME_REQUIRED)
}

pub fn dictionary_name(name: &str) -> Result<()> {
    non_blank(name, DICTIONARY_NAME_REQUIRED)
}

/// Zero is rejected; `Duration` already rules out negatives.
pub fn ttl(ttl: Duration) -> Result<()> {
    ttl_millis(ttl).map(|_| ())
}

/// The TTL in whole milliseconds, as carried on the wire.
///
/// Durations that round down to 0 ms or do not fit in a `u64` are rejected
/// along with zero.
pub fn ttl_millis(ttl: Duration) -> Result<u64> {
    match u64::try_from(ttl.as_millis()) {
        Ok(millis) if millis > 0 => Ok(millis),
        _ => Err(MomentoError::invalid_argument(TTL_MUST_BE_POSITIVE)),
    }
}

pub fn truncate_to_size(size: Option<u32>) -> Result<()> {
    match size {
        Some(0) => Err(MomentoError::invalid_argument(
            TRUNCATE_TO_SIZE_MUST_BE_POSITIVE,
        )),
        _ => Ok(()),
    }
}

/// Half-open `[start, end)`. An absent bound is unbounded on that side, and
/// ordering is only checked when both are present.
pub fn index_range(start: Option<i32>, end: Option<i32>) -> Result<()> {
    match (start, end) {
        (Some(start), Some(end)) if end <= start => {
            Err(MomentoError::invalid_argument(INDEX_RANGE_INVALID))
        }
        _ => Ok(()),
    }
}

pub fn offset(offset: Option<i32>) -> Result<()> {
    match offset {
        Some(o) if o < 0 => Err(MomentoError::invalid_argument(
            OFFSET_MUST_BE_NON_NEGATIVE,
        )),
        _ => Ok(()),
    }
}

pub fn count(count: Option<i32>) -> Result<()> {
    match count {
        Some(c) if c <= 0 => Err(MomentoError::invalid_argument(COUNT_MUST_BE_POSITIVE)),
        _ => Ok(()),
    }
}

pub fn request_deadline(deadline: Duration) -> Result<()> {
    if deadline.is_zero() {
        return Err(MomentoError::invalid_argument(
            REQUEST_DEADLINE_MUST_BE_POSITIVE,
        ));
    }
    Ok(())
}
