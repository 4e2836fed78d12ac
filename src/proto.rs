//! Typed request and response messages exchanged with the transport.
//!
//! These mirror the Momento `cache_client.Scs` and `control_client.ScsControl`
//! services. Encoding them on the wire is the transport's job.

use bytes::Bytes;

const DATA_SERVICE: &str = "/cache_client.Scs";
const CONTROL_SERVICE: &str = "/control_client.ScsControl";

// ============================================================================
// Data plane
// ============================================================================

/// ECacheResult enum values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ECacheResult {
    Invalid = 0,
    Ok = 1,
    Hit = 2,
    Miss = 3,
}

impl ECacheResult {
    pub fn from_u32(value: u32) -> Self {
        match value {
            1 => ECacheResult::Ok,
            2 => ECacheResult::Hit,
            3 => ECacheResult::Miss,
            _ => ECacheResult::Invalid,
        }
    }
}

/// _GetRequest message.
/// Note: cache_name is passed via metadata header "cache", not in the message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetRequest {
    pub cache_key: Bytes,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetResponse {
    pub result: ECacheResult,
    pub cache_body: Bytes,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetRequest {
    pub cache_key: Bytes,
    pub cache_body: Bytes,
    pub ttl_milliseconds: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetResponse {
    pub result: ECacheResult,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteRequest {
    pub cache_key: Bytes,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteResponse;

/// `truncate_front_to_size` of 0 means no truncation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListConcatenateBackRequest {
    pub list_name: Bytes,
    pub values: Vec<Bytes>,
    pub truncate_front_to_size: u32,
    pub ttl_milliseconds: u64,
    pub refresh_ttl: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListConcatenateFrontRequest {
    pub list_name: Bytes,
    pub values: Vec<Bytes>,
    pub truncate_back_to_size: u32,
    pub ttl_milliseconds: u64,
    pub refresh_ttl: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListPushBackRequest {
    pub list_name: Bytes,
    pub value: Bytes,
    pub truncate_front_to_size: u32,
    pub ttl_milliseconds: u64,
    pub refresh_ttl: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListPushFrontRequest {
    pub list_name: Bytes,
    pub value: Bytes,
    pub truncate_back_to_size: u32,
    pub ttl_milliseconds: u64,
    pub refresh_ttl: bool,
}

/// Reply to any push or concatenate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListLengthChanged {
    pub list_length: u32,
}

/// Absent indices are unbounded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListFetchRequest {
    pub list_name: Bytes,
    pub start_index: Option<i32>,
    pub end_index: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListFetchResponse {
    Found { values: Vec<Bytes> },
    Missing,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListLengthRequest {
    pub list_name: Bytes,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListLengthResponse {
    Found { length: u32 },
    Missing,
}

/// Used for both pop-back and pop-front.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListPopRequest {
    pub list_name: Bytes,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListPopResponse {
    Found { value: Bytes },
    Missing,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRemoveValueRequest {
    pub list_name: Bytes,
    pub value: Bytes,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRetainRequest {
    pub list_name: Bytes,
    pub start_index: Option<i32>,
    pub end_index: Option<i32>,
    pub ttl_milliseconds: u64,
    pub refresh_ttl: bool,
}

// ============================================================================
// Control plane
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateCacheRequest {
    pub cache_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteCacheRequest {
    pub cache_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlushCacheRequest {
    pub cache_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListCachesRequest {
    pub next_token: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheInfo {
    pub cache_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListCachesResponse {
    pub caches: Vec<CacheInfo>,
    pub next_token: String,
}

// ============================================================================
// Envelopes
// ============================================================================

/// Every call the SDK can issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Get(GetRequest),
    Set(SetRequest),
    Delete(DeleteRequest),
    ListConcatenateBack(ListConcatenateBackRequest),
    ListConcatenateFront(ListConcatenateFrontRequest),
    ListFetch(ListFetchRequest),
    ListLength(ListLengthRequest),
    ListPushBack(ListPushBackRequest),
    ListPushFront(ListPushFrontRequest),
    ListPopBack(ListPopRequest),
    ListPopFront(ListPopRequest),
    ListRemove(ListRemoveValueRequest),
    ListRetain(ListRetainRequest),
    CreateCache(CreateCacheRequest),
    DeleteCache(DeleteCacheRequest),
    FlushCache(FlushCacheRequest),
    ListCaches(ListCachesRequest),
}

impl Request {
    /// Full gRPC method path, e.g. `/cache_client.Scs/ListPushBack`.
    pub fn method(&self) -> String {
        let (service, name) = match self {
            Request::Get(_) => (DATA_SERVICE, "Get"),
            Request::Set(_) => (DATA_SERVICE, "Set"),
            Request::Delete(_) => (DATA_SERVICE, "Delete"),
            Request::ListConcatenateBack(_) => (DATA_SERVICE, "ListConcatenateBack"),
            Request::ListConcatenateFront(_) => (DATA_SERVICE, "ListConcatenateFront"),
            Request::ListFetch(_) => (DATA_SERVICE, "ListFetch"),
            Request::ListLength(_) => (DATA_SERVICE, "ListLength"),
            Request::ListPushBack(_) => (DATA_SERVICE, "ListPushBack"),
            Request::ListPushFront(_) => (DATA_SERVICE, "ListPushFront"),
            Request::ListPopBack(_) => (DATA_SERVICE, "ListPopBack"),
            Request::ListPopFront(_) => (DATA_SERVICE, "ListPopFront"),
            Request::ListRemove(_) => (DATA_SERVICE, "ListRemove"),
            Request::ListRetain(_) => (DATA_SERVICE, "ListRetain"),
            Request::CreateCache(_) => (CONTROL_SERVICE, "CreateCache"),
            Request::DeleteCache(_) => (CONTROL_SERVICE, "DeleteCache"),
            Request::FlushCache(_) => (CONTROL_SERVICE, "FlushCache"),
            Request::ListCaches(_) => (CONTROL_SERVICE, "ListCaches"),
        };
        format!("{service}/{name}")
    }

    /// Whether this call goes to the control plane.
    pub fn is_control(&self) -> bool {
        matches!(
            self,
            Request::CreateCache(_)
                | Request::DeleteCache(_)
                | Request::FlushCache(_)
                | Request::ListCaches(_)
        )
    }
}

/// Every reply the SDK understands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    Get(GetResponse),
    Set(SetResponse),
    Delete(DeleteResponse),
    ListConcatenateBack(ListLengthChanged),
    ListConcatenateFront(ListLengthChanged),
    ListFetch(ListFetchResponse),
    ListLength(ListLengthResponse),
    ListPushBack(ListLengthChanged),
    ListPushFront(ListLengthChanged),
    ListPopBack(ListPopResponse),
    ListPopFront(ListPopResponse),
    ListRemove,
    ListRetain,
    CreateCache,
    DeleteCache,
    FlushCache,
    ListCaches(ListCachesResponse),
}

impl Response {
    /// Variant name, for diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            Response::Get(_) => "Get",
            Response::Set(_) => "Set",
            Response::Delete(_) => "Delete",
            Response::ListConcatenateBack(_) => "ListConcatenateBack",
            Response::ListConcatenateFront(_) => "ListConcatenateFront",
            Response::ListFetch(_) => "ListFetch",
            Response::ListLength(_) => "ListLength",
            Response::ListPushBack(_) => "ListPushBack",
            Response::ListPushFront(_) => "ListPushFront",
            Response::ListPopBack(_) => "ListPopBack",
            Response::ListPopFront(_) => "ListPopFront",
            Response::ListRemove => "ListRemove",
            Response::ListRetain => "ListRetain",
            Response::CreateCache => "CreateCache",
            Response::DeleteCache => "DeleteCache",
            Response::FlushCache => "FlushCache",
            Response::ListCaches(_) => "ListCaches",
        }
    }
}
