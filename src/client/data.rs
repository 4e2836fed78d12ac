//! Data plane operations.

use std::time::Duration;

use bytes::Bytes;

use crate::error::{MomentoError, Result};
use crate::metadata::Metadata;
use crate::pipeline::{self, unexpected};
use crate::proto::{self, ECacheResult, Request, Response};
use crate::response::{
    DeleteResponse, GetResponse, ListConcatenateBackResponse, ListConcatenateFrontResponse,
    ListFetchResponse, ListLengthResponse, ListPopBackResponse, ListPopFrontResponse,
    ListPushBackResponse, ListPushFrontResponse, ListRemoveValueResponse, ListRetainResponse,
    SetResponse,
};
use crate::transport::{Channel, Transport};
use crate::ttl::CollectionTtl;
use crate::validate;

pub(crate) struct DataClient<T> {
    channel: Channel<T>,
    deadline: Duration,
    default_ttl: Duration,
}

/// TTL fields of a collection write after defaults are applied.
#[derive(Debug, Clone, Copy)]
struct ResolvedTtl {
    millis: u64,
    refresh: bool,
}

fn cache_and_list(cache_name: &str, list_name: &str) -> Result<()> {
    validate::cache_name(cache_name)?;
    validate::list_name(list_name)
}

fn list_bytes(list_name: &str) -> Bytes {
    Bytes::copy_from_slice(list_name.as_bytes())
}

impl<T: Transport> DataClient<T> {
    pub(crate) fn new(channel: Channel<T>, deadline: Duration, default_ttl: Duration) -> Self {
        Self {
            channel,
            deadline,
            default_ttl,
        }
    }

    pub(crate) fn close(&self) {
        self.channel.close();
    }

    pub(crate) fn is_closed(&self) -> bool {
        self.channel.is_closed()
    }

    /// An absent TTL, or one without a duration, falls back to the client default.
    fn collection_ttl(&self, ttl: Option<CollectionTtl>) -> Result<ResolvedTtl> {
        let ttl = ttl.unwrap_or_default();
        Ok(ResolvedTtl {
            millis: validate::ttl_millis(ttl.resolve(self.default_ttl))?,
            refresh: ttl.refresh_ttl(),
        })
    }

    /// Names, truncation size, then TTL.
    fn validate_write(
        &self,
        cache_name: &str,
        list_name: &str,
        truncate_to_size: Option<u32>,
        ttl: Option<CollectionTtl>,
    ) -> Result<ResolvedTtl> {
        cache_and_list(cache_name, list_name)?;
        validate::truncate_to_size(truncate_to_size)?;
        self.collection_ttl(ttl)
    }

    pub(crate) async fn get(&self, cache_name: &str, key: &[u8]) -> GetResponse {
        pipeline::execute(
            &self.channel,
            self.deadline,
            validate::cache_name(cache_name),
            |()| {
                let request = proto::GetRequest {
                    cache_key: Bytes::copy_from_slice(key),
                };
                (Request::Get(request), Metadata::for_cache(cache_name))
            },
            |response| match response {
                Response::Get(get) => match get.result {
                    ECacheResult::Hit => Ok(GetResponse::Hit(get.cache_body)),
                    ECacheResult::Miss => Ok(GetResponse::Miss),
                    other => Err(MomentoError::internal(format!(
                        "Unsupported cache Get result: {other:?}"
                    ))),
                },
                other => Err(unexpected(&other)),
            },
        )
        .await
    }

    pub(crate) async fn set(
        &self,
        cache_name: &str,
        key: &[u8],
        value: Bytes,
        ttl: Option<Duration>,
    ) -> SetResponse {
        let ttl = ttl.unwrap_or(self.default_ttl);
        pipeline::execute(
            &self.channel,
            self.deadline,
            validate::cache_name(cache_name).and_then(|()| validate::ttl_millis(ttl)),
            |ttl_milliseconds| {
                let request = proto::SetRequest {
                    cache_key: Bytes::copy_from_slice(key),
                    cache_body: value,
                    ttl_milliseconds,
                };
                (Request::Set(request), Metadata::for_cache(cache_name))
            },
            |response| match response {
                Response::Set(set) => match set.result {
                    ECacheResult::Ok => Ok(SetResponse::Success),
                    other => Err(MomentoError::internal(format!(
                        "Unsupported cache Set result: {other:?}"
                    ))),
                },
                other => Err(unexpected(&other)),
            },
        )
        .await
    }

    pub(crate) async fn delete(&self, cache_name: &str, key: &[u8]) -> DeleteResponse {
        pipeline::execute(
            &self.channel,
            self.deadline,
            validate::cache_name(cache_name),
            |()| {
                let request = proto::DeleteRequest {
                    cache_key: Bytes::copy_from_slice(key),
                };
                (Request::Delete(request), Metadata::for_cache(cache_name))
            },
            |response| match response {
                Response::Delete(_) => Ok(DeleteResponse::Success),
                other => Err(unexpected(&other)),
            },
        )
        .await
    }

    pub(crate) async fn list_concatenate_back(
        &self,
        cache_name: &str,
        list_name: &str,
        values: Vec<Bytes>,
        truncate_front_to_size: Option<u32>,
        ttl: Option<CollectionTtl>,
    ) -> ListConcatenateBackResponse {
        pipeline::execute(
            &self.channel,
            self.deadline,
            self.validate_write(cache_name, list_name, truncate_front_to_size, ttl),
            |ttl| {
                let request = proto::ListConcatenateBackRequest {
                    list_name: list_bytes(list_name),
                    values,
                    truncate_front_to_size: truncate_front_to_size.unwrap_or(0),
                    ttl_milliseconds: ttl.millis,
                    refresh_ttl: ttl.refresh,
                };
                (
                    Request::ListConcatenateBack(request),
                    Metadata::for_cache(cache_name),
                )
            },
            |response| match response {
                Response::ListConcatenateBack(r) => Ok(ListConcatenateBackResponse::Success {
                    list_length: r.list_length,
                }),
                other => Err(unexpected(&other)),
            },
        )
        .await
    }

    pub(crate) async fn list_concatenate_front(
        &self,
        cache_name: &str,
        list_name: &str,
        values: Vec<Bytes>,
        truncate_back_to_size: Option<u32>,
        ttl: Option<CollectionTtl>,
    ) -> ListConcatenateFrontResponse {
        pipeline::execute(
            &self.channel,
            self.deadline,
            self.validate_write(cache_name, list_name, truncate_back_to_size, ttl),
            |ttl| {
                let request = proto::ListConcatenateFrontRequest {
                    list_name: list_bytes(list_name),
                    values,
                    truncate_back_to_size: truncate_back_to_size.unwrap_or(0),
                    ttl_milliseconds: ttl.millis,
                    refresh_ttl: ttl.refresh,
                };
                (
                    Request::ListConcatenateFront(request),
                    Metadata::for_cache(cache_name),
                )
            },
            |response| match response {
                Response::ListConcatenateFront(r) => Ok(ListConcatenateFrontResponse::Success {
                    list_length: r.list_length,
                }),
                other => Err(unexpected(&other)),
            },
        )
        .await
    }

    pub(crate) async fn list_fetch(
        &self,
        cache_name: &str,
        list_name: &str,
        start_index: Option<i32>,
        end_index: Option<i32>,
    ) -> ListFetchResponse {
        pipeline::execute(
            &self.channel,
            self.deadline,
            cache_and_list(cache_name, list_name)
                .and_then(|()| validate::index_range(start_index, end_index)),
            |()| {
                let request = proto::ListFetchRequest {
                    list_name: list_bytes(list_name),
                    start_index,
                    end_index,
                };
                (Request::ListFetch(request), Metadata::for_cache(cache_name))
            },
            |response| match response {
                Response::ListFetch(proto::ListFetchResponse::Found { values }) => {
                    Ok(ListFetchResponse::Hit(values))
                }
                Response::ListFetch(proto::ListFetchResponse::Missing) => {
                    Ok(ListFetchResponse::Miss)
                }
                other => Err(unexpected(&other)),
            },
        )
        .await
    }

    pub(crate) async fn list_length(&self, cache_name: &str, list_name: &str) -> ListLengthResponse {
        pipeline::execute(
            &self.channel,
            self.deadline,
            cache_and_list(cache_name, list_name),
            |()| {
                let request = proto::ListLengthRequest {
                    list_name: list_bytes(list_name),
                };
                (Request::ListLength(request), Metadata::for_cache(cache_name))
            },
            |response| match response {
                Response::ListLength(proto::ListLengthResponse::Found { length }) => {
                    Ok(ListLengthResponse::Hit(length))
                }
                Response::ListLength(proto::ListLengthResponse::Missing) => {
                    Ok(ListLengthResponse::Miss)
                }
                other => Err(unexpected(&other)),
            },
        )
        .await
    }

    pub(crate) async fn list_push_back(
        &self,
        cache_name: &str,
        list_name: &str,
        value: Bytes,
        truncate_front_to_size: Option<u32>,
        ttl: Option<CollectionTtl>,
    ) -> ListPushBackResponse {
        pipeline::execute(
            &self.channel,
            self.deadline,
            self.validate_write(cache_name, list_name, truncate_front_to_size, ttl),
            |ttl| {
                let request = proto::ListPushBackRequest {
                    list_name: list_bytes(list_name),
                    value,
                    truncate_front_to_size: truncate_front_to_size.unwrap_or(0),
                    ttl_milliseconds: ttl.millis,
                    refresh_ttl: ttl.refresh,
                };
                (Request::ListPushBack(request), Metadata::for_cache(cache_name))
            },
            |response| match response {
                Response::ListPushBack(r) => Ok(ListPushBackResponse::Success {
                    list_length: r.list_length,
                }),
                other => Err(unexpected(&other)),
            },
        )
        .await
    }

    pub(crate) async fn list_push_front(
        &self,
        cache_name: &str,
        list_name: &str,
        value: Bytes,
        truncate_back_to_size: Option<u32>,
        ttl: Option<CollectionTtl>,
    ) -> ListPushFrontResponse {
        pipeline::execute(
            &self.channel,
            self.deadline,
            self.validate_write(cache_name, list_name, truncate_back_to_size, ttl),
            |ttl| {
                let request = proto::ListPushFrontRequest {
                    list_name: list_bytes(list_name),
                    value,
                    truncate_back_to_size: truncate_back_to_size.unwrap_or(0),
                    ttl_milliseconds: ttl.millis,
                    refresh_ttl: ttl.refresh,
                };
                (Request::ListPushFront(request), Metadata::for_cache(cache_name))
            },
            |response| match response {
                Response::ListPushFront(r) => Ok(ListPushFrontResponse::Success {
                    list_length: r.list_length,
                }),
                other => Err(unexpected(&other)),
            },
        )
        .await
    }

    pub(crate) async fn list_pop_back(&self, cache_name: &str, list_name: &str) -> ListPopBackResponse {
        pipeline::execute(
            &self.channel,
            self.deadline,
            cache_and_list(cache_name, list_name),
            |()| {
                let request = proto::ListPopRequest {
                    list_name: list_bytes(list_name),
                };
                (Request::ListPopBack(request), Metadata::for_cache(cache_name))
            },
            |response| match response {
                Response::ListPopBack(proto::ListPopResponse::Found { value }) => {
                    Ok(ListPopBackResponse::Hit(value))
                }
                Response::ListPopBack(proto::ListPopResponse::Missing) => {
                    Ok(ListPopBackResponse::Miss)
                }
                other => Err(unexpected(&other)),
            },
        )
        .await
    }

    pub(crate) async fn list_pop_front(
        &self,
        cache_name: &str,
        list_name: &str,
    ) -> ListPopFrontResponse {
        pipeline::execute(
            &self.channel,
            self.deadline,
            cache_and_list(cache_name, list_name),
            |()| {
                let request = proto::ListPopRequest {
                    list_name: list_bytes(list_name),
                };
                (Request::ListPopFront(request), Metadata::for_cache(cache_name))
            },
            |response| match response {
                Response::ListPopFront(proto::ListPopResponse::Found { value }) => {
                    Ok(ListPopFrontResponse::Hit(value))
                }
                Response::ListPopFront(proto::ListPopResponse::Missing) => {
                    Ok(ListPopFrontResponse::Miss)
                }
                other => Err(unexpected(&other)),
            },
        )
        .await
    }

    pub(crate) async fn list_remove_value(
        &self,
        cache_name: &str,
        list_name: &str,
        value: Bytes,
    ) -> ListRemoveValueResponse {
        pipeline::execute(
            &self.channel,
            self.deadline,
            cache_and_list(cache_name, list_name),
            |()| {
                let request = proto::ListRemoveValueRequest {
                    list_name: list_bytes(list_name),
                    value,
                };
                (Request::ListRemove(request), Metadata::for_cache(cache_name))
            },
            |response| match response {
                Response::ListRemove => Ok(ListRemoveValueResponse::Success),
                other => Err(unexpected(&other)),
            },
        )
        .await
    }

    pub(crate) async fn list_retain(
        &self,
        cache_name: &str,
        list_name: &str,
        start_index: Option<i32>,
        end_index: Option<i32>,
        ttl: Option<CollectionTtl>,
    ) -> ListRetainResponse {
        let validated = cache_and_list(cache_name, list_name)
            .and_then(|()| validate::index_range(start_index, end_index))
            .and_then(|()| self.collection_ttl(ttl));

        pipeline::execute(
            &self.channel,
            self.deadline,
            validated,
            |ttl| {
                let request = proto::ListRetainRequest {
                    list_name: list_bytes(list_name),
                    start_index,
                    end_index,
                    ttl_milliseconds: ttl.millis,
                    refresh_ttl: ttl.refresh,
                };
                (Request::ListRetain(request), Metadata::for_cache(cache_name))
            },
            |response| match response {
                Response::ListRetain => Ok(ListRetainResponse::Success),
                other => Err(unexpected(&other)),
            },
        )
        .await
    }
}
