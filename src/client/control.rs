//! Control plane operations.

use std::time::Duration;

use crate::metadata::Metadata;
use crate::pipeline::{self, unexpected};
use crate::proto::{self, Request, Response};
use crate::response::{
    CacheCreateResponse, CacheDeleteResponse, CacheFlushResponse, CacheInfo, CacheListResponse,
};
use crate::transport::{Channel, Transport};
use crate::validate;

pub(crate) struct ControlClient<T> {
    channel: Channel<T>,
    deadline: Duration,
}

impl<T: Transport> ControlClient<T> {
    pub(crate) fn new(channel: Channel<T>, deadline: Duration) -> Self {
        Self { channel, deadline }
    }

    pub(crate) fn close(&self) {
        self.channel.close();
    }

    pub(crate) fn is_closed(&self) -> bool {
        self.channel.is_closed()
    }

    pub(crate) async fn create_cache(&self, cache_name: &str) -> CacheCreateResponse {
        pipeline::execute(
            &self.channel,
            self.deadline,
            validate::cache_name(cache_name),
            |()| {
                let request = proto::CreateCacheRequest {
                    cache_name: cache_name.to_string(),
                };
                (Request::CreateCache(request), Metadata::new())
            },
            |response| match response {
                Response::CreateCache => Ok(CacheCreateResponse::Success),
                other => Err(unexpected(&other)),
            },
        )
        .await
    }

    pub(crate) async fn delete_cache(&self, cache_name: &str) -> CacheDeleteResponse {
        pipeline::execute(
            &self.channel,
            self.deadline,
            validate::cache_name(cache_name),
            |()| {
                let request = proto::DeleteCacheRequest {
                    cache_name: cache_name.to_string(),
                };
                (Request::DeleteCache(request), Metadata::new())
            },
            |response| match response {
                Response::DeleteCache => Ok(CacheDeleteResponse::Success),
                other => Err(unexpected(&other)),
            },
        )
        .await
    }

    pub(crate) async fn flush_cache(&self, cache_name: &str) -> CacheFlushResponse {
        pipeline::execute(
            &self.channel,
            self.deadline,
            validate::cache_name(cache_name),
            |()| {
                let request = proto::FlushCacheRequest {
                    cache_name: cache_name.to_string(),
                };
                (Request::FlushCache(request), Metadata::new())
            },
            |response| match response {
                Response::FlushCache => Ok(CacheFlushResponse::Success),
                other => Err(unexpected(&other)),
            },
        )
        .await
    }

    /// Single page; the service returns every cache for an empty token.
    pub(crate) async fn list_caches(&self) -> CacheListResponse {
        pipeline::execute(
            &self.channel,
            self.deadline,
            Ok(()),
            |()| {
                let request = proto::ListCachesRequest {
                    next_token: String::new(),
                };
                (Request::ListCaches(request), Metadata::new())
            },
            |response| match response {
                Response::ListCaches(list) => Ok(CacheListResponse::Success(
                    list.caches
                        .into_iter()
                        .map(|c| CacheInfo::new(c.cache_name))
                        .collect(),
                )),
                other => Err(unexpected(&other)),
            },
        )
        .await
    }
}
