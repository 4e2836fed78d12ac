//! The public cache client.
//!
//! [`CacheClient`] owns one channel per plane, opened at construction. Clones
//! share the channels; they are closed by [`CacheClient::close`] or when the
//! last clone is dropped.

mod control;
mod data;

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;

use crate::config::Configuration;
use crate::credential::Credential;
use crate::error::ClientError;
use crate::response::{
    CacheCreateResponse, CacheDeleteResponse, CacheFlushResponse, CacheListResponse,
    DeleteResponse, GetResponse, ListConcatenateBackResponse, ListConcatenateFrontResponse,
    ListFetchResponse, ListLengthResponse, ListPopBackResponse, ListPopFrontResponse,
    ListPushBackResponse, ListPushFrontResponse, ListRemoveValueResponse, ListRetainResponse,
    SetResponse,
};
use crate::transport::{
    Channel, ChannelConfig, Connector, DefaultPlatformInfo, Plane, PlatformInfo, Transport,
};
use crate::ttl::CollectionTtl;
use crate::validate;

use control::ControlClient;
use data::DataClient;

/// Momento cache client.
///
/// Clone-able, Send + Sync. All clones share the same channels.
///
/// # Example
///
/// ```ignore
/// use std::time::Duration;
/// use momento_sdk::{CacheClient, Configuration, Credential};
///
/// let credential = Credential::from_env()?;
/// let client = CacheClient::connect(
///     &connector,
///     credential,
///     Configuration::laptop(),
///     Duration::from_secs(60),
/// )?;
///
/// client.set("cache", b"hello", "world", None).await;
/// if let GetResponse::Hit(value) = client.get("cache", b"hello").await {
///     assert_eq!(&value[..], b"world");
/// }
/// client.close();
/// ```
pub struct CacheClient<T: Transport> {
    inner: Arc<ClientInner<T>>,
}

struct ClientInner<T: Transport> {
    control: ControlClient<T>,
    data: DataClient<T>,
}

impl<T: Transport> Drop for ClientInner<T> {
    fn drop(&mut self) {
        self.control.close();
        self.data.close();
    }
}

impl<T: Transport> Clone for CacheClient<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Transport> fmt::Debug for CacheClient<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheClient")
            .field("closed", &self.is_closed())
            .finish_non_exhaustive()
    }
}

impl<T: Transport> CacheClient<T> {
    /// Open control and data channels through `connector`.
    ///
    /// `default_ttl` applies to writes that do not specify one. Fails if the
    /// configuration is invalid or either channel cannot be opened.
    pub fn connect<C>(
        connector: &C,
        credential: Credential,
        configuration: Configuration,
        default_ttl: Duration,
    ) -> Result<Self, ClientError>
    where
        C: Connector<Transport = T>,
    {
        Self::connect_with_platform(
            connector,
            credential,
            configuration,
            default_ttl,
            &DefaultPlatformInfo,
        )
    }

    /// As [`CacheClient::connect`], with explicit identification headers.
    pub fn connect_with_platform<C>(
        connector: &C,
        credential: Credential,
        configuration: Configuration,
        default_ttl: Duration,
        platform: &dyn PlatformInfo,
    ) -> Result<Self, ClientError>
    where
        C: Connector<Transport = T>,
    {
        configuration.validate()?;
        validate::ttl_millis(default_ttl)?;
        let deadline = configuration.deadline();

        let open = |plane: Plane, host: &str| {
            let config = ChannelConfig {
                plane,
                host: host.to_string(),
                port: credential.port(),
                secure: credential.is_secure(),
                transport: configuration.transport.clone(),
            };
            Channel::open(connector, &config, credential.raw_key(), platform).map_err(|source| {
                ClientError::Connect {
                    plane,
                    endpoint: config.endpoint(),
                    source,
                }
            })
        };

        let control = open(Plane::Control, credential.control_endpoint())?;
        let data = match open(Plane::Data, credential.data_endpoint()) {
            Ok(data) => data,
            Err(e) => {
                control.close();
                return Err(e);
            }
        };

        Ok(Self {
            inner: Arc::new(ClientInner {
                control: ControlClient::new(control, deadline),
                data: DataClient::new(data, deadline, default_ttl),
            }),
        })
    }

    /// Close both channels. Idempotent; later calls fail with `ServerUnavailable`.
    pub fn close(&self) {
        self.inner.control.close();
        self.inner.data.close();
    }

    pub fn is_closed(&self) -> bool {
        self.inner.control.is_closed() && self.inner.data.is_closed()
    }

    // ------------------------------------------------------------------
    // Control plane
    // ------------------------------------------------------------------

    pub async fn create_cache(&self, cache_name: &str) -> CacheCreateResponse {
        self.inner.control.create_cache(cache_name).await
    }

    pub async fn delete_cache(&self, cache_name: &str) -> CacheDeleteResponse {
        self.inner.control.delete_cache(cache_name).await
    }

    /// Remove every item from a cache without deleting it.
    pub async fn flush_cache(&self, cache_name: &str) -> CacheFlushResponse {
        self.inner.control.flush_cache(cache_name).await
    }

    pub async fn list_caches(&self) -> CacheListResponse {
        self.inner.control.list_caches().await
    }

    // ------------------------------------------------------------------
    // Scalar items
    // ------------------------------------------------------------------

    pub async fn get(&self, cache_name: &str, key: impl AsRef<[u8]>) -> GetResponse {
        self.inner.data.get(cache_name, key.as_ref()).await
    }

    /// Store `value` under `key`. `ttl` defaults to the client's default TTL.
    pub async fn set(
        &self,
        cache_name: &str,
        key: impl AsRef<[u8]>,
        value: impl Into<Bytes>,
        ttl: Option<Duration>,
    ) -> SetResponse {
        self.inner
            .data
            .set(cache_name, key.as_ref(), value.into(), ttl)
            .await
    }

    pub async fn delete(&self, cache_name: &str, key: impl AsRef<[u8]>) -> DeleteResponse {
        self.inner.data.delete(cache_name, key.as_ref()).await
    }

    // ------------------------------------------------------------------
    // Lists
    // ------------------------------------------------------------------

    /// Append `values` to the back of a list, creating it if needed.
    ///
    /// With `truncate_front_to_size`, elements are dropped from the front
    /// until the list is at most that long.
    pub async fn list_concatenate_back<I>(
        &self,
        cache_name: &str,
        list_name: &str,
        values: I,
        truncate_front_to_size: Option<u32>,
        ttl: Option<CollectionTtl>,
    ) -> ListConcatenateBackResponse
    where
        I: IntoIterator,
        I::Item: Into<Bytes>,
    {
        let values = values.into_iter().map(Into::into).collect();
        self.inner
            .data
            .list_concatenate_back(cache_name, list_name, values, truncate_front_to_size, ttl)
            .await
    }

    /// Prepend `values` to the front of a list, creating it if needed.
    pub async fn list_concatenate_front<I>(
        &self,
        cache_name: &str,
        list_name: &str,
        values: I,
        truncate_back_to_size: Option<u32>,
        ttl: Option<CollectionTtl>,
    ) -> ListConcatenateFrontResponse
    where
        I: IntoIterator,
        I::Item: Into<Bytes>,
    {
        let values = values.into_iter().map(Into::into).collect();
        self.inner
            .data
            .list_concatenate_front(cache_name, list_name, values, truncate_back_to_size, ttl)
            .await
    }

    /// Fetch the half-open slice `[start_index, end_index)`. Negative
    /// indices count from the end; an absent bound is unbounded.
    pub async fn list_fetch(
        &self,
        cache_name: &str,
        list_name: &str,
        start_index: Option<i32>,
        end_index: Option<i32>,
    ) -> ListFetchResponse {
        self.inner
            .data
            .list_fetch(cache_name, list_name, start_index, end_index)
            .await
    }

    pub async fn list_length(&self, cache_name: &str, list_name: &str) -> ListLengthResponse {
        self.inner.data.list_length(cache_name, list_name).await
    }

    pub async fn list_push_back(
        &self,
        cache_name: &str,
        list_name: &str,
        value: impl Into<Bytes>,
        truncate_front_to_size: Option<u32>,
        ttl: Option<CollectionTtl>,
    ) -> ListPushBackResponse {
        self.inner
            .data
            .list_push_back(cache_name, list_name, value.into(), truncate_front_to_size, ttl)
            .await
    }

    pub async fn list_push_front(
        &self,
        cache_name: &str,
        list_name: &str,
        value: impl Into<Bytes>,
        truncate_back_to_size: Option<u32>,
        ttl: Option<CollectionTtl>,
    ) -> ListPushFrontResponse {
        self.inner
            .data
            .list_push_front(cache_name, list_name, value.into(), truncate_back_to_size, ttl)
            .await
    }

    pub async fn list_pop_back(&self, cache_name: &str, list_name: &str) -> ListPopBackResponse {
        self.inner.data.list_pop_back(cache_name, list_name).await
    }

    pub async fn list_pop_front(&self, cache_name: &str, list_name: &str) -> ListPopFrontResponse {
        self.inner.data.list_pop_front(cache_name, list_name).await
    }

    /// Remove every element equal to `value`.
    pub async fn list_remove_value(
        &self,
        cache_name: &str,
        list_name: &str,
        value: impl Into<Bytes>,
    ) -> ListRemoveValueResponse {
        self.inner
            .data
            .list_remove_value(cache_name, list_name, value.into())
            .await
    }

    /// Keep only `[start_index, end_index)`, dropping everything else.
    pub async fn list_retain(
        &self,
        cache_name: &str,
        list_name: &str,
        start_index: Option<i32>,
        end_index: Option<i32>,
        ttl: Option<CollectionTtl>,
    ) -> ListRetainResponse {
        self.inner
            .data
            .list_retain(cache_name, list_name, start_index, end_index, ttl)
            .await
    }
}
