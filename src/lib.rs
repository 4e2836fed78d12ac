//! momento-sdk - Client SDK for the Momento serverless cache.
//!
//! This crate resolves credentials from API keys, validates arguments before
//! anything is sent, and turns every outcome into a typed per-operation
//! result. Wire encoding and sockets belong to a pluggable [`Transport`], so
//! the same client runs over gRPC, a test double, or anything else that can
//! carry the [`proto`] messages.
//!
//! # Features
//!
//! - API key decoding (v2, legacy JWT and v1 envelope formats)
//! - Get, Set, Delete on scalar items
//! - List push, pop, concatenate, fetch, length, remove and retain
//! - Create, delete, flush and list caches
//! - Closed error taxonomy with stable error codes
//!
//! # Example
//!
//! ```ignore
//! use std::time::Duration;
//! use momento_sdk::{CacheClient, CollectionTtl, Configuration, Credential, MomentoResponse};
//!
//! let credential = Credential::from_env()?;
//! let client = CacheClient::connect(
//!     &my_grpc_connector,
//!     credential,
//!     Configuration::laptop(),
//!     Duration::from_secs(60),
//! )?;
//!
//! client
//!     .list_push_back("cache", "queue", "job-1", None, Some(CollectionTtl::from_cache_ttl()))
//!     .await
//!     .into_result()?;
//! ```

mod client;
pub mod config;
pub mod credential;
pub mod error;
pub mod logging;
pub mod metadata;
mod pipeline;
pub mod proto;
pub mod response;
pub mod status;
pub mod transport;
pub mod ttl;
pub mod validate;

pub use client::CacheClient;
pub use config::{ConfigError, Configuration, LogFormat, LoggingConfig, TransportConfig};
pub use credential::{Credential, HostOverrides};
pub use error::{ClientError, ErrorKind, LimitExceededCause, MomentoError, Result};
pub use metadata::Metadata;
pub use response::{
    CacheCreateResponse, CacheDeleteResponse, CacheFlushResponse, CacheInfo, CacheListResponse,
    DeleteResponse, GetResponse, ListConcatenateBackResponse, ListConcatenateFrontResponse,
    ListFetchResponse, ListLengthResponse, ListPopBackResponse, ListPopFrontResponse,
    ListPushBackResponse, ListPushFrontResponse, ListRemoveValueResponse, ListRetainResponse,
    MomentoResponse, SetResponse,
};
pub use status::{Code, Status};
pub use transport::{ChannelConfig, Connector, Plane, PlatformInfo, Transport, UnaryCall};
pub use ttl::CollectionTtl;
