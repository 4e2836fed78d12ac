//! Transport abstraction.
//!
//! The SDK does not open sockets or encode messages. A [`Connector`] builds
//! one [`Transport`] per plane when the client is constructed, and every call
//! goes through [`Transport::unary`] with a typed request, call metadata and
//! a deadline.
//!
//! [`Channel`] wraps a connected transport and attaches the per-channel
//! headers: `authorization` on every call, `agent` and `runtime-version` on
//! the first.

use std::fmt;
use std::future::Future;
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use crate::config::TransportConfig;
use crate::metadata::{self, Metadata};
use crate::proto::{Request, Response};
use crate::status::{Code, Status};

/// Which service endpoint a channel talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Plane {
    /// Administrative calls: create, delete, list, flush.
    Control,
    /// Item-level reads and writes.
    Data,
}

impl fmt::Display for Plane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Plane::Control => f.write_str("control"),
            Plane::Data => f.write_str("data"),
        }
    }
}

/// Supplies the SDK identification headers. Consulted once per channel.
pub trait PlatformInfo: Send + Sync {
    fn sdk_agent(&self) -> String;
    fn runtime_version(&self) -> String;
}

/// Reports the crate version and the compile target.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultPlatformInfo;

impl PlatformInfo for DefaultPlatformInfo {
    fn sdk_agent(&self) -> String {
        format!("rust:{}", env!("CARGO_PKG_VERSION"))
    }

    fn runtime_version(&self) -> String {
        format!(
            "{}-{}",
            std::env::consts::OS,
            std::env::consts::ARCH
        )
    }
}

/// Everything a [`Connector`] needs to open one channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelConfig {
    pub plane: Plane,
    pub host: String,
    pub port: u16,
    pub secure: bool,
    pub transport: TransportConfig,
}

impl ChannelConfig {
    /// `host:port`.
    pub fn endpoint(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// One unary call as seen by the transport.
#[derive(Debug, Clone)]
pub struct UnaryCall {
    pub request: Request,
    pub metadata: Metadata,
    pub deadline: Duration,
}

impl UnaryCall {
    /// Operation name, e.g. `/cache_client.Scs/Get`.
    pub fn method(&self) -> String {
        self.request.method()
    }
}

/// A connected channel to one plane.
///
/// Implementations must be safe to call concurrently.
pub trait Transport: Send + Sync + 'static {
    /// Issue one call. A fault is returned as a [`Status`], never a panic.
    fn unary(&self, call: UnaryCall) -> impl Future<Output = Result<Response, Status>> + Send;

    /// Release sockets and background tasks. Called at most once per channel.
    fn close(&self);
}

/// Opens transports.
pub trait Connector {
    type Transport: Transport;

    fn connect(&self, config: &ChannelConfig) -> io::Result<Self::Transport>;
}

/// A transport plus the headers every call on it carries.
pub(crate) struct Channel<T> {
    plane: Plane,
    transport: T,
    auth_token: String,
    agent: String,
    runtime_version: String,
    agent_sent: AtomicBool,
    closed: AtomicBool,
}

impl<T: Transport> Channel<T> {
    pub(crate) fn open<C>(
        connector: &C,
        config: &ChannelConfig,
        auth_token: &str,
        platform: &dyn PlatformInfo,
    ) -> io::Result<Self>
    where
        C: Connector<Transport = T>,
    {
        let transport = connector.connect(config)?;
        tracing::info!(plane = %config.plane, endpoint = %config.endpoint(), secure = config.secure, "channel opened");
        Ok(Self {
            plane: config.plane,
            transport,
            auth_token: auth_token.to_string(),
            agent: platform.sdk_agent(),
            runtime_version: platform.runtime_version(),
            agent_sent: AtomicBool::new(false),
            closed: AtomicBool::new(false),
        })
    }

    pub(crate) async fn unary(
        &self,
        request: Request,
        mut metadata: Metadata,
        deadline: Duration,
    ) -> Result<Response, Status> {
        if self.closed.load(Ordering::Acquire) {
            return Err(Status::new(Code::Unavailable, "channel closed"));
        }
        if request.is_control() != (self.plane == Plane::Control) {
            return Err(Status::internal(format!(
                "{} sent on the {} channel",
                request.method(),
                self.plane
            )));
        }

        metadata.insert(metadata::AUTHORIZATION, self.auth_token.as_str());
        if !self.agent_sent.swap(true, Ordering::AcqRel) {
            metadata.insert(metadata::AGENT, self.agent.as_str());
            metadata.insert(metadata::RUNTIME_VERSION, self.runtime_version.as_str());
        }

        self.transport
            .unary(UnaryCall {
                request,
                metadata,
                deadline,
            })
            .await
    }

    /// Idempotent.
    pub(crate) fn close(&self) {
        if !self.closed.swap(true, Ordering::AcqRel) {
            self.transport.close();
            tracing::info!(plane = %self.plane, "channel closed");
        }
    }

    pub(crate) fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }
}

impl<T> fmt::Debug for Channel<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Channel")
            .field("plane", &self.plane)
            .field("closed", &self.closed.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}
