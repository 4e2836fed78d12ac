//! Scripted in-memory transport for integration tests.
//!
//! Each plane gets its own [`Recorder`]. Tests queue replies on it, run client
//! calls, then inspect what was dispatched.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::future::Future;
use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use momento_sdk::proto::Response;
use momento_sdk::{
    CacheClient, ChannelConfig, Configuration, Connector, Credential, Plane, Status, Transport,
    UnaryCall,
};
use parking_lot::Mutex;

/// A V2 key carrying `{"t":"g"}` claims.
pub const V2_KEY: &str = "eyJhbGciOiJIUzUxMiIsInR5cCI6IkpXVCJ9.eyJ0IjoiZyJ9.LloWc3qLRkBm_djlOjXE8wNSENqOay17xHLJR5XIr0cwkyhhh8w_oBaiQDktBkOvh-wKLQGUKavSQuOwXEb2_g";

pub const DEFAULT_TTL: Duration = Duration::from_secs(60);

/// What the next call on a plane returns.
pub enum Reply {
    Ok(Response),
    Fault(Status),
    /// Never completes; the client's deadline has to fire.
    Hang,
}

#[derive(Default)]
pub struct Recorder {
    calls: Mutex<Vec<UnaryCall>>,
    replies: Mutex<VecDeque<Reply>>,
    closes: AtomicUsize,
}

impl Recorder {
    pub fn reply(&self, reply: Reply) {
        self.replies.lock().push_back(reply);
    }

    pub fn respond(&self, response: Response) {
        self.reply(Reply::Ok(response));
    }

    pub fn fail(&self, status: Status) {
        self.reply(Reply::Fault(status));
    }

    pub fn calls(&self) -> Vec<UnaryCall> {
        self.calls.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    pub fn last_call(&self) -> UnaryCall {
        self.calls
            .lock()
            .last()
            .cloned()
            .expect("no call was dispatched")
    }

    pub fn close_count(&self) -> usize {
        self.closes.load(Ordering::SeqCst)
    }
}

pub struct MockTransport {
    recorder: Arc<Recorder>,
}

impl Transport for MockTransport {
    fn unary(&self, call: UnaryCall) -> impl Future<Output = Result<Response, Status>> + Send {
        self.recorder.calls.lock().push(call);
        let reply = self.recorder.replies.lock().pop_front();
        async move {
            match reply {
                Some(Reply::Ok(response)) => Ok(response),
                Some(Reply::Fault(status)) => Err(status),
                Some(Reply::Hang) => std::future::pending().await,
                None => Err(Status::internal("no scripted reply")),
            }
        }
    }

    fn close(&self) {
        self.recorder.closes.fetch_add(1, Ordering::SeqCst);
    }
}

/// Hands out one [`MockTransport`] per plane.
#[derive(Default)]
pub struct MockConnector {
    pub control: Arc<Recorder>,
    pub data: Arc<Recorder>,
    pub configs: Mutex<Vec<ChannelConfig>>,
    /// Refuse to open this plane.
    pub refuse: Option<Plane>,
}

impl MockConnector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn refusing(plane: Plane) -> Self {
        Self {
            refuse: Some(plane),
            ..Self::default()
        }
    }
}

impl Connector for MockConnector {
    type Transport = MockTransport;

    fn connect(&self, config: &ChannelConfig) -> io::Result<MockTransport> {
        if self.refuse == Some(config.plane) {
            return Err(io::Error::new(
                io::ErrorKind::ConnectionRefused,
                "connection refused",
            ));
        }
        self.configs.lock().push(config.clone());
        let recorder = match config.plane {
            Plane::Control => Arc::clone(&self.control),
            Plane::Data => Arc::clone(&self.data),
        };
        Ok(MockTransport { recorder })
    }
}

pub fn credential() -> Credential {
    Credential::from_api_key_v2(V2_KEY, "cell-1.example.com").unwrap()
}

/// A connected client with the laptop preset and a 60s default TTL.
pub fn client(connector: &MockConnector) -> CacheClient<MockTransport> {
    CacheClient::connect(
        connector,
        credential(),
        Configuration::laptop(),
        DEFAULT_TTL,
    )
    .unwrap()
}
