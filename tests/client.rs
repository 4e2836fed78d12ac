//! Client construction, channel headers, deadlines and shutdown.

mod common;

use std::time::Duration;

use bytes::Bytes;
use common::{DEFAULT_TTL, MockConnector, Reply, V2_KEY};
use momento_sdk::proto::{self, ECacheResult, Response};
use momento_sdk::{
    CacheClient, ClientError, Configuration, Credential, ErrorKind, MomentoResponse, Plane,
    PlatformInfo, metadata,
};

struct FixedPlatform;

impl PlatformInfo for FixedPlatform {
    fn sdk_agent(&self) -> String {
        "rust:9.9.9".to_string()
    }

    fn runtime_version(&self) -> String {
        "test-runtime".to_string()
    }
}

fn hit(body: &'static [u8]) -> Response {
    Response::Get(proto::GetResponse {
        result: ECacheResult::Hit,
        cache_body: Bytes::from_static(body),
        message: String::new(),
    })
}

#[test]
fn channels_target_credential_endpoints() {
    let connector = MockConnector::new();
    let _client = common::client(&connector);

    let configs = connector.configs.lock();
    assert_eq!(configs.len(), 2);
    assert_eq!(configs[0].plane, Plane::Control);
    assert_eq!(configs[0].endpoint(), "control.cell-1.example.com:443");
    assert_eq!(configs[1].plane, Plane::Data);
    assert_eq!(configs[1].endpoint(), "cache.cell-1.example.com:443");
    assert!(configs.iter().all(|c| c.secure));
    assert!(
        configs
            .iter()
            .all(|c| c.transport == Configuration::laptop().transport)
    );
}

#[test]
fn momento_local_is_plaintext() {
    let connector = MockConnector::new();
    let _client = CacheClient::connect(
        &connector,
        Credential::momento_local_default(),
        Configuration::laptop(),
        DEFAULT_TTL,
    )
    .unwrap();

    let configs = connector.configs.lock();
    assert!(configs.iter().all(|c| !c.secure));
    assert!(configs.iter().all(|c| c.endpoint() == "127.0.0.1:8080"));
}

#[test]
fn invalid_configuration_opens_nothing() {
    let connector = MockConnector::new();

    let zero_deadline = Configuration::laptop().with_deadline(Duration::ZERO);
    let err = CacheClient::connect(&connector, common::credential(), zero_deadline, DEFAULT_TTL)
        .unwrap_err();
    assert!(matches!(err, ClientError::InvalidConfiguration(_)));

    let err = CacheClient::connect(
        &connector,
        common::credential(),
        Configuration::laptop(),
        Duration::ZERO,
    )
    .unwrap_err();
    match err {
        ClientError::InvalidConfiguration(e) => {
            assert_eq!(e.message(), "Cache item TTL must be positive")
        }
        other => panic!("unexpected error: {other}"),
    }

    assert!(connector.configs.lock().is_empty());
}

#[test]
fn sub_millisecond_default_ttl_is_rejected() {
    let connector = MockConnector::new();

    let err = CacheClient::connect(
        &connector,
        common::credential(),
        Configuration::laptop(),
        Duration::from_micros(500),
    )
    .unwrap_err();
    match err {
        ClientError::InvalidConfiguration(e) => {
            assert_eq!(e.kind(), ErrorKind::InvalidArgument);
            assert_eq!(e.message(), "Cache item TTL must be positive");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(connector.configs.lock().is_empty());
}

#[test]
fn data_connect_failure_closes_control_channel() {
    let connector = MockConnector::refusing(Plane::Data);

    let err = CacheClient::connect(
        &connector,
        common::credential(),
        Configuration::laptop(),
        DEFAULT_TTL,
    )
    .unwrap_err();
    match &err {
        ClientError::Connect {
            plane, endpoint, ..
        } => {
            assert_eq!(*plane, Plane::Data);
            assert_eq!(endpoint, "cache.cell-1.example.com:443");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(std::error::Error::source(&err).is_some());
    assert_eq!(connector.control.close_count(), 1);
}

#[tokio::test]
async fn identification_headers_sent_once_per_channel() {
    let connector = MockConnector::new();
    let client = CacheClient::connect_with_platform(
        &connector,
        common::credential(),
        Configuration::laptop(),
        DEFAULT_TTL,
        &FixedPlatform,
    )
    .unwrap();
    connector.data.respond(hit(b"1"));
    connector.data.respond(hit(b"2"));
    connector.control.respond(Response::FlushCache);

    client.get("cache", "a").await.into_result().unwrap();
    client.get("cache", "b").await.into_result().unwrap();
    client.flush_cache("cache").await.into_result().unwrap();

    let calls = connector.data.calls();
    assert_eq!(calls[0].metadata.get(metadata::AGENT), Some("rust:9.9.9"));
    assert_eq!(
        calls[0].metadata.get(metadata::RUNTIME_VERSION),
        Some("test-runtime")
    );
    assert!(!calls[1].metadata.contains_key(metadata::AGENT));
    assert!(!calls[1].metadata.contains_key(metadata::RUNTIME_VERSION));
    for call in &calls {
        assert_eq!(call.metadata.get(metadata::AUTHORIZATION), Some(V2_KEY));
    }

    let control = connector.control.last_call();
    assert_eq!(control.metadata.get(metadata::AGENT), Some("rust:9.9.9"));
    assert_eq!(control.metadata.get(metadata::AUTHORIZATION), Some(V2_KEY));
}

#[tokio::test]
async fn deadline_maps_to_timeout_error() {
    let connector = MockConnector::new();
    let client = CacheClient::connect(
        &connector,
        common::credential(),
        Configuration::laptop().with_deadline(Duration::from_millis(50)),
        DEFAULT_TTL,
    )
    .unwrap();
    connector.data.reply(Reply::Hang);

    let response = client.get("cache", "slow").await;
    let error = response.error().expect("error variant");
    assert_eq!(error.kind(), ErrorKind::TimeoutError);
    assert_eq!(error.error_code(), "TIMEOUT_ERROR");

    let call = connector.data.last_call();
    assert_eq!(call.deadline, Duration::from_millis(50));
}

#[tokio::test]
async fn close_is_idempotent_and_fails_later_calls() {
    let connector = MockConnector::new();
    let client = common::client(&connector);
    assert!(!client.is_closed());

    client.close();
    client.close();
    assert!(client.is_closed());
    assert_eq!(connector.control.close_count(), 1);
    assert_eq!(connector.data.close_count(), 1);

    let response = client.get("cache", "key").await;
    assert_eq!(
        response.error().map(|e| e.kind()),
        Some(ErrorKind::ServerUnavailable)
    );
    assert_eq!(connector.data.call_count(), 0);

    drop(client);
    assert_eq!(connector.data.close_count(), 1);
}

#[test]
fn dropping_last_clone_closes_channels() {
    let connector = MockConnector::new();
    let client = common::client(&connector);
    let clone = client.clone();

    drop(client);
    assert_eq!(connector.data.close_count(), 0);
    assert!(!clone.is_closed());

    drop(clone);
    assert_eq!(connector.control.close_count(), 1);
    assert_eq!(connector.data.close_count(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn clones_share_channels_across_tasks() {
    let connector = MockConnector::new();
    let client = common::client(&connector);
    for _ in 0..16 {
        connector.data.respond(hit(b"v"));
    }

    let tasks: Vec<_> = (0..16)
        .map(|i| {
            let client = client.clone();
            tokio::spawn(async move { client.get("cache", format!("key-{i}")).await })
        })
        .collect();

    for task in tasks {
        let response = task.await.unwrap();
        assert!(response.is_hit());
    }

    let calls = connector.data.calls();
    assert_eq!(calls.len(), 16);
    let with_agent = calls
        .iter()
        .filter(|c| c.metadata.contains_key(metadata::AGENT))
        .count();
    assert_eq!(with_agent, 1);
}
