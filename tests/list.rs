//! List operations against a scripted transport.

mod common;

use std::time::Duration;

use bytes::Bytes;
use common::{DEFAULT_TTL, MockConnector};
use momento_sdk::proto::{self, ListLengthChanged, Request, Response};
use momento_sdk::{
    CollectionTtl, ErrorKind, ListFetchResponse, ListLengthResponse, ListPopBackResponse,
    ListPopFrontResponse, ListRemoveValueResponse, ListRetainResponse, MomentoResponse, metadata,
};

fn length(list_length: u32) -> ListLengthChanged {
    ListLengthChanged { list_length }
}

#[tokio::test]
async fn push_back_absent_ttl_uses_client_default() {
    let connector = MockConnector::new();
    let client = common::client(&connector);
    connector.data.respond(Response::ListPushBack(length(3)));

    let response = client.list_push_back("cache", "queue", "job", None, None).await;
    assert_eq!(response.list_length(), Some(3));

    let call = connector.data.last_call();
    assert_eq!(call.method(), "/cache_client.Scs/ListPushBack");
    assert_eq!(call.metadata.get(metadata::CACHE), Some("cache"));
    match call.request {
        Request::ListPushBack(request) => {
            assert_eq!(&request.list_name[..], b"queue");
            assert_eq!(&request.value[..], b"job");
            assert_eq!(request.truncate_front_to_size, 0);
            assert_eq!(request.ttl_milliseconds, DEFAULT_TTL.as_millis() as u64);
            assert!(request.refresh_ttl);
        }
        other => panic!("unexpected request: {other:?}"),
    }
}

#[tokio::test]
async fn push_front_cache_ttl_without_refresh() {
    let connector = MockConnector::new();
    let client = common::client(&connector);
    connector.data.respond(Response::ListPushFront(length(1)));

    let ttl = CollectionTtl::from_cache_ttl().with_no_refresh_ttl_on_updates();
    let response = client
        .list_push_front("cache", "queue", "job", Some(10), Some(ttl))
        .await;
    assert_eq!(response.list_length(), Some(1));

    match connector.data.last_call().request {
        Request::ListPushFront(request) => {
            assert_eq!(request.truncate_back_to_size, 10);
            assert_eq!(request.ttl_milliseconds, DEFAULT_TTL.as_millis() as u64);
            assert!(!request.refresh_ttl);
        }
        other => panic!("unexpected request: {other:?}"),
    }
}

#[tokio::test]
async fn concatenate_back_explicit_ttl() {
    let connector = MockConnector::new();
    let client = common::client(&connector);
    connector
        .data
        .respond(Response::ListConcatenateBack(length(5)));

    let response = client
        .list_concatenate_back(
            "cache",
            "list",
            ["a", "b", "c"],
            Some(5),
            Some(CollectionTtl::of(Duration::from_secs(10))),
        )
        .await;
    assert_eq!(response.list_length(), Some(5));

    match connector.data.last_call().request {
        Request::ListConcatenateBack(request) => {
            let values: Vec<&[u8]> = request.values.iter().map(|v| &v[..]).collect();
            assert_eq!(values, [&b"a"[..], &b"b"[..], &b"c"[..]]);
            assert_eq!(request.truncate_front_to_size, 5);
            assert_eq!(request.ttl_milliseconds, 10_000);
        }
        other => panic!("unexpected request: {other:?}"),
    }
}

#[tokio::test]
async fn concatenate_front_accepts_owned_bytes() {
    let connector = MockConnector::new();
    let client = common::client(&connector);
    connector
        .data
        .respond(Response::ListConcatenateFront(length(2)));

    let values = vec![Bytes::from_static(b"x"), Bytes::from(vec![0xff, 0x00])];
    let response = client
        .list_concatenate_front("cache", "list", values, None, None)
        .await;
    assert_eq!(response.list_length(), Some(2));
}

#[tokio::test]
async fn write_validation_order() {
    let connector = MockConnector::new();
    let client = common::client(&connector);

    let response = client.list_push_back("", "", "v", Some(0), None).await;
    assert_eq!(
        response.error().map(|e| e.message()),
        Some("Non-empty cache name is required")
    );

    let response = client.list_push_back("cache", " ", "v", Some(0), None).await;
    assert_eq!(
        response.error().map(|e| e.message()),
        Some("Non-empty list name is required")
    );

    let response = client.list_push_back("cache", "list", "v", Some(0), None).await;
    assert_eq!(
        response.error().map(|e| e.message()),
        Some("Truncate to size must be positive")
    );

    let zero = CollectionTtl::of(Duration::ZERO);
    let response = client
        .list_concatenate_front("cache", "list", ["v"], None, Some(zero))
        .await;
    assert_eq!(
        response.error().map(|e| e.message()),
        Some("Cache item TTL must be positive")
    );

    for ttl in [Duration::from_nanos(1), Duration::from_micros(500)] {
        let response = client
            .list_push_back("cache", "list", "v", None, Some(CollectionTtl::of(ttl)))
            .await;
        let error = response.error().expect("error variant");
        assert_eq!(error.kind(), ErrorKind::InvalidArgument);
        assert_eq!(error.message(), "Cache item TTL must be positive");
    }

    assert_eq!(connector.data.call_count(), 0);
}

#[tokio::test]
async fn fetch_hit_and_miss() {
    let connector = MockConnector::new();
    let client = common::client(&connector);
    connector
        .data
        .respond(Response::ListFetch(proto::ListFetchResponse::Found {
            values: vec![Bytes::from_static(b"one"), Bytes::from_static(b"two")],
        }));
    connector
        .data
        .respond(Response::ListFetch(proto::ListFetchResponse::Missing));

    let response = client.list_fetch("cache", "list", Some(0), Some(-1)).await;
    assert_eq!(
        response.values_string(),
        Some(vec!["one".to_string(), "two".to_string()])
    );
    match connector.data.last_call().request {
        Request::ListFetch(request) => {
            assert_eq!(request.start_index, Some(0));
            assert_eq!(request.end_index, Some(-1));
        }
        other => panic!("unexpected request: {other:?}"),
    }

    let response = client.list_fetch("cache", "list", None, None).await;
    assert_eq!(response, ListFetchResponse::Miss);
}

#[tokio::test]
async fn fetch_inverted_range_is_rejected() {
    let connector = MockConnector::new();
    let client = common::client(&connector);

    for (start, end) in [(3, 2), (4, 4), (-1, -2)] {
        let response = client.list_fetch("cache", "list", Some(start), Some(end)).await;
        let error = response.error().expect("error variant");
        assert_eq!(error.kind(), ErrorKind::InvalidArgument);
        assert_eq!(error.message(), "End index must be greater than start index");
    }
    assert_eq!(connector.data.call_count(), 0);
}

#[tokio::test]
async fn length_hit_and_miss() {
    let connector = MockConnector::new();
    let client = common::client(&connector);
    connector
        .data
        .respond(Response::ListLength(proto::ListLengthResponse::Found {
            length: 7,
        }));
    connector
        .data
        .respond(Response::ListLength(proto::ListLengthResponse::Missing));

    assert_eq!(
        client.list_length("cache", "list").await,
        ListLengthResponse::Hit(7)
    );
    assert_eq!(
        client.list_length("cache", "list").await,
        ListLengthResponse::Miss
    );
}

#[tokio::test]
async fn pop_back_and_front() {
    let connector = MockConnector::new();
    let client = common::client(&connector);
    connector
        .data
        .respond(Response::ListPopBack(proto::ListPopResponse::Found {
            value: Bytes::from_static(b"last"),
        }));
    connector
        .data
        .respond(Response::ListPopFront(proto::ListPopResponse::Missing));

    let back = client.list_pop_back("cache", "list").await;
    assert_eq!(back, ListPopBackResponse::Hit(Bytes::from_static(b"last")));

    let front = client.list_pop_front("cache", "list").await;
    assert_eq!(front, ListPopFrontResponse::Miss);

    let methods: Vec<String> = connector.data.calls().iter().map(|c| c.method()).collect();
    assert_eq!(
        methods,
        ["/cache_client.Scs/ListPopBack", "/cache_client.Scs/ListPopFront"]
    );
}

#[tokio::test]
async fn pop_reply_for_wrong_end_is_internal_error() {
    let connector = MockConnector::new();
    let client = common::client(&connector);
    connector
        .data
        .respond(Response::ListPopFront(proto::ListPopResponse::Missing));

    let response = client.list_pop_back("cache", "list").await;
    assert_eq!(
        response.error().map(|e| e.kind()),
        Some(ErrorKind::InternalServerError)
    );
}

#[tokio::test]
async fn remove_value() {
    let connector = MockConnector::new();
    let client = common::client(&connector);
    connector.data.respond(Response::ListRemove);

    let response = client.list_remove_value("cache", "list", "stale").await;
    assert_eq!(response, ListRemoveValueResponse::Success);
    match connector.data.last_call().request {
        Request::ListRemove(request) => assert_eq!(&request.value[..], b"stale"),
        other => panic!("unexpected request: {other:?}"),
    }
}

#[tokio::test]
async fn retain_sends_resolved_ttl() {
    let connector = MockConnector::new();
    let client = common::client(&connector);
    connector.data.respond(Response::ListRetain);

    let response = client
        .list_retain("cache", "list", Some(1), Some(4), None)
        .await;
    assert_eq!(response, ListRetainResponse::Success);
    match connector.data.last_call().request {
        Request::ListRetain(request) => {
            assert_eq!(request.start_index, Some(1));
            assert_eq!(request.end_index, Some(4));
            assert_eq!(request.ttl_milliseconds, DEFAULT_TTL.as_millis() as u64);
            assert!(request.refresh_ttl);
        }
        other => panic!("unexpected request: {other:?}"),
    }
}

#[tokio::test]
async fn retain_inverted_range_is_not_dispatched() {
    let connector = MockConnector::new();
    let client = common::client(&connector);

    let response = client
        .list_retain("cache", "list", Some(3), Some(2), None)
        .await;
    assert_eq!(
        response.error().map(|e| e.kind()),
        Some(ErrorKind::InvalidArgument)
    );
    assert_eq!(connector.data.call_count(), 0);
}
