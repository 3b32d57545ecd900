//! Single-shot and stream-of-one execution of the same call.

mod common;

use gendev_api_client::transport::{MockResponse, MockTransport};
use serde_json::json;
use std::sync::Arc;
use tokio_stream::StreamExt;

fn health_transport() -> Arc<MockTransport> {
    Arc::new(
        MockTransport::new()
            .with_responder(|_| Some(MockResponse::json(200, &json!({"status": "ok"})))),
    )
}

#[test]
fn stream_starts_only_when_polled() {
    let transport = health_transport();
    let health = common::client_with(transport.clone()).health();

    let stream = health.health_check(None).into_stream();
    assert_eq!(transport.call_count(), 0);

    let items: Vec<_> = tokio_test::block_on(stream.collect::<Vec<_>>());
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].as_ref().unwrap().status, "ok");
    assert_eq!(transport.call_count(), 1);
}

#[test]
fn dropped_call_sends_nothing() {
    let transport = health_transport();
    let health = common::client_with(transport.clone()).health();

    drop(health.health_check(None));
    drop(health.health_check(None).into_stream());
    assert_eq!(transport.call_count(), 0);
}

#[tokio::test]
async fn each_call_is_one_request() {
    let transport = health_transport();
    let health = common::client_with(transport.clone()).health();

    let first = health.health_check_with_http_info(None).await.unwrap();
    assert_eq!(first.status, 200);
    let mut stream = health.health_check(None).into_stream();
    assert!(stream.next().await.unwrap().is_ok());
    assert!(stream.next().await.is_none());

    assert_eq!(transport.call_count(), 2);
}
