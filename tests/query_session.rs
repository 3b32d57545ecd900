//! The cursor protocol driven through `ProductsQuerySession`.

mod common;

use gendev_api_client::transport::{MockResponse, MockTransport};
use gendev_api_client::{
    Error, PollOutcome, PollPolicy, QueryCursor, QueryState, ShareCursor,
};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

fn fast_policy() -> PollPolicy {
    PollPolicy::default()
        .with_initial_delay(Duration::from_millis(1))
        .with_max_delay(Duration::from_millis(2))
}

fn initiated(transport: &MockTransport) {
    transport.push(MockResponse::json(200, &json!({"version": "v7", "nextCursor": "c0"})));
}

#[tokio::test]
async fn round_trip_preserves_address_and_version() {
    let transport = Arc::new(MockTransport::new());
    initiated(&transport);
    transport.push(MockResponse::status(202).with_header("Retry-After", "3"));
    transport.push(MockResponse::json(
        200,
        &json!({"products": [common::product("p1")], "nextCursor": "c1"}),
    ));
    transport.push(MockResponse::json(
        200,
        &json!({"products": [common::product("p2")], "nextCursor": ""}),
    ));
    transport.push(MockResponse::status(200));
    transport.push(MockResponse::json(
        200,
        &json!({
            "products": [common::product("p1"), common::product("p2")],
            "version": "v7",
            "address": common::address(),
        }),
    ));

    let api = common::client_with(transport.clone()).internet_products();
    let mut session = api
        .query(common::address())
        .with_providers(vec!["ByteMe".into(), "WebWunder".into()]);

    let products = session.run_to_completion(&fast_policy()).await.unwrap();
    let ids: Vec<_> = products.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, ["p1", "p2"]);
    assert_eq!(session.state(), &QueryState::Completed);
    assert_eq!(session.version(), Some("v7"));

    let share = session.share().await.unwrap();
    assert_eq!(share, ShareCursor::new("c0"));
    let shared = session.fetch_shared().await.unwrap();
    assert_eq!(shared.version, "v7");
    assert_eq!(&shared.address, session.address());
    assert_eq!(shared.products.len(), 2);

    let requests = transport.requests();
    assert_eq!(requests.len(), 6);
    assert_eq!(requests[0].path(), "/api/internet-products");
    assert_eq!(requests[0].query_values("providers"), ["ByteMe", "WebWunder"]);
    assert_eq!(requests[0].header("content-type"), Some("application/json"));
    let sent: serde_json::Value =
        serde_json::from_slice(requests[0].body.as_ref().unwrap()).unwrap();
    assert_eq!(sent["postalCode"], "10115");

    let continued: Vec<_> = requests[1..4]
        .iter()
        .map(|r| r.query_values("cursor").join(","))
        .collect();
    assert_eq!(continued, ["c0", "c0", "c1"]);
    assert_eq!(requests[4].path(), "/api/internet-products/share/c0");
    assert_eq!(requests[5].path(), "/api/internet-products/share/c0");
    assert_eq!(requests[5].method, gendev_api_client::http::HttpMethod::GET);
}

#[tokio::test]
async fn poll_reports_pending_with_retry_after() {
    let transport = Arc::new(MockTransport::new());
    initiated(&transport);
    transport.push(MockResponse::status(202).with_header("Retry-After", "3"));

    let api = common::client_with(transport.clone()).internet_products();
    let mut session = api.query(common::address());
    session.initiate().await.unwrap();
    assert_eq!(
        session.state(),
        &QueryState::Initiated {
            cursor: QueryCursor::new("c0")
        }
    );

    let outcome = session.poll().await.unwrap();
    assert_eq!(
        outcome,
        PollOutcome::Pending {
            retry_after: Some(Duration::from_secs(3))
        }
    );
    assert!(matches!(session.state(), QueryState::Initiated { .. }));
}

#[tokio::test]
async fn continue_after_completion_is_refused_locally() {
    let transport = Arc::new(MockTransport::new());
    initiated(&transport);
    transport.push(MockResponse::json(200, &json!({"products": []})));

    let api = common::client_with(transport.clone()).internet_products();
    let mut session = api.query(common::address());
    session.initiate().await.unwrap();
    assert_eq!(session.poll().await.unwrap(), PollOutcome::Completed { received: 0 });

    let err = session.poll().await.unwrap_err();
    assert!(matches!(err, Error::InvalidState { operation: "continue", .. }));
    assert_eq!(transport.call_count(), 2);
}

#[tokio::test]
async fn error_statuses_move_to_failure_states() {
    for (status, expected) in [
        (400, QueryState::InvalidCursor),
        (404, QueryState::NotFound),
        (500, QueryState::ServerError),
    ] {
        let transport = Arc::new(MockTransport::new());
        initiated(&transport);
        transport.push(MockResponse::status(status));

        let api = common::client_with(transport).internet_products();
        let mut session = api.query(common::address());
        session.initiate().await.unwrap();
        assert!(session.poll().await.is_err());
        assert_eq!(session.state(), &expected);
        assert!(session.state().is_failed());
    }
}

#[tokio::test]
async fn transport_failure_keeps_state() {
    let transport = Arc::new(MockTransport::new());
    initiated(&transport);

    let api = common::client_with(transport).internet_products();
    let mut session = api.query(common::address());
    session.initiate().await.unwrap();

    // nothing queued: the mock transport fails the send
    let err = session.poll().await.unwrap_err();
    assert!(matches!(err, Error::Transport(_)));
    assert!(matches!(session.state(), QueryState::Initiated { .. }));
}

#[tokio::test]
async fn share_requires_completion() {
    let transport = Arc::new(MockTransport::new());
    initiated(&transport);

    let api = common::client_with(transport).internet_products();
    let mut session = api.query(common::address());
    assert!(matches!(
        session.share().await,
        Err(Error::InvalidState { operation: "share", .. })
    ));
    session.initiate().await.unwrap();
    assert!(session.share().await.is_err());
    assert!(session.fetch_shared().await.is_err());
}

#[tokio::test]
async fn polling_budget_is_enforced() {
    let transport = Arc::new(
        MockTransport::new().with_responder(|_| Some(MockResponse::status(202))),
    );
    initiated(&transport);

    let api = common::client_with(transport.clone()).internet_products();
    let mut session = api.query(common::address());
    let err = session
        .run_to_completion(&fast_policy().with_max_attempts(3))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::PollingExhausted { attempts: 3 }));
    assert_eq!(transport.call_count(), 4);
}

#[tokio::test]
async fn session_calls_honor_call_options() {
    let configured = Arc::new(MockTransport::new());
    let scoped = Arc::new(MockTransport::new());
    initiated(&scoped);

    let api = common::client_with(configured.clone()).internet_products();
    let options = gendev_api_client::CallOptions::new().transport(scoped.clone());
    let mut session = api.query(common::address()).with_options(options);
    session.initiate().await.unwrap();

    assert_eq!(configured.call_count(), 0);
    assert_eq!(scoped.call_count(), 1);
}

fn completed_in_one_page(transport: &MockTransport) {
    initiated(transport);
    transport.push(MockResponse::json(
        200,
        &json!({"products": [common::product("p1")]}),
    ));
}

#[tokio::test]
async fn completed_session_returns_collected_products() {
    let transport = Arc::new(MockTransport::new());
    completed_in_one_page(&transport);

    let api = common::client_with(transport.clone()).internet_products();
    let mut session = api.query(common::address());
    session.run_to_completion(&fast_policy()).await.unwrap();

    let again = session.run_to_completion(&fast_policy()).await.unwrap();
    assert_eq!(again.len(), 1);
    assert_eq!(again[0].id, "p1");
    assert_eq!(transport.call_count(), 2);
}

#[tokio::test]
async fn get_shared_failure_moves_session_to_failure_state() {
    let transport = Arc::new(MockTransport::new());
    completed_in_one_page(&transport);
    transport.push(MockResponse::status(200));
    transport.push(MockResponse::status(404));

    let api = common::client_with(transport).internet_products();
    let mut session = api.query(common::address());
    session.run_to_completion(&fast_policy()).await.unwrap();
    session.share().await.unwrap();

    let err = session.fetch_shared().await.unwrap_err();
    assert_eq!(err.status(), Some(404));
    assert_eq!(session.state(), &QueryState::NotFound);
}
