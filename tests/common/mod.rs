//! Shared fixtures for integration tests.
#![allow(dead_code)]

use gendev_api_client::transport::MockTransport;
use gendev_api_client::{Address, ApiClient, ConfigurationBuilder};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Install a test subscriber once; filter with `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn client_with(transport: Arc<MockTransport>) -> ApiClient {
    init_tracing();
    let config = ConfigurationBuilder::new()
        .transport_arc(transport)
        .build()
        .expect("mock configuration builds");
    ApiClient::new(config)
}

pub fn address() -> Address {
    Address::new("Hauptstraße", "12", "Berlin", "10115", "DE")
}

pub fn product(id: &str) -> Value {
    json!({
        "id": id,
        "provider": "ByteMe",
        "name": format!("{} Cable 250", id),
        "productInfo": {"speed": 250, "connectionType": "CABLE"},
        "pricing": {"monthlyCostInCent": 2999, "contractDurationInMonths": 24}
    })
}
