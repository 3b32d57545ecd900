//! Pluggable "send a request, get a response" capability.

mod http;
pub mod mock;

pub use http::HttpTransport;
pub use mock::{MockResponse, MockTransport, RecordedRequest};

use async_trait::async_trait;

use crate::http::{RequestContext, ResponseContext};

/// Sends one request. Timeouts and cancellation are the transport's business;
/// whatever it fails with is propagated to the caller unchanged.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: RequestContext) -> Result<ResponseContext, TransportError>;
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Transport error: {0}")]
    Other(String),
}
