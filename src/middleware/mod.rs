//! Request/response interception.
//!
//! A middleware pairs an outbound transform (`pre`) with an inbound one (`post`).
//! In a pipeline, `pre` runs in list order before the transport call and `post`
//! runs in reverse list order after it, so the last-registered middleware sees
//! the raw response first.

mod headers;
mod logging;

pub use headers::DefaultHeaders;
pub use logging::TracingMiddleware;

use async_trait::async_trait;
use std::sync::Arc;

use crate::http::{RequestContext, ResponseContext};
use crate::Result;

#[async_trait]
pub trait Middleware: Send + Sync {
    fn name(&self) -> &str {
        "unnamed"
    }

    /// Transform the outbound request. May await I/O; an error aborts the call.
    async fn pre(&self, request: RequestContext) -> Result<RequestContext> {
        Ok(request)
    }

    /// Transform the inbound response. An error aborts the call.
    async fn post(&self, response: ResponseContext) -> Result<ResponseContext> {
        Ok(response)
    }
}

pub type SharedMiddleware = Arc<dyn Middleware>;
