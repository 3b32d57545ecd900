use async_trait::async_trait;
use tracing::debug;

use super::Middleware;
use crate::http::{RequestContext, ResponseContext};
use crate::Result;

/// Logs each request target and response status at debug level.
pub struct TracingMiddleware {
    label: String,
}

impl TracingMiddleware {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }
}

impl Default for TracingMiddleware {
    fn default() -> Self {
        Self::new("http")
    }
}

#[async_trait]
impl Middleware for TracingMiddleware {
    fn name(&self) -> &str {
        "tracing"
    }

    async fn pre(&self, request: RequestContext) -> Result<RequestContext> {
        debug!(
            label = self.label.as_str(),
            method = %request.method(),
            url = request.url(),
            query_params = request.query_params().len(),
            has_body = request.body().is_some(),
            "outbound request"
        );
        Ok(request)
    }

    async fn post(&self, response: ResponseContext) -> Result<ResponseContext> {
        debug!(
            label = self.label.as_str(),
            http_status = response.status(),
            content_type = response.content_type().unwrap_or(""),
            "inbound response"
        );
        Ok(response)
    }
}
