//! Request execution pipeline.
//!
//! ```text
//! RequestContext → pre[0] → pre[1] → … → Transport → … → post[1] → post[0] → ResponseContext
//! ```
//!
//! Every step is awaited in sequence; the first failure aborts the call. There is
//! no retry and no timeout at this layer, those belong to the transport.

mod merge;

pub use merge::{merge_middleware, MergeStrategy};

use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

use crate::config::Configuration;
use crate::http::{RequestContext, ResponseContext};
use crate::middleware::SharedMiddleware;
use crate::transport::Transport;
use crate::Result;

/// A single-use execution chain for one call.
///
/// Owns its middleware list, so reversing it for the inbound phase can never
/// leak into the configuration it was derived from.
pub struct Pipeline {
    middleware: Vec<SharedMiddleware>,
    transport: Arc<dyn Transport>,
}

impl Pipeline {
    pub fn new(middleware: Vec<SharedMiddleware>, transport: Arc<dyn Transport>) -> Self {
        Self {
            middleware,
            transport,
        }
    }

    /// Copy the effective middleware and transport of `config`.
    pub fn from_configuration(config: &Configuration) -> Self {
        Self::new(config.middleware().to_vec(), config.transport().clone())
    }

    pub fn middleware(&self) -> &[SharedMiddleware] {
        &self.middleware
    }

    pub async fn execute(mut self, request: RequestContext) -> Result<ResponseContext> {
        let mut request = request;
        for mw in &self.middleware {
            debug!(middleware = mw.name(), phase = "pre", "running middleware");
            request = mw.pre(request).await?;
        }

        let start = Instant::now();
        let mut response = self.transport.send(request).await?;
        debug!(
            http_status = response.status(),
            transport_ms = start.elapsed().as_millis() as u64,
            "transport returned"
        );

        self.middleware.reverse();
        for mw in &self.middleware {
            debug!(middleware = mw.name(), phase = "post", "running middleware");
            response = mw.post(response).await?;
        }
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::HttpMethod;
    use crate::middleware::Middleware;
    use crate::transport::{MockResponse, MockTransport};
    use crate::Error;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct Recorder {
        name: &'static str,
        log: Arc<Mutex<Vec<String>>>,
    }

    #[async_trait]
    impl Middleware for Recorder {
        fn name(&self) -> &str {
            self.name
        }

        async fn pre(&self, request: RequestContext) -> Result<RequestContext> {
            self.log.lock().unwrap().push(format!("pre:{}", self.name));
            Ok(request)
        }

        async fn post(&self, response: ResponseContext) -> Result<ResponseContext> {
            self.log.lock().unwrap().push(format!("post:{}", self.name));
            Ok(response)
        }
    }

    struct Reject;

    #[async_trait]
    impl Middleware for Reject {
        fn name(&self) -> &str {
            "reject"
        }

        async fn pre(&self, _request: RequestContext) -> Result<RequestContext> {
            Err(Error::middleware("reject", "blocked"))
        }
    }

    fn request() -> RequestContext {
        RequestContext::new("http://localhost:8080/api/health", HttpMethod::GET)
    }

    #[tokio::test]
    async fn post_runs_in_reverse_of_pre() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let chain: Vec<SharedMiddleware> = ["a", "b", "c"]
            .into_iter()
            .map(|name| {
                Arc::new(Recorder {
                    name,
                    log: log.clone(),
                }) as SharedMiddleware
            })
            .collect();
        let transport = Arc::new(MockTransport::new());
        transport.push(MockResponse::status(200));

        let response = Pipeline::new(chain, transport).execute(request()).await.unwrap();
        assert_eq!(response.status(), 200);
        assert_eq!(
            *log.lock().unwrap(),
            ["pre:a", "pre:b", "pre:c", "post:c", "post:b", "post:a"]
        );
    }

    #[tokio::test]
    async fn failing_pre_skips_transport() {
        let transport = Arc::new(MockTransport::new());
        transport.push(MockResponse::status(200));

        let err = Pipeline::new(vec![Arc::new(Reject) as SharedMiddleware], transport.clone())
            .execute(request())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Middleware { .. }));
        assert_eq!(transport.call_count(), 0);
    }

    #[tokio::test]
    async fn transport_failure_is_propagated() {
        let transport = Arc::new(MockTransport::new());
        let err = Pipeline::new(Vec::new(), transport)
            .execute(request())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Transport(_)));
    }
}
