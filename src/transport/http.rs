use async_trait::async_trait;
use futures::TryStreamExt;
use reqwest::Proxy;
use std::env;
use std::time::Duration;
use tracing::debug;

use super::{Transport, TransportError};
use crate::config::env_u64;
use crate::http::{RequestContext, ResponseBody, ResponseContext};
use crate::{BoxStream, Error, ErrorContext, Result};

/// Default transport backed by a pooled `reqwest::Client`.
#[derive(Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Wrap an existing client (custom TLS, proxies, middleware-free test clients...).
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Build a client with production-friendly defaults, overridable via env.
    pub fn from_env() -> Result<Self> {
        let timeout_secs = env_u64("GENDEV_HTTP_TIMEOUT_SECS", "http_transport")?.unwrap_or(30);
        let pool_max_idle = env_u64("GENDEV_HTTP_POOL_MAX_IDLE_PER_HOST", "http_transport")?.unwrap_or(32);
        let pool_idle_timeout = env_u64("GENDEV_HTTP_POOL_IDLE_TIMEOUT_SECS", "http_transport")?.unwrap_or(90);

        let mut builder = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .pool_max_idle_per_host(pool_max_idle as usize)
            .pool_idle_timeout(Some(Duration::from_secs(pool_idle_timeout)));

        if let Ok(proxy_url) = env::var("GENDEV_PROXY_URL") {
            let proxy = Proxy::all(&proxy_url).map_err(|e| {
                Error::configuration_with_context(
                    format!("invalid proxy url: {}", e),
                    ErrorContext::new()
                        .with_field_path("env.GENDEV_PROXY_URL")
                        .with_source("http_transport"),
                )
            })?;
            builder = builder.proxy(proxy);
        }

        let client = builder
            .build()
            .map_err(|e| Error::Transport(TransportError::Other(e.to_string())))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, mut request: RequestContext) -> std::result::Result<ResponseContext, TransportError> {
        let url = request
            .target_url()
            .map_err(|e| TransportError::InvalidRequest(e.to_string()))?;
        debug!(method = %request.method(), url = %url, "sending request");

        let mut builder = self
            .client
            .request(request.method().clone(), url)
            .headers(request.headers().clone());
        if let Some(body) = request.take_body() {
            builder = builder.body(body);
        }

        let resp = builder.send().await?;
        let status = resp.status().as_u16();
        let headers = resp.headers().clone();

        // body stays on the wire until someone reads it
        let stream: BoxStream<'static, bytes::Bytes> = Box::pin(
            resp.bytes_stream()
                .map_err(|e| Error::Transport(TransportError::Http(e))),
        );
        Ok(ResponseContext::new(status, headers, ResponseBody::Streaming(stream)))
    }
}
