//! In-memory transport for tests and offline development.

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};

use super::{Transport, TransportError};
use crate::http::{HttpMethod, RequestContext, ResponseContext};

/// A canned response.
#[derive(Debug, Clone)]
pub struct MockResponse {
    pub status: u16,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl MockResponse {
    /// Response with an empty body.
    pub fn status(status: u16) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body: Bytes::new(),
        }
    }

    pub fn json(status: u16, body: &serde_json::Value) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Self {
            status,
            headers,
            body: Bytes::from(body.to_string()),
        }
    }

    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    /// Invalid names or values are ignored.
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        if let (Ok(n), Ok(v)) = (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(value),
        ) {
            self.headers.insert(n, v);
        }
        self
    }
}

/// What the transport saw.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: HttpMethod,
    /// Absolute target URL with query string, or the raw URL when it is relative.
    pub url: String,
    pub headers: HeaderMap,
    pub body: Option<Bytes>,
}

impl RecordedRequest {
    /// Path component of the target URL.
    pub fn path(&self) -> String {
        url::Url::parse(&self.url)
            .map(|u| u.path().to_string())
            .unwrap_or_else(|_| self.url.split('?').next().unwrap_or_default().to_string())
    }

    /// All values of a query parameter, in order.
    pub fn query_values(&self, name: &str) -> Vec<String> {
        url::Url::parse(&self.url)
            .map(|u| {
                u.query_pairs()
                    .filter(|(k, _)| k == name)
                    .map(|(_, v)| v.into_owned())
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

type Responder = Box<dyn Fn(&RecordedRequest) -> Option<MockResponse> + Send + Sync>;

/// Scripted transport: queued responses are served first, then the responder.
#[derive(Default)]
pub struct MockTransport {
    queue: Mutex<VecDeque<MockResponse>>,
    responder: Option<Responder>,
    requests: Mutex<Vec<RecordedRequest>>,
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer requests the queue does not cover; `None` fails the send.
    pub fn with_responder<F>(mut self, responder: F) -> Self
    where
        F: Fn(&RecordedRequest) -> Option<MockResponse> + Send + Sync + 'static,
    {
        self.responder = Some(Box::new(responder));
        self
    }

    pub fn push(&self, response: MockResponse) -> &Self {
        lock(&self.queue).push_back(response);
        self
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        lock(&self.requests).clone()
    }

    pub fn call_count(&self) -> usize {
        lock(&self.requests).len()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, mut request: RequestContext) -> Result<ResponseContext, TransportError> {
        let recorded = RecordedRequest {
            method: request.method().clone(),
            url: request
                .target_url()
                .map(|u| u.to_string())
                .unwrap_or_else(|_| request.url().to_string()),
            headers: request.headers().clone(),
            body: request.take_body(),
        };
        lock(&self.requests).push(recorded.clone());

        let scripted = lock(&self.queue).pop_front();
        let response = match scripted {
            Some(r) => r,
            None => self
                .responder
                .as_ref()
                .and_then(|f| f(&recorded))
                .ok_or_else(|| {
                    TransportError::Other(format!("no mock response for {} {}", recorded.method, recorded.url))
                })?,
        };
        Ok(ResponseContext::from_bytes(
            response.status,
            response.headers,
            response.body,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn serves_queue_then_responder_then_fails() {
        let transport = MockTransport::new()
            .with_responder(|req| (req.path() == "/api/health").then(|| MockResponse::status(204)));
        transport.push(MockResponse::status(201));

        let req = || RequestContext::new("http://localhost/api/health", HttpMethod::GET);
        assert_eq!(transport.send(req()).await.unwrap().status(), 201);
        assert_eq!(transport.send(req()).await.unwrap().status(), 204);

        let other = RequestContext::new("http://localhost/api/version", HttpMethod::GET);
        assert!(matches!(transport.send(other).await, Err(TransportError::Other(_))));
        assert_eq!(transport.call_count(), 3);
    }

    #[test]
    fn recorded_request_parses_repeated_query_values() {
        let rec = RecordedRequest {
            method: HttpMethod::POST,
            url: "http://h/api/internet-products?providers=a&providers=b".into(),
            headers: HeaderMap::new(),
            body: None,
        };
        assert_eq!(rec.path(), "/api/internet-products");
        assert_eq!(rec.query_values("providers"), vec!["a", "b"]);
    }
}
