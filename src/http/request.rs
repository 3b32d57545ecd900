use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use url::Url;

use super::HttpMethod;
use crate::{Error, ErrorContext, Result};

/// Outbound request owned by a single call.
#[derive(Debug, Clone)]
pub struct RequestContext {
    url: String,
    method: HttpMethod,
    headers: HeaderMap,
    query: Vec<(String, String)>,
    body: Option<Bytes>,
}

impl RequestContext {
    /// `url` is the resolved server URL with the endpoint path already appended.
    pub fn new(url: impl Into<String>, method: HttpMethod) -> Self {
        Self {
            url: url.into(),
            method,
            headers: HeaderMap::new(),
            query: Vec::new(),
            body: None,
        }
    }

    /// URL without query parameters.
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn set_url(&mut self, url: impl Into<String>) {
        self.url = url.into();
    }

    pub fn method(&self) -> &HttpMethod {
        &self.method
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    /// Set (replace) a header, validating name and value.
    pub fn set_header(&mut self, name: &str, value: &str) -> Result<()> {
        let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
            Error::configuration_with_context(
                format!("invalid header name: {}", e),
                ErrorContext::new()
                    .with_field_path(format!("request.headers.{}", name))
                    .with_source("request_context"),
            )
        })?;
        let header_value = HeaderValue::from_str(value).map_err(|e| {
            Error::configuration_with_context(
                format!("invalid header value: {}", e),
                ErrorContext::new()
                    .with_field_path(format!("request.headers.{}", name))
                    .with_source("request_context"),
            )
        })?;
        self.headers.insert(header_name, header_value);
        Ok(())
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Query parameters in insertion order; names may repeat.
    pub fn query_params(&self) -> &[(String, String)] {
        &self.query
    }

    /// Replace every value of `name` with a single `value`.
    pub fn set_query_param(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        self.query.retain(|(k, _)| *k != name);
        self.query.push((name, value.into()));
    }

    /// Add another value for `name`, keeping existing ones.
    pub fn append_query_param(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.query.push((name.into(), value.into()));
    }

    pub fn body(&self) -> Option<&Bytes> {
        self.body.as_ref()
    }

    pub fn set_body(&mut self, body: impl Into<Bytes>) {
        self.body = Some(body.into());
    }

    pub fn take_body(&mut self) -> Option<Bytes> {
        self.body.take()
    }

    /// Absolute target URL including the query string.
    ///
    /// Fails for relative server URLs; those are only meaningful behind a proxy
    /// that a transport must resolve itself.
    pub fn target_url(&self) -> Result<Url> {
        let mut url = Url::parse(&self.url).map_err(|e| {
            Error::configuration_with_context(
                format!("invalid request url '{}': {}", self.url, e),
                ErrorContext::new()
                    .with_field_path("request.url")
                    .with_source("request_context"),
            )
        })?;
        if !self.query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in &self.query {
                pairs.append_pair(k, v);
            }
        }
        Ok(url)
    }
}
