//! Per-operation request descriptions.
//!
//! An [`OperationRequest`] is what an API method produces before any I/O: the
//! resolved path, query and body plus the response rules used to classify the
//! answer. Turning it into a [`RequestContext`] needs only the configuration.

use bytes::Bytes;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::Serialize;

use crate::config::Configuration;
use crate::cursor::Cursor;
use crate::dispatch::ResponseRule;
use crate::http::{HttpMethod, RequestContext, ACCEPT_JSON};
use crate::serializer;
use crate::{Error, Result};

/// Everything except the RFC 3986 unreserved marks `encodeURIComponent` keeps.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

pub fn encode_path_segment(value: &str) -> String {
    utf8_percent_encode(value, PATH_SEGMENT).to_string()
}

/// Fail with a validation error when a required argument is missing.
pub fn require<'a, T: ?Sized>(
    api: &'static str,
    operation: &'static str,
    parameter: &'static str,
    value: Option<&'a T>,
) -> Result<&'a T> {
    value.ok_or(Error::Validation {
        api,
        operation,
        parameter,
    })
}

/// Like [`require`], but an empty cursor counts as missing too.
pub fn require_cursor<'a, K>(
    api: &'static str,
    operation: &'static str,
    parameter: &'static str,
    cursor: Option<&'a Cursor<K>>,
) -> Result<&'a Cursor<K>> {
    require(api, operation, parameter, cursor.filter(|c| !c.is_empty()))
}

#[derive(Debug, Clone)]
struct EncodedBody {
    content_type: &'static str,
    bytes: Bytes,
}

#[derive(Debug, Clone)]
pub struct OperationRequest {
    api: &'static str,
    operation: &'static str,
    method: HttpMethod,
    path: String,
    query: Vec<(String, String)>,
    body: Option<EncodedBody>,
    rules: &'static [ResponseRule],
}

impl OperationRequest {
    /// `path` may contain `{name}` placeholders filled by [`Self::path_param`].
    pub fn new(
        api: &'static str,
        operation: &'static str,
        method: HttpMethod,
        path: impl Into<String>,
        rules: &'static [ResponseRule],
    ) -> Self {
        Self {
            api,
            operation,
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
            rules,
        }
    }

    pub fn path_param(mut self, name: &str, value: &str) -> Self {
        self.path = self
            .path
            .replace(&format!("{{{}}}", name), &encode_path_segment(value));
        self
    }

    pub fn query_param(mut self, name: &str, value: impl ToString) -> Self {
        self.query.push((name.to_string(), value.to_string()));
        self
    }

    /// Arrays are sent as one same-named parameter per element.
    pub fn query_params<I>(mut self, name: &str, values: I) -> Self
    where
        I: IntoIterator,
        I::Item: ToString,
    {
        for value in values {
            self.query.push((name.to_string(), value.to_string()));
        }
        self
    }

    /// Serialize `body` using the preferred type out of `accepted`.
    pub fn body<T: Serialize + ?Sized>(mut self, accepted: &[&str], body: &T) -> Result<Self> {
        let content_type = serializer::preferred_media_type(accepted)?;
        let bytes = serializer::stringify(body, content_type)?;
        self.body = Some(EncodedBody {
            content_type,
            bytes,
        });
        Ok(self)
    }

    pub fn api(&self) -> &'static str {
        self.api
    }

    pub fn operation(&self) -> &'static str {
        self.operation
    }

    pub fn method(&self) -> &HttpMethod {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn rules(&self) -> &'static [ResponseRule] {
        self.rules
    }

    /// Resolve against `config`: server URL, `Accept`, body and default auth.
    pub async fn into_request_context(self, config: &Configuration) -> Result<RequestContext> {
        let mut request = config
            .base_server()
            .make_request_context(&self.path, self.method);
        request.set_header("Accept", ACCEPT_JSON)?;
        for (name, value) in self.query {
            request.append_query_param(name, value);
        }
        if let Some(body) = self.body {
            request.set_header("Content-Type", body.content_type)?;
            request.set_body(body.bytes);
        }
        if let Some(auth) = config.auth_methods().default_method() {
            auth.apply(&mut request).await?;
        }
        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{BearerAuth, DEFAULT_AUTH_METHOD};
    use crate::cursor::QueryCursor;
    use crate::dispatch::ResponseRule;
    use crate::transport::MockTransport;

    const RULES: &[ResponseRule] = &[ResponseRule::payload(200)];

    #[test]
    fn encodes_like_encode_uri_component() {
        assert_eq!(encode_path_segment("a b/c?d"), "a%20b%2Fc%3Fd");
        assert_eq!(encode_path_segment("x-y_z.~!*'()"), "x-y_z.~!*'()");
        assert_eq!(encode_path_segment("ä"), "%C3%A4");
    }

    #[test]
    fn empty_cursor_is_missing() {
        let empty = QueryCursor::new("");
        let err = require_cursor("InternetProductsApi", "continueInternetProductsQuery", "cursor", Some(&empty))
            .unwrap_err();
        assert!(err.is_validation());
        assert!(require_cursor::<crate::cursor::Continuation>("A", "b", "cursor", None).is_err());
    }

    #[tokio::test]
    async fn builds_request_with_accept_body_and_auth() {
        let config = Configuration::builder()
            .transport(MockTransport::new())
            .auth_method(DEFAULT_AUTH_METHOD, BearerAuth::new("t0k"))
            .build()
            .unwrap();
        let request = OperationRequest::new("Api", "op", HttpMethod::POST, "/share/{cursor}", RULES)
            .path_param("cursor", "a/b")
            .query_params("providers", ["x", "y"])
            .body(&["application/json"], &serde_json::json!({"k": 1}))
            .unwrap()
            .into_request_context(&config)
            .await
            .unwrap();

        assert_eq!(
            request.target_url().unwrap().as_str(),
            "http://localhost:8080/api/share/a%2Fb?providers=x&providers=y"
        );
        assert_eq!(request.header("accept"), Some(ACCEPT_JSON));
        assert_eq!(request.header("content-type"), Some("application/json"));
        assert_eq!(request.header("authorization"), Some("Bearer t0k"));
        assert_eq!(request.body().map(|b| &b[..]), Some(&br#"{"k":1}"#[..]));
    }
}
