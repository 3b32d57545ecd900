use bytes::{Bytes, BytesMut};
use futures::StreamExt;
use reqwest::header::{HeaderMap, CONTENT_TYPE};

use crate::{BoxStream, Result};

/// Response body, either fully buffered or still streaming from the wire.
pub enum ResponseBody {
    Buffered(Bytes),
    Streaming(BoxStream<'static, Bytes>),
}

impl std::fmt::Debug for ResponseBody {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResponseBody::Buffered(bytes) => {
                f.debug_tuple("ResponseBody::Buffered").field(&bytes.len()).finish()
            }
            ResponseBody::Streaming(_) => write!(f, "ResponseBody::Streaming(..)"),
        }
    }
}

/// Body content decoded without knowing the target type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawBody {
    Empty,
    Text(String),
    Binary(Bytes),
}

impl RawBody {
    /// Text for textual media types (or no media type) when the bytes are valid UTF-8.
    pub fn from_bytes(bytes: &Bytes, content_type: Option<&str>) -> Self {
        if bytes.is_empty() {
            return RawBody::Empty;
        }
        let textual = content_type
            .map(|ct| {
                let ct = ct.to_ascii_lowercase();
                ct.starts_with("text/") || ct.contains("json") || ct.contains("xml")
            })
            .unwrap_or(true);
        if textual {
            if let Ok(s) = std::str::from_utf8(bytes) {
                return RawBody::Text(s.to_string());
            }
        }
        RawBody::Binary(bytes.clone())
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            RawBody::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, RawBody::Empty)
    }
}

/// Inbound response owned by a single call.
#[derive(Debug)]
pub struct ResponseContext {
    status: u16,
    headers: HeaderMap,
    body: ResponseBody,
}

impl ResponseContext {
    pub fn new(status: u16, headers: HeaderMap, body: ResponseBody) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    pub fn from_bytes(status: u16, headers: HeaderMap, bytes: impl Into<Bytes>) -> Self {
        Self::new(status, headers, ResponseBody::Buffered(bytes.into()))
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn set_status(&mut self, status: u16) {
        self.status = status;
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    pub fn content_type(&self) -> Option<&str> {
        self.headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok())
    }

    /// Read the whole body. A streaming body is drained once and kept buffered,
    /// so later reads (by another middleware or the dispatcher) see the same bytes.
    pub async fn bytes(&mut self) -> Result<Bytes> {
        let collected = match &mut self.body {
            ResponseBody::Buffered(bytes) => return Ok(bytes.clone()),
            ResponseBody::Streaming(stream) => {
                let mut buf = BytesMut::new();
                while let Some(chunk) = stream.next().await {
                    buf.extend_from_slice(&chunk?);
                }
                buf.freeze()
            }
        };
        self.body = ResponseBody::Buffered(collected.clone());
        Ok(collected)
    }

    /// Body as UTF-8 text; invalid sequences are replaced.
    pub async fn text(&mut self) -> Result<String> {
        let bytes = self.bytes().await?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Body as text or binary depending on the media type.
    pub async fn body_as_any(&mut self) -> Result<RawBody> {
        let bytes = self.bytes().await?;
        Ok(RawBody::from_bytes(&bytes, self.content_type()))
    }

    pub fn set_body(&mut self, body: impl Into<Bytes>) {
        self.body = ResponseBody::Buffered(body.into());
    }

    pub fn into_parts(self) -> (u16, HeaderMap, ResponseBody) {
        (self.status, self.headers, self.body)
    }
}
