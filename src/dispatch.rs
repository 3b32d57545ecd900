//! Status-driven response dispatch.
//!
//! Each operation declares an ordered rule table. The first rule whose status
//! matcher accepts the response decides the outcome; unmatched 2xx responses are
//! treated as best-effort successes and anything else is an unknown status.

use bytes::Bytes;
use reqwest::header::HeaderMap;
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::error::ApiError;
use crate::http::{RawBody, ResponseContext};
use crate::serializer;
use crate::{Error, Result};

/// Which statuses a rule applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusMatch {
    Exact(u16),
    /// Leading digit: `Class(5)` matches 500–599.
    Class(u16),
}

impl StatusMatch {
    pub const fn matches(self, status: u16) -> bool {
        match self {
            StatusMatch::Exact(code) => code == status,
            StatusMatch::Class(class) => status / 100 == class,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleAction {
    /// Deserialize the body into the operation's payload type.
    Payload,
    /// Success without a payload; the body is still kept on the result.
    Empty,
    /// Modeled failure with a fixed reason.
    Fail(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponseRule {
    pub status: StatusMatch,
    pub action: RuleAction,
}

impl ResponseRule {
    pub const fn payload(status: u16) -> Self {
        Self {
            status: StatusMatch::Exact(status),
            action: RuleAction::Payload,
        }
    }

    pub const fn empty(status: u16) -> Self {
        Self {
            status: StatusMatch::Exact(status),
            action: RuleAction::Empty,
        }
    }

    pub const fn fail(status: u16, reason: &'static str) -> Self {
        Self {
            status: StatusMatch::Exact(status),
            action: RuleAction::Fail(reason),
        }
    }

    pub const fn fail_class(class: u16, reason: &'static str) -> Self {
        Self {
            status: StatusMatch::Class(class),
            action: RuleAction::Fail(reason),
        }
    }
}

/// Successful outcome of an operation, with the raw response kept alongside.
#[derive(Debug, Clone)]
pub struct OperationResult<T> {
    pub status: u16,
    pub headers: HeaderMap,
    pub body: Bytes,
    /// `None` for statuses without a payload (202 on continue, 200 on share) or
    /// when a best-effort body could not be parsed.
    pub data: Option<T>,
}

impl<T> OperationResult<T> {
    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    pub fn into_data(self) -> Option<T> {
        self.data
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> OperationResult<U> {
        OperationResult {
            status: self.status,
            headers: self.headers,
            body: self.body,
            data: self.data.map(f),
        }
    }
}

/// Classify a response against `rules`.
pub async fn dispatch<T: DeserializeOwned>(
    rules: &[ResponseRule],
    mut response: ResponseContext,
) -> Result<OperationResult<T>> {
    let status = response.status();
    let rule = rules.iter().find(|r| r.status.matches(status));

    match rule.map(|r| r.action) {
        Some(RuleAction::Payload) => {
            let body = response.bytes().await?;
            let data = serializer::parse::<T>(&body, response.content_type())?;
            Ok(finish(response, body, Some(data)))
        }
        Some(RuleAction::Empty) => {
            let body = response.bytes().await?;
            Ok(finish(response, body, None))
        }
        Some(RuleAction::Fail(reason)) => {
            let body = response.body_as_any().await.ok();
            Err(ApiError {
                status,
                reason: reason.to_string(),
                body,
                headers: response.headers().clone(),
            }
            .into())
        }
        None if (200..=299).contains(&status) => {
            let body = response.bytes().await?;
            let data = if body.iter().all(u8::is_ascii_whitespace) {
                None
            } else {
                match serializer::parse::<T>(&body, response.content_type()) {
                    Ok(data) => Some(data),
                    Err(e) => {
                        warn!(http_status = status, error = %e, "dropping unparseable success body");
                        None
                    }
                }
            };
            Ok(finish(response, body, data))
        }
        None => {
            let body = match response.body_as_any().await {
                Ok(body) => body,
                Err(e) => {
                    warn!(http_status = status, error = %e, "unreadable body on unknown status");
                    RawBody::Empty
                }
            };
            Err(Error::UnknownStatus {
                status,
                body,
                headers: response.headers().clone(),
            })
        }
    }
}

fn finish<T>(response: ResponseContext, body: Bytes, data: Option<T>) -> OperationResult<T> {
    let (status, headers, _) = response.into_parts();
    OperationResult {
        status,
        headers,
        body,
        data,
    }
}
