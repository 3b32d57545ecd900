use crate::http::RawBody;
use crate::transport::TransportError;
use reqwest::header::HeaderMap;
use thiserror::Error;

/// Structured error context for configuration and build failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorContext {
    /// Field path or configuration key that caused the error (e.g., "server.url", "env.GENDEV_HTTP_TIMEOUT_SECS")
    pub field_path: Option<String>,
    /// Additional context about the error (e.g., expected type, actual value)
    pub details: Option<String>,
    /// Source of the error (e.g., "server_resolver", "http_transport")
    pub source: Option<String>,
}

impl ErrorContext {
    pub fn new() -> Self {
        Self {
            field_path: None,
            details: None,
            source: None,
        }
    }

    pub fn with_field_path(mut self, path: impl Into<String>) -> Self {
        self.field_path = Some(path.into());
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

impl Default for ErrorContext {
    fn default() -> Self {
        Self::new()
    }
}

/// A modeled error status returned by the server.
///
/// The reason string is fixed per operation and status (e.g. "Not found, cursor not found"),
/// so callers can display it without inspecting the body.
#[derive(Debug, Clone, Error)]
#[error("HTTP {status}: {reason}")]
pub struct ApiError {
    pub status: u16,
    pub reason: String,
    /// Raw body, read best-effort. `None` when reading the body itself failed.
    pub body: Option<RawBody>,
    pub headers: HeaderMap,
}

/// Unified error type for the client runtime.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Required parameter {parameter} was null or undefined when calling {api}.{operation}.")]
    Validation {
        api: &'static str,
        operation: &'static str,
        parameter: &'static str,
    },

    #[error("API error: {0}")]
    Api(#[from] ApiError),

    #[error("Unknown API Status Code! (HTTP {status})")]
    UnknownStatus {
        status: u16,
        body: RawBody,
        headers: HeaderMap,
    },

    #[error("Network transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Unsupported media type: {media_type}")]
    UnsupportedMediaType { media_type: String },

    #[error("Configuration error: {message}{}", format_context(.context))]
    Configuration {
        message: String,
        context: ErrorContext,
    },

    #[error("Middleware '{name}' failed: {message}")]
    Middleware { name: String, message: String },

    #[error("Operation '{operation}' is not valid in session state {state}")]
    InvalidState {
        operation: &'static str,
        state: String,
    },

    #[error("{operation} answered HTTP {status} without a payload")]
    EmptyPayload { operation: &'static str, status: u16 },

    #[error("Products query still pending after {attempts} continue attempts")]
    PollingExhausted { attempts: u32 },
}

// Helper function to format error context for display
fn format_context(ctx: &ErrorContext) -> String {
    let mut parts = Vec::new();
    if let Some(ref field) = ctx.field_path {
        parts.push(format!("field: {}", field));
    }
    if let Some(ref details) = ctx.details {
        parts.push(format!("details: {}", details));
    }
    if let Some(ref source) = ctx.source {
        parts.push(format!("source: {}", source));
    }
    if parts.is_empty() {
        String::new()
    } else {
        format!(" ({})", parts.join(", "))
    }
}

impl Error {
    /// Create a configuration error without context.
    pub fn configuration(msg: impl Into<String>) -> Self {
        Error::Configuration {
            message: msg.into(),
            context: ErrorContext::new(),
        }
    }

    /// Create a configuration error with structured context.
    pub fn configuration_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Configuration {
            message: msg.into(),
            context,
        }
    }

    /// Create an error on behalf of a middleware step.
    pub fn middleware(name: impl Into<String>, msg: impl Into<String>) -> Self {
        Error::Middleware {
            name: name.into(),
            message: msg.into(),
        }
    }

    /// HTTP status carried by the error, if the server produced one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api(e) => Some(e.status),
            Error::UnknownStatus { status, .. } => Some(*status),
            Error::EmptyPayload { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether this failure happened before any network I/O.
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation { .. })
    }

    /// Extract error context if available
    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            Error::Configuration { context, .. } => Some(context),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_message_names_api_operation_and_parameter() {
        let err = Error::Validation {
            api: "InternetProductsApi",
            operation: "continueInternetProductsQuery",
            parameter: "cursor",
        };
        assert_eq!(
            err.to_string(),
            "Required parameter cursor was null or undefined when calling InternetProductsApi.continueInternetProductsQuery."
        );
        assert!(err.is_validation());
        assert_eq!(err.status(), None);
    }

    #[test]
    fn configuration_context_is_rendered() {
        let err = Error::configuration_with_context(
            "invalid base url",
            ErrorContext::new()
                .with_field_path("server.url")
                .with_source("server_resolver"),
        );
        assert_eq!(
            err.to_string(),
            "Configuration error: invalid base url (field: server.url, source: server_resolver)"
        );
        assert_eq!(
            err.context().and_then(|c| c.field_path.as_deref()),
            Some("server.url")
        );
    }

    #[test]
    fn api_error_exposes_status() {
        let err: Error = ApiError {
            status: 404,
            reason: "Not found, cursor not found".into(),
            body: Some(RawBody::Empty),
            headers: HeaderMap::new(),
        }
        .into();
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.to_string(), "API error: HTTP 404: Not found, cursor not found");
    }
}
