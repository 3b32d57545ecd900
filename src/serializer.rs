//! Media-type selection and body (de)serialization.

use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::{Error, Result};

pub const JSON: &str = "application/json";
pub const TEXT_PLAIN: &str = "text/plain";

const SUPPORTED: &[&str] = &[JSON, TEXT_PLAIN];

/// Strip parameters and lowercase: `"Application/JSON; charset=utf-8"` → `"application/json"`.
pub fn normalize_media_type(content_type: Option<&str>) -> Option<String> {
    let raw = content_type?.split(';').next()?.trim();
    if raw.is_empty() {
        None
    } else {
        Some(raw.to_ascii_lowercase())
    }
}

fn is_json(media_type: &str) -> bool {
    media_type == JSON || media_type.ends_with("+json") || media_type == "*/*"
}

/// Pick the body media type from an operation's declared set.
///
/// An empty set means JSON. Otherwise the first supported entry wins, with
/// wildcards and `+json` suffixes treated as JSON.
pub fn preferred_media_type(accepted: &[&str]) -> Result<&'static str> {
    if accepted.is_empty() {
        return Ok(JSON);
    }
    for candidate in accepted {
        let Some(normalized) = normalize_media_type(Some(candidate)) else {
            continue;
        };
        if is_json(&normalized) {
            return Ok(JSON);
        }
        if let Some(supported) = SUPPORTED.iter().copied().find(|s| *s == normalized) {
            return Ok(supported);
        }
    }
    Err(Error::UnsupportedMediaType {
        media_type: accepted.join(", "),
    })
}

/// Serialize a request body for `media_type`.
pub fn stringify<T: Serialize + ?Sized>(value: &T, media_type: &str) -> Result<Bytes> {
    let normalized = normalize_media_type(Some(media_type)).unwrap_or_else(|| JSON.to_string());
    if is_json(&normalized) {
        return Ok(Bytes::from(serde_json::to_vec(value)?));
    }
    if normalized == TEXT_PLAIN {
        return match serde_json::to_value(value)? {
            serde_json::Value::String(s) => Ok(Bytes::from(s)),
            other => Ok(Bytes::from(other.to_string())),
        };
    }
    Err(Error::UnsupportedMediaType {
        media_type: normalized,
    })
}

/// Deserialize a response body.
///
/// A missing content type is read as JSON. `text/plain` bodies deserialize as a
/// JSON string value, so they only fit string-like targets.
pub fn parse<T: DeserializeOwned>(body: &[u8], content_type: Option<&str>) -> Result<T> {
    let media_type = normalize_media_type(content_type).unwrap_or_else(|| JSON.to_string());
    if is_json(&media_type) {
        return Ok(serde_json::from_slice(body)?);
    }
    if media_type == TEXT_PLAIN {
        let text = String::from_utf8_lossy(body).into_owned();
        return Ok(serde_json::from_value(serde_json::Value::String(text))?);
    }
    Err(Error::UnsupportedMediaType { media_type })
}
