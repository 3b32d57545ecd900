//! Call-scoped request and response values.
//!
//! A [`RequestContext`] is built by an operation's request factory, mutated by
//! outbound middleware and handed to the transport. A [`ResponseContext`] comes
//! back from the transport, passes through inbound middleware and is finally
//! classified by the dispatcher.

mod request;
mod response;

pub use request::RequestContext;
pub use response::{RawBody, ResponseBody, ResponseContext};

/// HTTP method, re-exported so callers need not depend on reqwest directly.
pub use reqwest::Method as HttpMethod;

/// `Accept` value sent by every operation.
pub const ACCEPT_JSON: &str = "application/json, */*;q=0.8";
