//! Server resolution: templated base URL plus endpoint suffix.

use std::collections::BTreeMap;

use crate::http::{HttpMethod, RequestContext};

/// Production deployment.
pub const PROD_URL: &str = "https://check24-gendev-7-api.janez.at/api";
/// Local development server (default port of the API server).
pub const DEV_URL: &str = "http://localhost:8080/api";

/// Resolves an endpoint path into a fresh request.
pub trait BaseServer: Send + Sync {
    fn make_request_context(&self, endpoint: &str, method: HttpMethod) -> RequestContext;
}

/// Server described by a URL template with `{variable}` placeholders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfiguration {
    url: String,
    variables: BTreeMap<String, String>,
}

impl ServerConfiguration {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            variables: BTreeMap::new(),
        }
    }

    pub fn prod() -> Self {
        Self::new(PROD_URL)
    }

    pub fn dev() -> Self {
        Self::new(DEV_URL)
    }

    /// Set a template variable, returning the updated configuration.
    pub fn with_variable(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.variables.insert(name.into(), value.into());
        self
    }

    pub fn variables(&self) -> &BTreeMap<String, String> {
        &self.variables
    }

    /// URL with every known variable substituted. Unknown placeholders stay verbatim.
    pub fn url(&self) -> String {
        let mut replaced = self.url.clone();
        for (key, value) in &self.variables {
            replaced = replaced.replace(&format!("{{{}}}", key), value);
        }
        replaced
    }
}

impl Default for ServerConfiguration {
    fn default() -> Self {
        Self::dev()
    }
}

impl BaseServer for ServerConfiguration {
    fn make_request_context(&self, endpoint: &str, method: HttpMethod) -> RequestContext {
        RequestContext::new(format!("{}{}", self.url(), endpoint), method)
    }
}
