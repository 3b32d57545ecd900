//! Authentication methods applied to outbound requests.

use async_trait::async_trait;
use base64::Engine;
use std::collections::HashMap;
use std::sync::Arc;

use crate::http::RequestContext;
use crate::Result;

/// Name of the method applied to every outbound request when configured.
pub const DEFAULT_AUTH_METHOD: &str = "default";

/// A way to authenticate a request (token, key, credentials).
#[async_trait]
pub trait AuthMethod: Send + Sync {
    fn name(&self) -> &str;

    /// May await I/O, e.g. to refresh a token.
    async fn apply(&self, request: &mut RequestContext) -> Result<()>;
}

/// Named authentication methods. Call-time overrides replace the whole map.
#[derive(Clone, Default)]
pub struct AuthMethods {
    methods: Arc<HashMap<String, Arc<dyn AuthMethod>>>,
}

impl AuthMethods {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, method: Arc<dyn AuthMethod>) -> Self {
        Arc::make_mut(&mut self.methods).insert(name.into(), method);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn AuthMethod>> {
        self.methods.get(name)
    }

    pub fn default_method(&self) -> Option<&Arc<dyn AuthMethod>> {
        self.get(DEFAULT_AUTH_METHOD)
    }

    pub fn len(&self) -> usize {
        self.methods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.methods.keys().map(String::as_str)
    }
}

impl std::fmt::Debug for AuthMethods {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<&str> = self.names().collect();
        names.sort_unstable();
        f.debug_struct("AuthMethods").field("methods", &names).finish()
    }
}

/// `Authorization: Bearer <token>`.
pub struct BearerAuth {
    token: String,
}

impl BearerAuth {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

#[async_trait]
impl AuthMethod for BearerAuth {
    fn name(&self) -> &str {
        "bearer"
    }

    async fn apply(&self, request: &mut RequestContext) -> Result<()> {
        request.set_header("Authorization", &format!("Bearer {}", self.token))
    }
}

/// Where an API key travels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiKeyLocation {
    Header,
    Query,
}

/// Static API key in a header or query parameter.
pub struct ApiKeyAuth {
    location: ApiKeyLocation,
    param: String,
    key: String,
}

impl ApiKeyAuth {
    pub fn header(param: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            location: ApiKeyLocation::Header,
            param: param.into(),
            key: key.into(),
        }
    }

    pub fn query(param: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            location: ApiKeyLocation::Query,
            param: param.into(),
            key: key.into(),
        }
    }
}

#[async_trait]
impl AuthMethod for ApiKeyAuth {
    fn name(&self) -> &str {
        "api_key"
    }

    async fn apply(&self, request: &mut RequestContext) -> Result<()> {
        match self.location {
            ApiKeyLocation::Header => request.set_header(&self.param, &self.key),
            ApiKeyLocation::Query => {
                request.set_query_param(self.param.clone(), self.key.clone());
                Ok(())
            }
        }
    }
}

/// `Authorization: Basic base64(user:password)`.
pub struct HttpBasicAuth {
    username: String,
    password: String,
}

impl HttpBasicAuth {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

#[async_trait]
impl AuthMethod for HttpBasicAuth {
    fn name(&self) -> &str {
        "basic"
    }

    async fn apply(&self, request: &mut RequestContext) -> Result<()> {
        let encoded = base64::engine::general_purpose::STANDARD
            .encode(format!("{}:{}", self.username, self.password));
        request.set_header("Authorization", &format!("Basic {}", encoded))
    }
}
