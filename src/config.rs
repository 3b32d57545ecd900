//! Client configuration and per-call overrides.

use std::env;
use std::fmt;
use std::sync::Arc;

use crate::auth::{AuthMethod, AuthMethods, BearerAuth, DEFAULT_AUTH_METHOD};
use crate::middleware::{Middleware, SharedMiddleware};
use crate::pipeline::{merge_middleware, MergeStrategy};
use crate::servers::{BaseServer, ServerConfiguration};
use crate::transport::{HttpTransport, Transport};
use crate::{Error, ErrorContext, Result};

/// Immutable client configuration.
///
/// Cloning is cheap (every field sits behind an `Arc`) and a configuration is
/// never mutated after [`ConfigurationBuilder::build`]. Per-call changes go
/// through [`Configuration::with_options`], which returns a new value.
#[derive(Clone)]
pub struct Configuration {
    base_server: Arc<dyn BaseServer>,
    transport: Arc<dyn Transport>,
    middleware: Arc<[SharedMiddleware]>,
    auth_methods: AuthMethods,
}

impl Configuration {
    pub fn builder() -> ConfigurationBuilder {
        ConfigurationBuilder::new()
    }

    pub fn base_server(&self) -> &Arc<dyn BaseServer> {
        &self.base_server
    }

    pub fn transport(&self) -> &Arc<dyn Transport> {
        &self.transport
    }

    pub fn middleware(&self) -> &[SharedMiddleware] {
        &self.middleware
    }

    pub fn auth_methods(&self) -> &AuthMethods {
        &self.auth_methods
    }

    /// Effective configuration for one call.
    ///
    /// Server, transport and auth methods take the call-scoped value when one is
    /// given. Middleware follows the options' [`MergeStrategy`]; without a
    /// call-time list the configured list is kept.
    pub fn with_options(&self, options: Option<&CallOptions>) -> Configuration {
        let Some(opts) = options else {
            return self.clone();
        };
        let middleware = match opts.middleware.as_deref() {
            Some(call_time) => {
                merge_middleware(&self.middleware, Some(call_time), opts.merge_strategy).into()
            }
            None => self.middleware.clone(),
        };
        Configuration {
            base_server: opts
                .base_server
                .clone()
                .unwrap_or_else(|| self.base_server.clone()),
            transport: opts
                .transport
                .clone()
                .unwrap_or_else(|| self.transport.clone()),
            middleware,
            auth_methods: opts
                .auth_methods
                .clone()
                .unwrap_or_else(|| self.auth_methods.clone()),
        }
    }
}

impl fmt::Debug for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Configuration")
            .field(
                "middleware",
                &self.middleware.iter().map(|m| m.name()).collect::<Vec<_>>(),
            )
            .field("auth_methods", &self.auth_methods)
            .finish_non_exhaustive()
    }
}

/// Builder for [`Configuration`].
///
/// Unset fields fall back to the dev server, an [`HttpTransport`] built from
/// the environment, no middleware and no auth methods.
#[derive(Default)]
pub struct ConfigurationBuilder {
    base_server: Option<Arc<dyn BaseServer>>,
    transport: Option<Arc<dyn Transport>>,
    middleware: Vec<SharedMiddleware>,
    auth_methods: AuthMethods,
}

impl ConfigurationBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from environment overrides.
    ///
    /// - `GENDEV_API_BASE_URL`: server base URL
    /// - `GENDEV_API_TOKEN`: bearer token installed as the `"default"` auth method
    pub fn from_env() -> Result<Self> {
        let mut builder = Self::new();
        if let Ok(base_url) = env::var("GENDEV_API_BASE_URL") {
            let base_url = base_url.trim().trim_end_matches('/').to_string();
            url::Url::parse(&base_url).map_err(|e| {
                Error::configuration_with_context(
                    format!("invalid base url: {}", e),
                    ErrorContext::new()
                        .with_field_path("env.GENDEV_API_BASE_URL")
                        .with_details(base_url.clone())
                        .with_source("configuration"),
                )
            })?;
            builder = builder.base_server(ServerConfiguration::new(base_url));
        }
        if let Ok(token) = env::var("GENDEV_API_TOKEN") {
            if !token.trim().is_empty() {
                builder = builder.auth_method(DEFAULT_AUTH_METHOD, BearerAuth::new(token.trim()));
            }
        }
        Ok(builder)
    }

    pub fn base_server(mut self, server: impl BaseServer + 'static) -> Self {
        self.base_server = Some(Arc::new(server));
        self
    }

    pub fn base_server_arc(mut self, server: Arc<dyn BaseServer>) -> Self {
        self.base_server = Some(server);
        self
    }

    pub fn transport(mut self, transport: impl Transport + 'static) -> Self {
        self.transport = Some(Arc::new(transport));
        self
    }

    /// Share a transport with the caller (e.g. to inspect a `MockTransport`).
    pub fn transport_arc(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Register a middleware at the end of the chain.
    pub fn middleware(mut self, middleware: impl Middleware + 'static) -> Self {
        self.middleware.push(Arc::new(middleware));
        self
    }

    pub fn middleware_arc(mut self, middleware: SharedMiddleware) -> Self {
        self.middleware.push(middleware);
        self
    }

    pub fn auth_method(mut self, name: impl Into<String>, method: impl AuthMethod + 'static) -> Self {
        self.auth_methods = self.auth_methods.with(name, Arc::new(method));
        self
    }

    pub fn auth_methods(mut self, methods: AuthMethods) -> Self {
        self.auth_methods = methods;
        self
    }

    pub fn build(self) -> Result<Configuration> {
        let transport = match self.transport {
            Some(t) => t,
            None => Arc::new(HttpTransport::from_env()?),
        };
        Ok(Configuration {
            base_server: self
                .base_server
                .unwrap_or_else(|| Arc::new(ServerConfiguration::default())),
            transport,
            middleware: self.middleware.into(),
            auth_methods: self.auth_methods,
        })
    }
}

/// Per-call overrides. Every field left unset falls back to the configuration.
#[derive(Clone, Default)]
pub struct CallOptions {
    base_server: Option<Arc<dyn BaseServer>>,
    transport: Option<Arc<dyn Transport>>,
    middleware: Option<Vec<SharedMiddleware>>,
    merge_strategy: MergeStrategy,
    auth_methods: Option<AuthMethods>,
}

impl CallOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn base_server(mut self, server: impl BaseServer + 'static) -> Self {
        self.base_server = Some(Arc::new(server));
        self
    }

    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Call-time middleware.
    ///
    /// With the default [`MergeStrategy::Replace`] this list is the only
    /// middleware the call runs; set [`CallOptions::merge_strategy`] to keep
    /// the configured ones.
    pub fn middleware(mut self, middleware: Vec<SharedMiddleware>) -> Self {
        self.middleware = Some(middleware);
        self
    }

    pub fn merge_strategy(mut self, strategy: MergeStrategy) -> Self {
        self.merge_strategy = strategy;
        self
    }

    /// Replaces the whole named-method map for the call.
    pub fn auth_methods(mut self, methods: AuthMethods) -> Self {
        self.auth_methods = Some(methods);
        self
    }
}

impl fmt::Debug for CallOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallOptions")
            .field("base_server", &self.base_server.is_some())
            .field("transport", &self.transport.is_some())
            .field(
                "middleware",
                &self
                    .middleware
                    .as_ref()
                    .map(|mws| mws.iter().map(|m| m.name()).collect::<Vec<_>>()),
            )
            .field("merge_strategy", &self.merge_strategy)
            .field("auth_methods", &self.auth_methods)
            .finish()
    }
}

/// Read an unsigned integer knob; unset is `None`, unparseable is an error.
pub(crate) fn env_u64(key: &str, source: &str) -> Result<Option<u64>> {
    match env::var(key) {
        Ok(raw) => raw.trim().parse::<u64>().map(Some).map_err(|_| {
            Error::configuration_with_context(
                format!("expected an unsigned integer, got '{}'", raw),
                ErrorContext::new()
                    .with_field_path(format!("env.{}", key))
                    .with_source(source),
            )
        }),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::HttpMethod;
    use crate::transport::MockTransport;

    struct Named(&'static str);

    impl Middleware for Named {
        fn name(&self) -> &str {
            self.0
        }
    }

    fn base() -> Configuration {
        ConfigurationBuilder::new()
            .transport(MockTransport::new())
            .middleware(Named("configured"))
            .build()
            .unwrap()
    }

    fn names(config: &Configuration) -> Vec<&str> {
        config.middleware().iter().map(|m| m.name()).collect()
    }

    #[test]
    fn defaults_to_dev_server() {
        let config = base();
        let ctx = config
            .base_server()
            .make_request_context("/health", HttpMethod::GET);
        assert_eq!(ctx.url(), "http://localhost:8080/api/health");
    }

    #[test]
    fn options_override_server_and_keep_configured_middleware() {
        let config = base();
        let opts = CallOptions::new().base_server(ServerConfiguration::prod());
        let effective = config.with_options(Some(&opts));
        let ctx = effective
            .base_server()
            .make_request_context("/version", HttpMethod::GET);
        assert_eq!(ctx.url(), "https://check24-gendev-7-api.janez.at/api/version");
        assert_eq!(names(&effective), ["configured"]);
    }

    #[test]
    fn call_time_middleware_replaces_by_default() {
        let config = base();
        let opts = CallOptions::new().middleware(vec![Arc::new(Named("call")) as SharedMiddleware]);
        assert_eq!(names(&config.with_options(Some(&opts))), ["call"]);

        let opts = opts.merge_strategy(MergeStrategy::Append);
        assert_eq!(names(&config.with_options(Some(&opts))), ["configured", "call"]);
        assert_eq!(names(&config), ["configured"]);
    }

    #[test]
    fn call_transport_wins() {
        let config = base();
        let call_transport: Arc<dyn Transport> = Arc::new(MockTransport::new());
        let opts = CallOptions::new().transport(call_transport.clone());
        let effective = config.with_options(Some(&opts));
        assert!(Arc::ptr_eq(effective.transport(), &call_transport));
        assert!(!Arc::ptr_eq(config.transport(), &call_transport));
    }
}
