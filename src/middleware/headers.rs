use async_trait::async_trait;

use super::Middleware;
use crate::http::RequestContext;
use crate::Result;

/// Adds headers to every request unless the request already carries them.
#[derive(Debug, Clone, Default)]
pub struct DefaultHeaders {
    headers: Vec<(String, String)>,
}

impl DefaultHeaders {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

#[async_trait]
impl Middleware for DefaultHeaders {
    fn name(&self) -> &str {
        "default_headers"
    }

    async fn pre(&self, mut request: RequestContext) -> Result<RequestContext> {
        for (name, value) in &self.headers {
            if request.header(name).is_none() {
                request.set_header(name, value)?;
            }
        }
        Ok(request)
    }
}
