use crate::client::{ApiClient, Call};
use crate::config::CallOptions;
use crate::dispatch::{OperationResult, ResponseRule};
use crate::http::HttpMethod;
use crate::models::Health;
use crate::operation::OperationRequest;
use crate::Result;

const API: &str = "HealthApi";

const HEALTH_CHECK: &[ResponseRule] = &[ResponseRule::payload(200)];

pub(crate) fn health_check_request() -> Result<OperationRequest> {
    Ok(OperationRequest::new(
        API,
        "healthCheck",
        HttpMethod::GET,
        "/health",
        HEALTH_CHECK,
    ))
}

#[derive(Debug, Clone)]
pub struct HealthApi {
    client: ApiClient,
}

impl HealthApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// `GET /health`
    pub fn health_check_with_http_info(
        &self,
        options: Option<CallOptions>,
    ) -> Call<OperationResult<Health>> {
        self.client.execute(health_check_request(), options)
    }

    pub fn health_check(&self, options: Option<CallOptions>) -> Call<Health> {
        super::payload("healthCheck", self.health_check_with_http_info(options))
    }
}
