use crate::client::{ApiClient, Call};
use crate::config::CallOptions;
use crate::dispatch::{OperationResult, ResponseRule};
use crate::http::HttpMethod;
use crate::models::Version;
use crate::operation::OperationRequest;
use crate::Result;

const API: &str = "SystemApi";

const GET_VERSION: &[ResponseRule] = &[
    ResponseRule::payload(200),
    ResponseRule::fail(500, "Internal server error"),
];

pub(crate) fn get_version_request() -> Result<OperationRequest> {
    Ok(OperationRequest::new(
        API,
        "getVersion",
        HttpMethod::GET,
        "/version",
        GET_VERSION,
    ))
}

#[derive(Debug, Clone)]
pub struct SystemApi {
    client: ApiClient,
}

impl SystemApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// `GET /version`
    pub fn get_version_with_http_info(
        &self,
        options: Option<CallOptions>,
    ) -> Call<OperationResult<Version>> {
        self.client.execute(get_version_request(), options)
    }

    pub fn get_version(&self, options: Option<CallOptions>) -> Call<Version> {
        super::payload("getVersion", self.get_version_with_http_info(options))
    }
}
