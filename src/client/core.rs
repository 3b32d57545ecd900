use serde::de::DeserializeOwned;
use std::time::Instant;
use tracing::info;
use uuid::Uuid;

use super::Call;
use crate::apis::{HealthApi, InternetProductsApi, SystemApi};
use crate::config::{CallOptions, Configuration, ConfigurationBuilder};
use crate::dispatch::{dispatch, OperationResult};
use crate::operation::OperationRequest;
use crate::pipeline::Pipeline;
use crate::Result;

/// Entry point to the offer API.
///
/// Holds an immutable [`Configuration`]; cloning the client is cheap and clones
/// share transport and middleware.
#[derive(Debug, Clone)]
pub struct ApiClient {
    config: Configuration,
}

impl ApiClient {
    pub fn new(config: Configuration) -> Self {
        Self { config }
    }

    /// Configuration from `GENDEV_*` environment variables, see [`ConfigurationBuilder::from_env`].
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(ConfigurationBuilder::from_env()?.build()?))
    }

    pub fn configuration(&self) -> &Configuration {
        &self.config
    }

    pub fn health(&self) -> HealthApi {
        HealthApi::new(self.clone())
    }

    pub fn system(&self) -> SystemApi {
        SystemApi::new(self.clone())
    }

    pub fn internet_products(&self) -> InternetProductsApi {
        InternetProductsApi::new(self.clone())
    }

    /// Run an operation through the pipeline and its response rules.
    ///
    /// A request that failed to build (missing argument, body serialization)
    /// is reported when the call is awaited, without touching the transport.
    pub fn execute<T>(
        &self,
        request: Result<OperationRequest>,
        options: Option<CallOptions>,
    ) -> Call<OperationResult<T>>
    where
        T: DeserializeOwned + Send + 'static,
    {
        let request = match request {
            Ok(request) => request,
            Err(err) => return Call::fail(err),
        };
        let config = self.config.with_options(options.as_ref());
        Call::new(run(config, request))
    }
}

async fn run<T: DeserializeOwned>(
    config: Configuration,
    request: OperationRequest,
) -> Result<OperationResult<T>> {
    let call_id = Uuid::new_v4().to_string();
    let api = request.api();
    let operation = request.operation();
    let rules = request.rules();
    let start = Instant::now();

    let context = request.into_request_context(&config).await?;
    let response = match Pipeline::from_configuration(&config).execute(context).await {
        Ok(response) => response,
        Err(err) => {
            info!(
                call_id = call_id.as_str(),
                api,
                operation,
                duration_ms = start.elapsed().as_millis(),
                error = %err,
                "api call failed before a response"
            );
            return Err(err);
        }
    };

    let http_status = response.status();
    let result = dispatch::<T>(rules, response).await;
    info!(
        call_id = call_id.as_str(),
        api,
        operation,
        http_status,
        duration_ms = start.elapsed().as_millis(),
        success = result.is_ok(),
        "api call completed"
    );
    result
}
