//! Operation groups of the offer API.
//!
//! Each operation comes in three shapes:
//! - `*_with_http_info`: the full [`OperationResult`](crate::dispatch::OperationResult);
//! - the plain form: the payload alone;
//! - `*_with_params`: takes a request struct from [`params`] whose required
//!   fields are optional, so a missing one is reported as a validation error.

mod health;
mod internet_products;
pub mod params;
mod system;

pub use health::HealthApi;
pub use internet_products::InternetProductsApi;
pub use system::SystemApi;

use crate::client::Call;
use crate::dispatch::OperationResult;
use crate::Error;

/// Payload of an operation whose success always carries a body.
pub(crate) fn payload<T: Send + 'static>(
    operation: &'static str,
    call: Call<OperationResult<T>>,
) -> Call<T> {
    call.and_then(move |result| {
        let status = result.status;
        result
            .into_data()
            .ok_or(Error::EmptyPayload { operation, status })
    })
}
