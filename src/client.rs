//! Client entry point and the lazy call facade.
//!
//! Every operation returns a [`Call`]; await it for a single result or turn it
//! into a one-item stream with [`Call::into_stream`].

mod call;
mod core;

pub use call::Call;
pub use self::core::ApiClient;
