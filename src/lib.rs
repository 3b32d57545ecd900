//! # gendev-api-client
//!
//! Client runtime for the internet product offer API.
//!
//! ## Overview
//!
//! Every operation follows the same path:
//!
//! ```text
//! arguments → OperationRequest → RequestContext
//!           → middleware.pre (in order) → Transport → middleware.post (reverse order)
//!           → response rules → OperationResult<T> | Error
//! ```
//!
//! - **Immutable configuration**: [`Configuration`] is built once and re-derived per
//!   call from [`CallOptions`]; concurrent calls never observe each other's overrides.
//! - **Lazy calls**: operations return a [`Call`], awaited for one result or streamed
//!   as exactly one item. Nothing is sent before that.
//! - **Typed dispatch**: per-operation status tables turn responses into payloads or
//!   [`ApiError`]s with fixed reasons.
//! - **Cursor protocol**: [`ProductsQuerySession`] drives initiate, continue (with
//!   202 polling), share and get-shared.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use gendev_api_client::{Address, ApiClient, PollPolicy};
//!
//! #[tokio::main]
//! async fn main() -> gendev_api_client::Result<()> {
//!     let client = ApiClient::from_env()?;
//!     let address = Address::new("Hauptstraße", "12", "Berlin", "10115", "DE");
//!
//!     let mut query = client.internet_products().query(address);
//!     let products = query.run_to_completion(&PollPolicy::from_env()?).await?;
//!     println!("{} offers", products.len());
//!
//!     let share = query.share().await?;
//!     println!("shared as {}", share);
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`apis`] | Operation groups: health, system, internet products |
//! | [`client`] | [`ApiClient`] and the [`Call`] facade |
//! | [`config`] | [`Configuration`], its builder and [`CallOptions`] |
//! | [`pipeline`] | Middleware merge strategies and execution |
//! | [`dispatch`] | Status rules and [`OperationResult`] |
//! | [`session`] | Products query state machine and polling |
//! | [`transport`] | reqwest-backed and in-memory transports |

pub mod apis;
pub mod auth;
pub mod client;
pub mod config;
pub mod cursor;
pub mod dispatch;
pub mod http;
pub mod middleware;
pub mod models;
pub mod operation;
pub mod pipeline;
pub mod serializer;
pub mod servers;
pub mod session;
pub mod transport;

// Re-export main types for convenience
pub use apis::{HealthApi, InternetProductsApi, SystemApi};
pub use auth::{ApiKeyAuth, AuthMethod, AuthMethods, BearerAuth, HttpBasicAuth};
pub use client::{ApiClient, Call};
pub use config::{CallOptions, Configuration, ConfigurationBuilder};
pub use cursor::{QueryCursor, ShareCursor};
pub use dispatch::OperationResult;
pub use middleware::{Middleware, SharedMiddleware};
pub use models::{
    Address, Health, InternetProduct, InternetProductsCursor, InternetProductsResponse,
    SharedInternetProductsResponse, Version,
};
pub use pipeline::MergeStrategy;
pub use servers::{BaseServer, ServerConfiguration};
pub use session::{PollOutcome, PollPolicy, ProductsQuerySession, QueryState};
pub use transport::{HttpTransport, Transport};

use futures::Stream;
use std::pin::Pin;

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// A pinned, boxed stream that emits `Result<T>`
pub type BoxStream<'a, T> = Pin<Box<dyn Stream<Item = Result<T>> + Send + 'a>>;

/// Error type for the library
pub mod error;
pub use error::{ApiError, Error, ErrorContext};
