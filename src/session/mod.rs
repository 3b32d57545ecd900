//! Client-side driver for the cursor-based products query.
//!
//! ```text
//! Uninitiated → Initiated → PagePending ⇄ PagePending → Completed → Shared
//!                   │             │
//!                   └─────────────┴──→ InvalidCursor | NotFound | ServerError
//! ```
//!
//! A 202 from continue leaves the state untouched and the same cursor is
//! retried. Transport failures leave the state untouched too, so the caller may
//! retry the step.

mod poll;

pub use poll::{parse_retry_after, PollPolicy};

use std::fmt;
use std::time::Duration;
use tracing::{debug, warn};

use crate::apis::InternetProductsApi;
use crate::config::CallOptions;
use crate::cursor::{QueryCursor, ShareCursor};
use crate::models::{Address, InternetProduct, SharedInternetProductsResponse};
use crate::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryState {
    Uninitiated,
    /// Initiated, no page fetched yet.
    Initiated { cursor: QueryCursor },
    /// At least one page fetched; `cursor` addresses the next one.
    PagePending { cursor: QueryCursor },
    Completed,
    Shared { cursor: ShareCursor },
    InvalidCursor,
    NotFound,
    ServerError,
}

impl QueryState {
    pub fn name(&self) -> &'static str {
        match self {
            QueryState::Uninitiated => "Uninitiated",
            QueryState::Initiated { .. } => "Initiated",
            QueryState::PagePending { .. } => "PagePending",
            QueryState::Completed => "Completed",
            QueryState::Shared { .. } => "Shared",
            QueryState::InvalidCursor => "InvalidCursor",
            QueryState::NotFound => "NotFound",
            QueryState::ServerError => "ServerError",
        }
    }

    /// Failure states; the session cannot make progress from here.
    pub fn is_failed(&self) -> bool {
        matches!(
            self,
            QueryState::InvalidCursor | QueryState::NotFound | QueryState::ServerError
        )
    }

    fn continuation(&self) -> Option<&QueryCursor> {
        match self {
            QueryState::Initiated { cursor } | QueryState::PagePending { cursor } => Some(cursor),
            _ => None,
        }
    }

    fn from_failure(err: &Error) -> Option<QueryState> {
        match err.status()? {
            400 => Some(QueryState::InvalidCursor),
            404 => Some(QueryState::NotFound),
            _ => Some(QueryState::ServerError),
        }
    }
}

impl fmt::Display for QueryState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Result of a single continue step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    /// The page is still being collected; retry the same cursor.
    Pending { retry_after: Option<Duration> },
    /// A page arrived and more follow.
    Page { received: usize },
    /// The final page arrived.
    Completed { received: usize },
}

/// One products query, from initiation to an optional share.
///
/// Version and address are fixed at initiation. Products accumulate over all
/// pages in arrival order.
#[derive(Debug)]
pub struct ProductsQuerySession {
    api: InternetProductsApi,
    options: Option<CallOptions>,
    address: Address,
    providers: Option<Vec<String>>,
    initial_cursor: Option<QueryCursor>,
    version: Option<String>,
    products: Vec<InternetProduct>,
    state: QueryState,
}

impl ProductsQuerySession {
    pub fn new(api: InternetProductsApi, address: Address) -> Self {
        Self {
            api,
            options: None,
            address,
            providers: None,
            initial_cursor: None,
            version: None,
            products: Vec::new(),
            state: QueryState::Uninitiated,
        }
    }

    pub fn with_providers(mut self, providers: Vec<String>) -> Self {
        self.providers = Some(providers);
        self
    }

    /// Options applied to every call this session makes.
    pub fn with_options(mut self, options: CallOptions) -> Self {
        self.options = Some(options);
        self
    }

    pub fn state(&self) -> &QueryState {
        &self.state
    }

    pub fn address(&self) -> &Address {
        &self.address
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    pub fn initial_cursor(&self) -> Option<&QueryCursor> {
        self.initial_cursor.as_ref()
    }

    pub fn products(&self) -> &[InternetProduct] {
        &self.products
    }

    pub fn into_products(self) -> Vec<InternetProduct> {
        self.products
    }

    pub fn is_complete(&self) -> bool {
        matches!(self.state, QueryState::Completed | QueryState::Shared { .. })
    }

    fn refuse(&self, operation: &'static str) -> Error {
        Error::InvalidState {
            operation,
            state: self.state.name().to_string(),
        }
    }

    fn record_failure(&mut self, err: &Error) {
        if let Some(state) = QueryState::from_failure(err) {
            debug!(from = self.state.name(), to = state.name(), "products query failed");
            self.state = state;
        }
    }

    /// Start the query on the server.
    pub async fn initiate(&mut self) -> Result<()> {
        if self.state != QueryState::Uninitiated {
            return Err(self.refuse("initiate"));
        }
        let outcome = self
            .api
            .initiate_query(&self.address, self.providers.as_deref(), self.options.clone())
            .await;
        match outcome {
            Ok(started) => {
                debug!(version = started.version.as_str(), "products query initiated");
                self.version = Some(started.version);
                self.initial_cursor = Some(started.next_cursor.clone());
                self.state = QueryState::Initiated {
                    cursor: started.next_cursor,
                };
                Ok(())
            }
            Err(err) => {
                if err.status().is_some() {
                    self.state = QueryState::ServerError;
                }
                Err(err)
            }
        }
    }

    /// Fetch the next page once.
    pub async fn poll(&mut self) -> Result<PollOutcome> {
        let Some(cursor) = self.state.continuation().cloned() else {
            return Err(self.refuse("continue"));
        };
        let outcome = self
            .api
            .continue_query_with_http_info(&cursor, self.options.clone())
            .await;
        let result = match outcome {
            Ok(result) => result,
            Err(err) => {
                self.record_failure(&err);
                return Err(err);
            }
        };

        let retry_after = result.header("retry-after").and_then(|raw| {
            let parsed = parse_retry_after(raw);
            if parsed.is_none() {
                warn!(value = raw, "ignoring malformed Retry-After");
            }
            parsed
        });

        let Some(page) = result.data else {
            return Ok(PollOutcome::Pending { retry_after });
        };
        let received = page.products.len();
        self.products.extend(page.products);
        match page.next_cursor {
            Some(next) => {
                self.state = QueryState::PagePending { cursor: next };
                Ok(PollOutcome::Page { received })
            }
            None => {
                self.state = QueryState::Completed;
                Ok(PollOutcome::Completed { received })
            }
        }
    }

    /// Initiate if needed, then poll until the final page under `policy`.
    ///
    /// A session that already completed returns its collected products.
    pub async fn run_to_completion(&mut self, policy: &PollPolicy) -> Result<&[InternetProduct]> {
        if self.is_complete() {
            return Ok(&self.products);
        }
        if self.state == QueryState::Uninitiated {
            self.initiate().await?;
        }
        let mut pending_streak = 0u32;
        for attempt in 1..=policy.max_attempts {
            match self.poll().await? {
                PollOutcome::Completed { .. } => return Ok(&self.products),
                PollOutcome::Page { .. } => pending_streak = 0,
                PollOutcome::Pending { retry_after } => {
                    if attempt == policy.max_attempts {
                        break;
                    }
                    let delay = policy.delay_for(pending_streak, retry_after);
                    debug!(attempt, delay_ms = delay.as_millis() as u64, "products page pending");
                    pending_streak = pending_streak.saturating_add(1);
                    tokio::time::sleep(delay).await;
                }
            }
        }
        Err(Error::PollingExhausted {
            attempts: policy.max_attempts,
        })
    }

    /// Share the completed query. Sharing again returns the same cursor.
    pub async fn share(&mut self) -> Result<ShareCursor> {
        if let QueryState::Shared { cursor } = &self.state {
            return Ok(cursor.clone());
        }
        let initial = match (&self.state, &self.initial_cursor) {
            (QueryState::Completed, Some(initial)) => initial.clone(),
            _ => return Err(self.refuse("share")),
        };
        let cursor = self.api.share(&initial, self.options.clone()).await?;
        self.state = QueryState::Shared {
            cursor: cursor.clone(),
        };
        Ok(cursor)
    }

    /// Read back the shared result. A modeled failure moves the session to the
    /// matching failure state.
    pub async fn fetch_shared(&mut self) -> Result<SharedInternetProductsResponse> {
        let QueryState::Shared { cursor } = &self.state else {
            return Err(self.refuse("getShared"));
        };
        let outcome = self.api.get_shared(cursor, self.options.clone()).await;
        if let Err(err) = &outcome {
            self.record_failure(err);
        }
        outcome
    }
}
