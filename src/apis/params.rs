//! Request structs for the object-parameter API forms.

use crate::cursor::{QueryCursor, ShareCursor};
use crate::models::Address;

#[derive(Debug, Clone, Default)]
pub struct InitiateQueryRequest {
    pub address: Option<Address>,
    /// Restrict the query to these providers; all providers when `None`.
    pub providers: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default)]
pub struct ContinueQueryRequest {
    pub cursor: Option<QueryCursor>,
}

#[derive(Debug, Clone, Default)]
pub struct ShareRequest {
    /// The initial cursor of a completed query.
    pub cursor: Option<QueryCursor>,
}

#[derive(Debug, Clone, Default)]
pub struct GetSharedRequest {
    pub cursor: Option<ShareCursor>,
}
