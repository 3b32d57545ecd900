use crate::client::{ApiClient, Call};
use crate::config::CallOptions;
use crate::cursor::{QueryCursor, ShareCursor};
use crate::dispatch::{OperationResult, ResponseRule};
use crate::http::HttpMethod;
use crate::models::{
    Address, InternetProductsCursor, InternetProductsResponse, SharedInternetProductsResponse,
};
use crate::operation::{require, require_cursor, OperationRequest};
use crate::session::ProductsQuerySession;
use crate::Result;

use super::params::{ContinueQueryRequest, GetSharedRequest, InitiateQueryRequest, ShareRequest};

const API: &str = "InternetProductsApi";

const INITIATE: &str = "initiateInternetProductsQuery";
const CONTINUE: &str = "continueInternetProductsQuery";
const SHARE: &str = "shareInternetProducts";
const GET_SHARED: &str = "getSharedInternetProducts";

const BAD_CURSOR: &str = "Bad request, invalid cursor";
const CURSOR_NOT_FOUND: &str = "Not found, cursor not found";
const INTERNAL: &str = "Internal server error";

const INITIATE_RULES: &[ResponseRule] = &[
    ResponseRule::payload(200),
    ResponseRule::fail(500, INTERNAL),
];

const CONTINUE_RULES: &[ResponseRule] = &[
    ResponseRule::payload(200),
    ResponseRule::empty(202),
    ResponseRule::fail(400, BAD_CURSOR),
    ResponseRule::fail(404, CURSOR_NOT_FOUND),
    ResponseRule::fail(500, INTERNAL),
];

const SHARE_RULES: &[ResponseRule] = &[
    ResponseRule::empty(200),
    ResponseRule::fail(400, "Bad request, invalid cursor or query not completed"),
    ResponseRule::fail(500, INTERNAL),
];

const GET_SHARED_RULES: &[ResponseRule] = &[
    ResponseRule::payload(200),
    ResponseRule::fail(400, BAD_CURSOR),
    ResponseRule::fail(404, CURSOR_NOT_FOUND),
    ResponseRule::fail(500, INTERNAL),
];

pub(crate) fn initiate_request(
    address: Option<&Address>,
    providers: Option<&[String]>,
) -> Result<OperationRequest> {
    let address = require(API, INITIATE, "address", address)?;
    let mut request =
        OperationRequest::new(API, INITIATE, HttpMethod::POST, "/internet-products", INITIATE_RULES);
    if let Some(providers) = providers {
        request = request.query_params("providers", providers);
    }
    request.body(&["application/json"], address)
}

pub(crate) fn continue_request(cursor: Option<&QueryCursor>) -> Result<OperationRequest> {
    let cursor = require_cursor(API, CONTINUE, "cursor", cursor)?;
    Ok(OperationRequest::new(
        API,
        CONTINUE,
        HttpMethod::GET,
        "/internet-products/continue",
        CONTINUE_RULES,
    )
    .query_param("cursor", cursor))
}

pub(crate) fn share_request(cursor: Option<&QueryCursor>) -> Result<OperationRequest> {
    let cursor = require_cursor(API, SHARE, "cursor", cursor)?;
    Ok(OperationRequest::new(
        API,
        SHARE,
        HttpMethod::POST,
        "/internet-products/share/{cursor}",
        SHARE_RULES,
    )
    .path_param("cursor", cursor.as_str()))
}

pub(crate) fn get_shared_request(cursor: Option<&ShareCursor>) -> Result<OperationRequest> {
    let cursor = require_cursor(API, GET_SHARED, "cursor", cursor)?;
    Ok(OperationRequest::new(
        API,
        GET_SHARED,
        HttpMethod::GET,
        "/internet-products/share/{cursor}",
        GET_SHARED_RULES,
    )
    .path_param("cursor", cursor.as_str()))
}

/// The cursor-based products query.
///
/// A query is initiated for an address, then continued with the returned cursor
/// until a page arrives without a next cursor. A completed query can be shared;
/// the share is addressed by the query's initial cursor.
#[derive(Debug, Clone)]
pub struct InternetProductsApi {
    client: ApiClient,
}

impl InternetProductsApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// A stateful driver for one query at `address`.
    pub fn query(&self, address: Address) -> ProductsQuerySession {
        ProductsQuerySession::new(self.clone(), address)
    }

    /// `POST /internet-products`
    pub fn initiate_query_with_http_info(
        &self,
        address: &Address,
        providers: Option<&[String]>,
        options: Option<CallOptions>,
    ) -> Call<OperationResult<InternetProductsCursor>> {
        self.client
            .execute(initiate_request(Some(address), providers), options)
    }

    pub fn initiate_query(
        &self,
        address: &Address,
        providers: Option<&[String]>,
        options: Option<CallOptions>,
    ) -> Call<InternetProductsCursor> {
        super::payload(
            INITIATE,
            self.initiate_query_with_http_info(address, providers, options),
        )
    }

    pub fn initiate_query_with_params(
        &self,
        params: &InitiateQueryRequest,
        options: Option<CallOptions>,
    ) -> Call<OperationResult<InternetProductsCursor>> {
        self.client.execute(
            initiate_request(params.address.as_ref(), params.providers.as_deref()),
            options,
        )
    }

    /// `GET /internet-products/continue?cursor=`
    ///
    /// A 202 means the page is still being collected: `data` is `None` and the
    /// same cursor should be retried later.
    pub fn continue_query_with_http_info(
        &self,
        cursor: &QueryCursor,
        options: Option<CallOptions>,
    ) -> Call<OperationResult<InternetProductsResponse>> {
        self.client.execute(continue_request(Some(cursor)), options)
    }

    /// `None` while the page is pending.
    pub fn continue_query(
        &self,
        cursor: &QueryCursor,
        options: Option<CallOptions>,
    ) -> Call<Option<InternetProductsResponse>> {
        self.continue_query_with_http_info(cursor, options)
            .map(OperationResult::into_data)
    }

    pub fn continue_query_with_params(
        &self,
        params: &ContinueQueryRequest,
        options: Option<CallOptions>,
    ) -> Call<OperationResult<InternetProductsResponse>> {
        self.client
            .execute(continue_request(params.cursor.as_ref()), options)
    }

    /// `POST /internet-products/share/{cursor}`
    pub fn share_with_http_info(
        &self,
        initial: &QueryCursor,
        options: Option<CallOptions>,
    ) -> Call<OperationResult<()>> {
        self.client.execute(share_request(Some(initial)), options)
    }

    /// Share a completed query and return the cursor that addresses the share.
    pub fn share(&self, initial: &QueryCursor, options: Option<CallOptions>) -> Call<ShareCursor> {
        let share = ShareCursor::for_query(initial);
        self.share_with_http_info(initial, options).map(move |_| share)
    }

    pub fn share_with_params(
        &self,
        params: &ShareRequest,
        options: Option<CallOptions>,
    ) -> Call<OperationResult<()>> {
        self.client
            .execute(share_request(params.cursor.as_ref()), options)
    }

    /// `GET /internet-products/share/{cursor}`
    pub fn get_shared_with_http_info(
        &self,
        cursor: &ShareCursor,
        options: Option<CallOptions>,
    ) -> Call<OperationResult<SharedInternetProductsResponse>> {
        self.client.execute(get_shared_request(Some(cursor)), options)
    }

    pub fn get_shared(
        &self,
        cursor: &ShareCursor,
        options: Option<CallOptions>,
    ) -> Call<SharedInternetProductsResponse> {
        super::payload(GET_SHARED, self.get_shared_with_http_info(cursor, options))
    }

    pub fn get_shared_with_params(
        &self,
        params: &GetSharedRequest,
        options: Option<CallOptions>,
    ) -> Call<OperationResult<SharedInternetProductsResponse>> {
        self.client
            .execute(get_shared_request(params.cursor.as_ref()), options)
    }
}
