use serde::{Deserialize, Deserializer, Serialize};

use super::{Address, InternetProduct};
use crate::cursor::QueryCursor;

/// Answer to initiating a products query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InternetProductsCursor {
    /// Offer data version the query is pinned to.
    pub version: String,
    pub next_cursor: QueryCursor,
}

/// One page of a running products query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InternetProductsResponse {
    #[serde(default)]
    pub products: Vec<InternetProduct>,
    /// `None` once the query is exhausted. An empty string on the wire means the same.
    #[serde(
        default,
        deserialize_with = "non_empty_cursor",
        skip_serializing_if = "Option::is_none"
    )]
    pub next_cursor: Option<QueryCursor>,
}

impl InternetProductsResponse {
    pub fn is_last(&self) -> bool {
        self.next_cursor.is_none()
    }
}

/// A shared, frozen query result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SharedInternetProductsResponse {
    #[serde(default)]
    pub products: Vec<InternetProduct>,
    pub version: String,
    pub address: Address,
}

fn non_empty_cursor<'de, D>(deserializer: D) -> Result<Option<QueryCursor>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.filter(|s| !s.is_empty()).map(QueryCursor::new))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_next_cursor_means_last_page() {
        let page: InternetProductsResponse =
            serde_json::from_str(r#"{"products":[],"nextCursor":""}"#).unwrap();
        assert!(page.is_last());

        let page: InternetProductsResponse = serde_json::from_str(r#"{"products":[]}"#).unwrap();
        assert!(page.is_last());

        let page: InternetProductsResponse =
            serde_json::from_str(r#"{"products":[],"nextCursor":"c2"}"#).unwrap();
        assert_eq!(page.next_cursor.as_ref().map(|c| c.as_str()), Some("c2"));
    }
}
