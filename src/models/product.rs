use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Pricing;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ConnectionType {
    Dsl,
    Cable,
    Fiber,
    Mobile,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInfo {
    /// Download speed in Mbit/s.
    pub speed: i32,
    pub connection_type: ConnectionType,
    /// Included TV package, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tv: Option<String>,
    /// Data volume before throttling; `None` means unthrottled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unthrottled_capacity_mb: Option<i32>,
}

/// One offer from one provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InternetProduct {
    pub id: String,
    pub provider: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_offered: Option<DateTime<Utc>>,
    pub product_info: ProductInfo,
    pub pricing: Pricing,
}
