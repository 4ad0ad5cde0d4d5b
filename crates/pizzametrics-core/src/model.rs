//! Metric model shared between the collector and its callers.
//!
//! `MetricsSnapshot` is the immutable, point-in-time copy the reporter reads
//! on every tick. `Order` is the shape the order-creation flow hands to the
//! collector; only `items[].price` is significant here.

use serde::{Deserialize, Serialize};

/// HTTP verbs that get a dedicated request counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpVerb {
    Post,
    Get,
    Delete,
    Put,
}

impl HttpVerb {
    /// Exact, case-sensitive match on the method string the HTTP layer
    /// delivers. Anything else (`PATCH`, `HEAD`, `get`, ...) is `None`.
    pub fn parse(method: &str) -> Option<Self> {
        match method {
            "POST" => Some(HttpVerb::Post),
            "GET" => Some(HttpVerb::Get),
            "DELETE" => Some(HttpVerb::Delete),
            "PUT" => Some(HttpVerb::Put),
            _ => None,
        }
    }

    /// Lowercase label used as the `method` tag on the wire.
    pub fn label(self) -> &'static str {
        match self {
            HttpVerb::Post => "post",
            HttpVerb::Get => "get",
            HttpVerb::Delete => "delete",
            HttpVerb::Put => "put",
        }
    }
}

/// One ordered line item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    #[serde(default)]
    pub menu_id: Option<u64>,
    #[serde(default)]
    pub description: Option<String>,
    /// Non-negative by caller contract; not validated here.
    pub price: f64,
}

/// An order as the order-creation flow sees it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Order {
    #[serde(default)]
    pub items: Vec<OrderItem>,
}

impl Order {
    /// Sum of line-item prices, no rounding.
    pub fn total_price(&self) -> f64 {
        self.items.iter().map(|i| i.price).sum()
    }
}

/// Point-in-time copy of every collector value.
///
/// Values are cumulative since process start; taking a snapshot never resets
/// anything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct MetricsSnapshot {
    pub total_requests: u64,
    pub post_requests: u64,
    pub get_requests: u64,
    pub delete_requests: u64,
    pub put_requests: u64,

    pub auth_successes: u64,
    pub auth_failures: u64,
    /// Signed: an unmatched logout drives this below zero.
    pub active_users: i64,

    pub pizzas_ordered: u64,
    pub revenue: f64,
    pub creation_failures: u64,
    /// Last observed order-creation latency in milliseconds.
    pub creation_latency: f64,
}

impl MetricsSnapshot {
    /// Requests whose verb has no dedicated counter.
    pub fn unrecognized_requests(&self) -> u64 {
        self.total_requests
            .saturating_sub(self.post_requests)
            .saturating_sub(self.get_requests)
            .saturating_sub(self.delete_requests)
            .saturating_sub(self.put_requests)
    }
}
