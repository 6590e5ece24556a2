use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One "I went there" mark left by a user on a shop.
///
/// A user has at most one visit per shop; un-marking deletes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisitRecord {
    pub visitor_id: String,
    pub shop_id: String,
    /// Shop name copied at marking time
    pub shop_name: String,
    pub visited_at: DateTime<Utc>,
}

impl VisitRecord {
    pub fn new(visitor_id: impl Into<String>, shop_id: impl Into<String>, shop_name: impl Into<String>) -> Self {
        Self {
            visitor_id: visitor_id.into(),
            shop_id: shop_id.into(),
            shop_name: shop_name.into(),
            visited_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToggleVisitResponse {
    pub shop_id: String,
    /// State after the toggle
    pub visited: bool,
}
