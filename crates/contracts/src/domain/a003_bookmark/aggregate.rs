use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bookmark {
    pub user_id: String,
    pub shop_id: String,
    pub shop_name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToggleBookmarkResponse {
    pub shop_id: String,
    /// State after the toggle
    pub bookmarked: bool,
}
