use contracts::domain::a003_bookmark::{Bookmark, ToggleBookmarkResponse};

use crate::shared::api_utils::{get_json, post_empty};

pub async fn toggle_bookmark(shop_id: &str) -> Result<ToggleBookmarkResponse, String> {
    post_empty(&format!("/api/bookmarks/{}/toggle", shop_id)).await
}

pub async fn fetch_my_bookmarks() -> Result<Vec<Bookmark>, String> {
    get_json("/api/bookmarks/mine").await
}

pub async fn fetch_bookmarked_ids() -> Result<Vec<String>, String> {
    get_json("/api/bookmarks/mine/ids").await
}
