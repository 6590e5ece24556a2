use chrono::Utc;
use contracts::domain::a003_bookmark::{Bookmark, ToggleBookmarkResponse};
use uuid::Uuid;

use super::repository;
use crate::domain::a001_shop;
use crate::shared::data::db::get_connection;

/// Add or remove a bookmark. `None` when the shop does not exist or is a landmark.
pub async fn toggle(user_id: &str, shop_id: Uuid) -> anyhow::Result<Option<ToggleBookmarkResponse>> {
    let db = get_connection();
    let shop = match a001_shop::repository::get_by_id(db, shop_id).await? {
        Some(shop) if !shop.is_landmark => shop,
        _ => return Ok(None),
    };
    let shop_id = shop.to_string_id();

    let bookmarked = if repository::delete(db, user_id, &shop_id).await? {
        false
    } else {
        let bookmark = Bookmark {
            user_id: user_id.to_string(),
            shop_id: shop_id.clone(),
            shop_name: shop.name.clone(),
            created_at: Utc::now(),
        };
        repository::insert(db, &bookmark).await?;
        true
    };
    tracing::debug!("User {} bookmark on {} -> {}", user_id, shop_id, bookmarked);

    Ok(Some(ToggleBookmarkResponse { shop_id, bookmarked }))
}

pub async fn list_for_user(user_id: &str) -> anyhow::Result<Vec<Bookmark>> {
    repository::list_by_user(get_connection(), user_id).await
}

pub async fn bookmarked_shop_ids(user_id: &str) -> anyhow::Result<Vec<String>> {
    let items = repository::list_by_user(get_connection(), user_id).await?;
    Ok(items.into_iter().map(|b| b.shop_id).collect())
}
