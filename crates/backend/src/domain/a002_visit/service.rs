use contracts::domain::a002_visit::{ToggleVisitResponse, VisitRecord};
use uuid::Uuid;

use super::repository;
use crate::domain::a001_shop;
use crate::shared::data::db::get_connection;

/// Mark or un-mark a shop as visited by `user_id`.
/// `None` when the shop does not exist or is a landmark.
pub async fn toggle(user_id: &str, shop_id: Uuid) -> anyhow::Result<Option<ToggleVisitResponse>> {
    let db = get_connection();
    let shop = match a001_shop::repository::get_by_id(db, shop_id).await? {
        Some(shop) if !shop.is_landmark => shop,
        _ => return Ok(None),
    };
    let shop_id = shop.to_string_id();

    let visited = if repository::delete(db, user_id, &shop_id).await? {
        tracing::info!("User {} un-marked visit at '{}'", user_id, shop.name);
        false
    } else {
        repository::insert(db, &VisitRecord::new(user_id, shop_id.clone(), shop.name.clone())).await?;
        tracing::info!("User {} visited '{}'", user_id, shop.name);
        true
    };

    Ok(Some(ToggleVisitResponse { shop_id, visited }))
}

pub async fn list_for_user(user_id: &str) -> anyhow::Result<Vec<VisitRecord>> {
    repository::list_by_user(get_connection(), user_id).await
}

/// Ids of the shops `user_id` has visited, for the visited badges on list pages
pub async fn visited_shop_ids(user_id: &str) -> anyhow::Result<Vec<String>> {
    let visits = repository::list_by_user(get_connection(), user_id).await?;
    Ok(visits.into_iter().map(|v| v.shop_id).collect())
}
