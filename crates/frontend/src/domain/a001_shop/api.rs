use contracts::domain::a001_shop::{Shop, ShopCatalog, ShopDto};
use serde::Deserialize;

use crate::shared::api_utils::{encode_segment, get_json, post_json};

pub async fn fetch_catalog() -> Result<ShopCatalog, String> {
    get_json("/api/shops/catalog").await
}

pub async fn fetch_by_genre(genre: &str) -> Result<Vec<Shop>, String> {
    get_json(&format!("/api/shops/genre/{}", encode_segment(genre))).await
}

pub async fn fetch_by_station(station: &str) -> Result<Vec<Shop>, String> {
    get_json(&format!("/api/shops/station/{}", encode_segment(station))).await
}

/// The "you are here" marker shop, if configured
pub async fn fetch_landmark() -> Result<Option<Shop>, String> {
    get_json("/api/shops/landmark").await
}

#[derive(Deserialize)]
struct SavedId {
    id: String,
}

/// Create or update a shop (admin); returns its id
pub async fn save_shop(dto: &ShopDto) -> Result<String, String> {
    let saved: SavedId = post_json("/api/shops", dto).await?;
    Ok(saved.id)
}
