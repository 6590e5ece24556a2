use super::repository;
use contracts::domain::a001_shop::{Shop, ShopCatalog, ShopDto};
use uuid::Uuid;

use crate::shared::data::db::get_connection;

/// Create a new shop (admin form)
pub async fn create(dto: ShopDto) -> anyhow::Result<Uuid> {
    let shop = Shop::new_for_insert(&dto);

    shop.validate()
        .map_err(|e| anyhow::anyhow!("Validation failed: {}", e))?;

    tracing::info!("Registering shop '{}' at {}", shop.name, shop.station);
    repository::insert(get_connection(), &shop).await
}

/// Update an existing shop
pub async fn update(dto: ShopDto) -> anyhow::Result<()> {
    let id = dto
        .id
        .as_ref()
        .and_then(|s| Uuid::parse_str(s).ok())
        .ok_or_else(|| anyhow::anyhow!("Invalid ID"))?;

    let mut shop = repository::get_by_id(get_connection(), id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Not found"))?;

    shop.update(&dto);
    shop.validate()
        .map_err(|e| anyhow::anyhow!("Validation failed: {}", e))?;
    shop.metadata.touch();

    repository::update(get_connection(), &shop).await
}

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<Shop>> {
    repository::get_by_id(get_connection(), id).await
}

pub async fn list_all() -> anyhow::Result<Vec<Shop>> {
    repository::list_all(get_connection()).await
}

pub async fn list_by_genre(genre: &str) -> anyhow::Result<Vec<Shop>> {
    repository::list_by_genre(get_connection(), genre).await
}

pub async fn list_by_station(station: &str) -> anyhow::Result<Vec<Shop>> {
    repository::list_by_station(get_connection(), station).await
}

pub async fn get_landmark() -> anyhow::Result<Option<Shop>> {
    repository::get_landmark(get_connection()).await
}

/// Genres and stations offered on the home page
pub async fn catalog() -> anyhow::Result<ShopCatalog> {
    let shops = repository::list_all(get_connection()).await?;
    Ok(ShopCatalog::from_shops(&shops))
}
