use axum::{
    extract::Path,
    http::StatusCode,
    Json,
};
use contracts::domain::a001_shop::{Shop, ShopCatalog, ShopDto};
use serde_json::json;

use crate::domain::a001_shop;

/// GET /api/shops
pub async fn list_all() -> Result<Json<Vec<Shop>>, StatusCode> {
    match a001_shop::service::list_all().await {
        Ok(v) => Ok(Json(v)),
        Err(e) => {
            tracing::error!("Failed to list shops: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// GET /api/shops/catalog
pub async fn catalog() -> Result<Json<ShopCatalog>, StatusCode> {
    match a001_shop::service::catalog().await {
        Ok(v) => Ok(Json(v)),
        Err(e) => {
            tracing::error!("Failed to build shop catalog: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// GET /api/shops/genre/:genre
pub async fn list_by_genre(Path(genre): Path<String>) -> Result<Json<Vec<Shop>>, StatusCode> {
    match a001_shop::service::list_by_genre(&genre).await {
        Ok(v) => Ok(Json(v)),
        Err(e) => {
            tracing::error!("Failed to list shops of genre '{}': {}", genre, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// GET /api/shops/station/:station
pub async fn list_by_station(Path(station): Path<String>) -> Result<Json<Vec<Shop>>, StatusCode> {
    match a001_shop::service::list_by_station(&station).await {
        Ok(v) => Ok(Json(v)),
        Err(e) => {
            tracing::error!("Failed to list shops near '{}': {}", station, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// GET /api/shops/landmark
pub async fn get_landmark() -> Result<Json<Option<Shop>>, StatusCode> {
    a001_shop::service::get_landmark()
        .await
        .map(Json)
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}

/// GET /api/shops/:id
pub async fn get_by_id(Path(id): Path<String>) -> Result<Json<Shop>, StatusCode> {
    let uuid = uuid::Uuid::parse_str(&id).map_err(|_| StatusCode::BAD_REQUEST)?;
    match a001_shop::service::get_by_id(uuid).await {
        Ok(Some(v)) => Ok(Json(v)),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(_) => Err(StatusCode::INTERNAL_SERVER_ERROR),
    }
}

/// POST /api/shops (admin)
pub async fn upsert(
    Json(dto): Json<ShopDto>,
) -> Result<Json<serde_json::Value>, (StatusCode, String)> {
    Shop::new_for_insert(&dto)
        .validate()
        .map_err(|e| (StatusCode::BAD_REQUEST, e))?;

    let result = match dto.id.clone() {
        Some(id) => a001_shop::service::update(dto).await.map(|_| id),
        None => a001_shop::service::create(dto).await.map(|id| id.to_string()),
    };

    match result {
        Ok(id) => Ok(Json(json!({ "id": id }))),
        Err(e) => {
            tracing::error!("Failed to save shop: {}", e);
            Err((StatusCode::INTERNAL_SERVER_ERROR, "Failed to save shop".to_string()))
        }
    }
}
