use axum::{extract::Path, http::StatusCode, Json};
use contracts::domain::a002_visit::{ToggleVisitResponse, VisitRecord};

use crate::domain::a002_visit;
use crate::system::auth::extractor::CurrentUser;

/// POST /api/visits/:shop_id/toggle
pub async fn toggle(
    user: CurrentUser,
    Path(shop_id): Path<String>,
) -> Result<Json<ToggleVisitResponse>, StatusCode> {
    let shop_id = uuid::Uuid::parse_str(&shop_id).map_err(|_| StatusCode::BAD_REQUEST)?;
    match a002_visit::service::toggle(user.id(), shop_id).await {
        Ok(Some(v)) => Ok(Json(v)),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(e) => {
            tracing::error!("Failed to toggle visit: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// GET /api/visits/mine
pub async fn list_mine(user: CurrentUser) -> Result<Json<Vec<VisitRecord>>, StatusCode> {
    a002_visit::service::list_for_user(user.id())
        .await
        .map(Json)
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}

/// GET /api/visits/mine/ids
pub async fn list_mine_ids(user: CurrentUser) -> Result<Json<Vec<String>>, StatusCode> {
    a002_visit::service::visited_shop_ids(user.id())
        .await
        .map(Json)
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}
