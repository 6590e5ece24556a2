use axum::{extract::Path, http::StatusCode, Json};
use contracts::domain::a003_bookmark::{Bookmark, ToggleBookmarkResponse};

use crate::domain::a003_bookmark;
use crate::system::auth::extractor::CurrentUser;

/// POST /api/bookmarks/:shop_id/toggle
pub async fn toggle(
    user: CurrentUser,
    Path(shop_id): Path<String>,
) -> Result<Json<ToggleBookmarkResponse>, StatusCode> {
    let shop_id = uuid::Uuid::parse_str(&shop_id).map_err(|_| StatusCode::BAD_REQUEST)?;
    match a003_bookmark::service::toggle(user.id(), shop_id).await {
        Ok(Some(v)) => Ok(Json(v)),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(e) => {
            tracing::error!("Failed to toggle bookmark: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// GET /api/bookmarks/mine
pub async fn list_mine(user: CurrentUser) -> Result<Json<Vec<Bookmark>>, StatusCode> {
    a003_bookmark::service::list_for_user(user.id())
        .await
        .map(Json)
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}

/// GET /api/bookmarks/mine/ids
pub async fn list_mine_ids(user: CurrentUser) -> Result<Json<Vec<String>>, StatusCode> {
    a003_bookmark::service::bookmarked_shop_ids(user.id())
        .await
        .map(Json)
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}
