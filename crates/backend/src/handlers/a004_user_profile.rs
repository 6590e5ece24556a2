use axum::{http::StatusCode, Json};
use contracts::domain::a004_user_profile::{UpdateProfileDto, UserProfile};

use crate::domain::a004_user_profile;
use crate::system::auth::extractor::CurrentUser;

/// GET /api/profile
pub async fn get_mine(user: CurrentUser) -> Result<Json<UserProfile>, StatusCode> {
    a004_user_profile::service::get(user.id())
        .await
        .map(Json)
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}

/// PUT /api/profile
pub async fn update_mine(
    user: CurrentUser,
    Json(dto): Json<UpdateProfileDto>,
) -> Result<Json<UserProfile>, (StatusCode, String)> {
    dto.validate().map_err(|e| (StatusCode::BAD_REQUEST, e))?;
    a004_user_profile::service::update(user.id(), dto)
        .await
        .map(Json)
        .map_err(|e| {
            tracing::error!("Failed to update profile of {}: {}", user.id(), e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to update profile".to_string())
        })
}
