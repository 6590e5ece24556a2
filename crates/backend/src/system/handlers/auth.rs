use axum::{extract::Json, http::StatusCode};
use contracts::system::auth::{
    LoginRequest, LoginResponse, RefreshRequest, RefreshResponse, RegisterRequest, UserInfo,
};
use contracts::system::users::User;

use crate::domain::a004_user_profile;
use crate::shared::config;
use crate::shared::data::db::get_connection;
use crate::system::auth::extractor::CurrentUser;
use crate::system::auth::{jwt, refresh_tokens};
use crate::system::users::service::{self as user_service, RegistrationError};

/// POST /api/system/auth/register
pub async fn register(
    Json(request): Json<RegisterRequest>,
) -> Result<Json<LoginResponse>, (StatusCode, String)> {
    let db = get_connection();
    let user = user_service::create(db, &request.username, &request.password, false)
        .await
        .map_err(|e| match e {
            RegistrationError::UsernameTaken => (StatusCode::CONFLICT, e.to_string()),
            RegistrationError::EmptyUsername | RegistrationError::WeakPassword(_) => {
                (StatusCode::BAD_REQUEST, e.to_string())
            }
            RegistrationError::Store(e) => {
                tracing::error!("Registration failed: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Registration failed".to_string())
            }
        })?;

    let display_name = request.display_name.or_else(|| Some(user.username.clone()));
    a004_user_profile::service::create(&user.id, display_name)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create profile of {}: {}", user.id, e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Registration failed".to_string())
        })?;

    issue_tokens(user)
        .await
        .map(Json)
        .map_err(|code| (code, "Failed to issue tokens".to_string()))
}

/// POST /api/system/auth/login
pub async fn login(Json(request): Json<LoginRequest>) -> Result<Json<LoginResponse>, StatusCode> {
    let user = user_service::verify_credentials(get_connection(), &request.username, &request.password)
        .await
        .map_err(|e| {
            tracing::error!("Login failed: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?
        .ok_or(StatusCode::UNAUTHORIZED)?;

    tracing::info!("User '{}' logged in", user.username);
    issue_tokens(user).await.map(Json)
}

/// POST /api/system/auth/refresh
pub async fn refresh(Json(request): Json<RefreshRequest>) -> Result<Json<RefreshResponse>, StatusCode> {
    let db = get_connection();
    let user_id = refresh_tokens::validate(db, &request.refresh_token)
        .await
        .map_err(|_| StatusCode::UNAUTHORIZED)?;

    let user = user_service::get_by_id(db, &user_id)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?
        .filter(|u| u.is_active)
        .ok_or(StatusCode::UNAUTHORIZED)?;

    let access_token = jwt::generate_access_token(&user.id, &user.username, user.is_admin)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    Ok(Json(RefreshResponse { access_token }))
}

/// POST /api/system/auth/logout
pub async fn logout(Json(request): Json<RefreshRequest>) -> Result<StatusCode, StatusCode> {
    refresh_tokens::revoke(get_connection(), &request.refresh_token)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    Ok(StatusCode::OK)
}

/// GET /api/system/auth/me (protected)
pub async fn current_user(CurrentUser(claims): CurrentUser) -> Result<Json<UserInfo>, StatusCode> {
    let user = user_service::get_by_id(get_connection(), &claims.sub)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?
        .ok_or(StatusCode::NOT_FOUND)?;

    user_info(user).await.map(Json)
}

async fn issue_tokens(user: User) -> Result<LoginResponse, StatusCode> {
    let access_token = jwt::generate_access_token(&user.id, &user.username, user.is_admin)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    let refresh_token = jwt::generate_refresh_token();
    let lifetime_days = config::get().auth.refresh_token_days;
    refresh_tokens::store(get_connection(), &user.id, &refresh_token, lifetime_days)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    Ok(LoginResponse {
        access_token,
        refresh_token,
        user: user_info(user).await?,
    })
}

async fn user_info(user: User) -> Result<UserInfo, StatusCode> {
    let profile = a004_user_profile::service::get(&user.id)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    Ok(UserInfo {
        id: user.id,
        username: user.username,
        display_name: profile.display_name,
        is_admin: user.is_admin,
    })
}
