use contracts::system::auth::{
    LoginRequest, LoginResponse, RefreshRequest, RefreshResponse, RegisterRequest, UserInfo,
};
use gloo_net::http::Request;

use crate::shared::api_utils::{api_url, get_json, post_json};

/// Login with username and password
pub async fn login(username: String, password: String) -> Result<LoginResponse, String> {
    post_json("/api/system/auth/login", &LoginRequest { username, password })
        .await
        .map_err(|e| format!("Login failed: {}", e))
}

/// Create an account and sign in
pub async fn register(request: RegisterRequest) -> Result<LoginResponse, String> {
    post_json("/api/system/auth/register", &request).await
}

/// Exchange the refresh token for a new access token
pub async fn refresh_token(refresh_token: String) -> Result<RefreshResponse, String> {
    post_json("/api/system/auth/refresh", &RefreshRequest { refresh_token }).await
}

/// Revoke the refresh token
pub async fn logout(refresh_token: String) -> Result<(), String> {
    let response = Request::post(&api_url("/api/system/auth/logout"))
        .json(&RefreshRequest { refresh_token })
        .map_err(|e| format!("Failed to serialize request: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        return Err(format!("Logout failed: {}", response.status()));
    }
    Ok(())
}

/// Current user, authenticated with the stored access token
pub async fn get_current_user() -> Result<UserInfo, String> {
    get_json("/api/system/auth/me").await
}
