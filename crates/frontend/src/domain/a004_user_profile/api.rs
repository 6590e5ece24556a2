use contracts::domain::a004_user_profile::{UpdateProfileDto, UserProfile};

use crate::shared::api_utils::{get_json, put_json};

pub async fn fetch_my_profile() -> Result<UserProfile, String> {
    get_json("/api/profile").await
}

pub async fn update_my_profile(display_name: String) -> Result<UserProfile, String> {
    put_json("/api/profile", &UpdateProfileDto { display_name }).await
}
