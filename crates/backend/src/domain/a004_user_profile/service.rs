use contracts::domain::a004_user_profile::{UpdateProfileDto, UserProfile};

use super::repository;
use crate::shared::data::db::get_connection;

/// Profile of `user_id`; an empty profile when none was stored yet
pub async fn get(user_id: &str) -> anyhow::Result<UserProfile> {
    let profile = repository::get_by_id(get_connection(), user_id).await?;
    Ok(profile.unwrap_or_else(|| UserProfile {
        id: user_id.to_string(),
        display_name: None,
    }))
}

pub async fn update(user_id: &str, dto: UpdateProfileDto) -> anyhow::Result<UserProfile> {
    dto.validate().map_err(|e| anyhow::anyhow!("Validation failed: {}", e))?;
    let profile = UserProfile {
        id: user_id.to_string(),
        display_name: Some(dto.display_name.trim().to_string()),
    };
    repository::upsert(get_connection(), &profile).await?;
    tracing::info!("Profile of {} updated", user_id);
    Ok(profile)
}

/// Called on registration
pub async fn create(user_id: &str, display_name: Option<String>) -> anyhow::Result<()> {
    let display_name = display_name
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty());
    repository::upsert(
        get_connection(),
        &UserProfile {
            id: user_id.to_string(),
            display_name,
        },
    )
    .await
}
