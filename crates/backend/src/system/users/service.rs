use anyhow::Result;
use chrono::Utc;
use contracts::system::users::User;
use sea_orm::DatabaseConnection;

use super::repository;
use crate::system::auth::password;

#[derive(Debug, thiserror::Error)]
pub enum RegistrationError {
    #[error("Username cannot be empty")]
    EmptyUsername,
    #[error("Username already exists")]
    UsernameTaken,
    #[error("{0}")]
    WeakPassword(String),
    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

/// Create an account; returns the new user
pub async fn create(
    db: &DatabaseConnection,
    username: &str,
    plain_password: &str,
    is_admin: bool,
) -> Result<User, RegistrationError> {
    let username = username.trim();
    if username.is_empty() {
        return Err(RegistrationError::EmptyUsername);
    }
    if repository::get_by_username(db, username).await?.is_some() {
        return Err(RegistrationError::UsernameTaken);
    }
    password::validate_password_strength(plain_password)
        .map_err(|e| RegistrationError::WeakPassword(e.to_string()))?;

    let password_hash = password::hash_password(plain_password)?;
    let now = Utc::now().to_rfc3339();
    let user = User {
        id: uuid::Uuid::new_v4().to_string(),
        username: username.to_string(),
        is_active: true,
        is_admin,
        created_at: now.clone(),
        updated_at: now,
        last_login_at: None,
    };
    repository::create_with_password(db, &user, &password_hash).await?;
    tracing::info!("Created user '{}' (admin: {})", user.username, is_admin);

    Ok(user)
}

pub async fn get_by_id(db: &DatabaseConnection, id: &str) -> Result<Option<User>> {
    repository::get_by_id(db, id).await
}

/// Verify user credentials (for login)
pub async fn verify_credentials(db: &DatabaseConnection, username: &str, plain_password: &str) -> Result<Option<User>> {
    let user = match repository::get_by_username(db, username.trim()).await? {
        Some(u) => u,
        None => return Ok(None),
    };

    if !user.is_active {
        tracing::warn!("Login attempt for inactive user '{}'", user.username);
        return Ok(None);
    }

    let password_hash = repository::get_password_hash(db, &user.id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Password hash not found"))?;

    if !password::verify_password(plain_password, &password_hash)? {
        return Ok(None);
    }

    if let Err(e) = repository::update_last_login(db, &user.id).await {
        tracing::warn!("Failed to update last login of {}: {}", user.id, e);
    }

    Ok(Some(user))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::db::connect_in_memory;

    #[tokio::test]
    async fn test_register_and_login() {
        let db = connect_in_memory().await.unwrap();
        let user = create(&db, " taro ", "password123", false).await.unwrap();
        assert_eq!(user.username, "taro");

        let found = verify_credentials(&db, "taro", "password123").await.unwrap();
        assert_eq!(found.map(|u| u.id), Some(user.id));
        assert!(verify_credentials(&db, "taro", "wrong-pass").await.unwrap().is_none());
        assert!(verify_credentials(&db, "nobody", "password123").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_register_rejects_duplicates_and_weak_passwords() {
        let db = connect_in_memory().await.unwrap();
        create(&db, "hanako", "password123", false).await.unwrap();

        assert!(matches!(
            create(&db, "hanako", "password456", false).await,
            Err(RegistrationError::UsernameTaken)
        ));
        assert!(matches!(
            create(&db, "jiro", "short", false).await,
            Err(RegistrationError::WeakPassword(_))
        ));
        assert!(matches!(
            create(&db, "  ", "password123", false).await,
            Err(RegistrationError::EmptyUsername)
        ));
    }
}
