use anyhow::{Context, Result};
use chrono::Utc;
use contracts::system::auth::TokenClaims;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use once_cell::sync::OnceCell;
use rand::Rng;
use sea_orm::{ConnectionTrait, DatabaseBackend, DatabaseConnection, Statement};

use crate::shared::config;
use crate::shared::data::db::get_connection;

const JWT_SECRET_KEY: &str = "jwt_secret";

static SECRET: OnceCell<String> = OnceCell::new();

/// Generate JWT access token, lifetime from `[auth] access_token_hours`
pub async fn generate_access_token(user_id: &str, username: &str, is_admin: bool) -> Result<String> {
    let secret = get_jwt_secret().await?;
    let hours = config::get().auth.access_token_hours;
    encode_access_token(&secret, user_id, username, is_admin, hours)
}

/// Validate JWT token and extract claims
pub async fn validate_token(token: &str) -> Result<TokenClaims> {
    let secret = get_jwt_secret().await?;
    decode_access_token(&secret, token)
}

pub fn encode_access_token(
    secret: &str,
    user_id: &str,
    username: &str,
    is_admin: bool,
    lifetime_hours: i64,
) -> Result<String> {
    let now = Utc::now();
    let claims = TokenClaims {
        sub: user_id.to_string(),
        username: username.to_string(),
        is_admin,
        exp: (now + chrono::Duration::hours(lifetime_hours)).timestamp() as usize,
        iat: now.timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .context("Failed to encode JWT token")
}

pub fn decode_access_token(secret: &str, token: &str) -> Result<TokenClaims> {
    let token_data = decode::<TokenClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .context("Failed to decode JWT token")?;

    Ok(token_data.claims)
}

/// Generate refresh token (UUID-based)
pub fn generate_refresh_token() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// JWT secret, loaded from `sys_settings` once and created on first start
pub async fn get_jwt_secret() -> Result<String> {
    if let Some(secret) = SECRET.get() {
        return Ok(secret.clone());
    }
    let secret = load_or_create_secret(get_connection()).await?;
    Ok(SECRET.get_or_init(|| secret).clone())
}

async fn load_or_create_secret(db: &DatabaseConnection) -> Result<String> {
    if let Some(secret) = get_jwt_secret_from_db(db).await? {
        return Ok(secret);
    }
    let secret = generate_jwt_secret();
    save_jwt_secret_to_db(db, &secret).await?;
    tracing::info!("Generated new JWT secret");
    Ok(secret)
}

/// Generate a cryptographically secure JWT secret (256 bits)
fn generate_jwt_secret() -> String {
    use base64::{engine::general_purpose, Engine as _};
    let mut rng = rand::thread_rng();
    let random_bytes: Vec<u8> = (0..32).map(|_| rng.gen::<u8>()).collect();
    general_purpose::STANDARD.encode(&random_bytes)
}

async fn get_jwt_secret_from_db(db: &DatabaseConnection) -> Result<Option<String>> {
    let result = db
        .query_one(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "SELECT value FROM sys_settings WHERE key = ?",
            [JWT_SECRET_KEY.into()],
        ))
        .await?;

    match result {
        Some(row) => Ok(Some(row.try_get("", "value")?)),
        None => Ok(None),
    }
}

async fn save_jwt_secret_to_db(db: &DatabaseConnection, secret: &str) -> Result<()> {
    let now = Utc::now().to_rfc3339();

    db.execute(Statement::from_sql_and_values(
        DatabaseBackend::Sqlite,
        "INSERT OR REPLACE INTO sys_settings (key, value, description, created_at, updated_at)
         VALUES (?, ?, ?, ?, ?)",
        [
            JWT_SECRET_KEY.into(),
            secret.to_string().into(),
            "Auto-generated JWT secret for authentication".into(),
            now.clone().into(),
            now.into(),
        ],
    ))
    .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::db::connect_in_memory;

    #[test]
    fn test_token_round_trip() {
        let token = encode_access_token("secret", "u1", "taro", false, 1).unwrap();
        let claims = decode_access_token("secret", &token).unwrap();
        assert_eq!(claims.sub, "u1");
        assert_eq!(claims.username, "taro");
        assert!(!claims.is_admin);
    }

    #[test]
    fn test_token_rejected_with_other_secret() {
        let token = encode_access_token("secret", "u1", "taro", true, 1).unwrap();
        assert!(decode_access_token("other", &token).is_err());
    }

    #[test]
    fn test_expired_token_rejected() {
        let token = encode_access_token("secret", "u1", "taro", false, -2).unwrap();
        assert!(decode_access_token("secret", &token).is_err());
    }

    #[tokio::test]
    async fn test_secret_is_persisted() {
        let db = connect_in_memory().await.unwrap();
        let first = load_or_create_secret(&db).await.unwrap();
        let second = load_or_create_secret(&db).await.unwrap();
        assert_eq!(first, second);
    }
}
