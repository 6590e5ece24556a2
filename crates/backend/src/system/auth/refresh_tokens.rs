use anyhow::Result;
use chrono::Utc;
use sea_orm::{ConnectionTrait, DatabaseBackend, DatabaseConnection, Statement};

/// Store the sha256 of `token` for `user_id`, valid for `lifetime_days`
pub async fn store(db: &DatabaseConnection, user_id: &str, token: &str, lifetime_days: i64) -> Result<()> {
    let now = Utc::now();
    let expires_at = now + chrono::Duration::days(lifetime_days);

    db.execute(Statement::from_sql_and_values(
        DatabaseBackend::Sqlite,
        "INSERT INTO sys_refresh_tokens (id, user_id, token_hash, expires_at, created_at)
         VALUES (?, ?, ?, ?, ?)",
        [
            uuid::Uuid::new_v4().to_string().into(),
            user_id.to_string().into(),
            hash_token(token).into(),
            expires_at.to_rfc3339().into(),
            now.to_rfc3339().into(),
        ],
    ))
    .await?;

    Ok(())
}

/// User id owning a live (unexpired, unrevoked) token
pub async fn validate(db: &DatabaseConnection, token: &str) -> Result<String> {
    let result = db
        .query_one(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "SELECT user_id FROM sys_refresh_tokens
             WHERE token_hash = ? AND expires_at > ? AND revoked_at IS NULL",
            [hash_token(token).into(), Utc::now().to_rfc3339().into()],
        ))
        .await?;

    match result {
        Some(row) => Ok(row.try_get("", "user_id")?),
        None => Err(anyhow::anyhow!("Invalid or expired refresh token")),
    }
}

pub async fn revoke(db: &DatabaseConnection, token: &str) -> Result<()> {
    db.execute(Statement::from_sql_and_values(
        DatabaseBackend::Sqlite,
        "UPDATE sys_refresh_tokens SET revoked_at = ? WHERE token_hash = ?",
        [Utc::now().to_rfc3339().into(), hash_token(token).into()],
    ))
    .await?;

    Ok(())
}

fn hash_token(token: &str) -> String {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::db::connect_in_memory;

    #[tokio::test]
    async fn test_refresh_token_lifecycle() {
        let db = connect_in_memory().await.unwrap();
        store(&db, "u1", "token-a", 90).await.unwrap();

        assert_eq!(validate(&db, "token-a").await.unwrap(), "u1");
        assert!(validate(&db, "token-b").await.is_err());

        revoke(&db, "token-a").await.unwrap();
        assert!(validate(&db, "token-a").await.is_err());
    }

    #[tokio::test]
    async fn test_expired_refresh_token_rejected() {
        let db = connect_in_memory().await.unwrap();
        store(&db, "u1", "old", -1).await.unwrap();
        assert!(validate(&db, "old").await.is_err());
    }
}
