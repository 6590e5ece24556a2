use once_cell::sync::OnceCell;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, Statement};
use std::path::Path;

static DB_CONN: OnceCell<DatabaseConnection> = OnceCell::new();

/// Collections of the document store, one table each
const SCHEMA: &[(&str, &str)] = &[
    (
        "a001_shop",
        r#"
        CREATE TABLE IF NOT EXISTS a001_shop (
            id TEXT PRIMARY KEY NOT NULL,
            name TEXT NOT NULL,
            genre TEXT NOT NULL DEFAULT '',
            station TEXT NOT NULL DEFAULT '',
            address TEXT NOT NULL DEFAULT '',
            price_range TEXT NOT NULL DEFAULT '',
            latitude REAL,
            longitude REAL,
            business_hours TEXT NOT NULL DEFAULT '[]',
            is_landmark INTEGER NOT NULL DEFAULT 0,
            is_deleted INTEGER NOT NULL DEFAULT 0,
            created_at TEXT,
            updated_at TEXT,
            version INTEGER NOT NULL DEFAULT 0
        );
        "#,
    ),
    (
        "a002_visit",
        r#"
        CREATE TABLE IF NOT EXISTS a002_visit (
            user_id TEXT NOT NULL,
            shop_id TEXT NOT NULL,
            shop_name TEXT NOT NULL,
            visited_at_ms INTEGER NOT NULL,
            PRIMARY KEY (user_id, shop_id)
        );
        "#,
    ),
    (
        "idx_a002_visit_visited_at",
        "CREATE INDEX IF NOT EXISTS idx_a002_visit_visited_at ON a002_visit (visited_at_ms);",
    ),
    (
        "a003_bookmark",
        r#"
        CREATE TABLE IF NOT EXISTS a003_bookmark (
            user_id TEXT NOT NULL,
            shop_id TEXT NOT NULL,
            shop_name TEXT NOT NULL,
            created_at TEXT NOT NULL,
            PRIMARY KEY (user_id, shop_id)
        );
        "#,
    ),
    (
        "a004_user_profile",
        r#"
        CREATE TABLE IF NOT EXISTS a004_user_profile (
            id TEXT PRIMARY KEY NOT NULL,
            display_name TEXT,
            updated_at TEXT NOT NULL
        );
        "#,
    ),
    (
        "sys_users",
        r#"
        CREATE TABLE IF NOT EXISTS sys_users (
            id TEXT PRIMARY KEY NOT NULL,
            username TEXT NOT NULL UNIQUE,
            password_hash TEXT NOT NULL,
            is_active INTEGER NOT NULL DEFAULT 1,
            is_admin INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL,
            last_login_at TEXT
        );
        "#,
    ),
    (
        "sys_refresh_tokens",
        r#"
        CREATE TABLE IF NOT EXISTS sys_refresh_tokens (
            id TEXT PRIMARY KEY NOT NULL,
            user_id TEXT NOT NULL,
            token_hash TEXT NOT NULL,
            expires_at TEXT NOT NULL,
            created_at TEXT NOT NULL,
            revoked_at TEXT
        );
        "#,
    ),
    (
        "sys_settings",
        r#"
        CREATE TABLE IF NOT EXISTS sys_settings (
            key TEXT PRIMARY KEY NOT NULL,
            value TEXT NOT NULL,
            description TEXT,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );
        "#,
    ),
];

/// Open (creating if needed) the SQLite file and install the global connection
pub async fn initialize_database(db_file: &Path) -> anyhow::Result<()> {
    if let Some(parent) = db_file.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let absolute_path = if db_file.is_absolute() {
        db_file.to_path_buf()
    } else {
        std::env::current_dir()?.join(db_file)
    };
    // Normalize path separators and ensure proper URL form on Windows
    let normalized = absolute_path.to_string_lossy().replace('\\', "/");
    let needs_leading_slash = !normalized.starts_with('/') && normalized.contains(':');
    let prefix = if needs_leading_slash { "/" } else { "" };
    let db_url = format!("sqlite://{}{}?mode=rwc", prefix, normalized);

    tracing::info!("Opening database: {}", absolute_path.display());
    let mut options = ConnectOptions::new(db_url);
    options.sqlx_logging(false);
    let conn = Database::connect(options).await?;

    bootstrap_schema(&conn).await?;

    DB_CONN
        .set(conn)
        .map_err(|_| anyhow::anyhow!("Failed to set DB_CONN"))?;
    Ok(())
}

/// Private in-memory store with the full schema.
/// A single pooled connection keeps every query on the same memory database.
pub async fn connect_in_memory() -> anyhow::Result<DatabaseConnection> {
    let mut options = ConnectOptions::new("sqlite::memory:".to_string());
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);
    let conn = Database::connect(options).await?;
    bootstrap_schema(&conn).await?;
    Ok(conn)
}

/// Ensure required tables exist (minimal schema bootstrap)
pub async fn bootstrap_schema(conn: &DatabaseConnection) -> anyhow::Result<()> {
    for (name, sql) in SCHEMA {
        tracing::debug!("Ensuring {}", name);
        conn.execute(Statement::from_string(DatabaseBackend::Sqlite, sql.to_string()))
            .await
            .map_err(|e| anyhow::anyhow!("schema bootstrap failed at {}: {}", name, e))?;
    }
    Ok(())
}

pub fn get_connection() -> &'static DatabaseConnection {
    DB_CONN
        .get()
        .expect("Database connection has not been initialized")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_bootstrap_is_idempotent() {
        let conn = connect_in_memory().await.unwrap();
        bootstrap_schema(&conn).await.unwrap();

        let tables = conn
            .query_all(Statement::from_string(
                DatabaseBackend::Sqlite,
                "SELECT name FROM sqlite_master WHERE type='table' ORDER BY name".to_string(),
            ))
            .await
            .unwrap();
        let names: Vec<String> = tables
            .iter()
            .map(|row| row.try_get("", "name").unwrap())
            .collect();
        for expected in ["a001_shop", "a002_visit", "a003_bookmark", "a004_user_profile", "sys_users"] {
            assert!(names.iter().any(|n| n == expected), "missing table {}", expected);
        }
    }
}
