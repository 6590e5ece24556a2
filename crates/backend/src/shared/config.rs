use chrono::{FixedOffset, Offset, Utc};
use once_cell::sync::OnceCell;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub ranking: RankingConfig,
    #[serde(default)]
    pub auth: AuthConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub path: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,
    /// Built frontend bundle served at `/`
    pub static_dir: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct RankingConfig {
    /// Leaderboard length
    pub top_n: usize,
    /// Shown for visitors without a profile
    pub fallback_display_name: String,
    /// Offset of the calendar months are cut in, minutes east of UTC
    pub utc_offset_minutes: i32,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AuthConfig {
    pub access_token_hours: i64,
    pub refresh_token_days: i64,
    /// Bootstrap administrator, created on first start
    pub admin_username: String,
    pub admin_password: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            static_dir: "dist".to_string(),
        }
    }
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            top_n: 10,
            fallback_display_name: "匿名ユーザー".to_string(),
            utc_offset_minutes: 9 * 60,
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            access_token_hours: 24,
            refresh_token_days: 90,
            admin_username: "admin".to_string(),
            admin_password: "admin1234".to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: DatabaseConfig {
                path: "target/db/gourmet.db".to_string(),
            },
            server: ServerConfig::default(),
            ranking: RankingConfig::default(),
            auth: AuthConfig::default(),
        }
    }
}

impl RankingConfig {
    pub fn utc_offset(&self) -> FixedOffset {
        FixedOffset::east_opt(self.utc_offset_minutes * 60).unwrap_or_else(|| {
            tracing::warn!(
                "utc_offset_minutes={} is out of range, falling back to UTC",
                self.utc_offset_minutes
            );
            Utc.fix()
        })
    }
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[database]
path = "target/db/gourmet.db"
"#;

static CONFIG: OnceCell<Config> = OnceCell::new();

/// Install the configuration loaded at startup
pub fn init(config: Config) {
    if CONFIG.set(config).is_err() {
        tracing::warn!("Configuration already initialized, keeping the first one");
    }
}

/// Active configuration; defaults when `init` was never called (tests)
pub fn get() -> &'static Config {
    CONFIG.get_or_init(Config::default)
}

/// Load configuration from config.toml file
///
/// Search order:
/// 1. Next to the executable (for production)
/// 2. Falls back to embedded default config
pub fn load_config() -> anyhow::Result<Config> {
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let config_path = exe_dir.join("config.toml");

            if config_path.exists() {
                tracing::info!("Loading config from: {}", config_path.display());
                let contents = std::fs::read_to_string(&config_path)?;
                let config: Config = toml::from_str(&contents)?;
                return Ok(config);
            } else {
                tracing::warn!("config.toml not found at: {}", config_path.display());
            }
        }
    }

    tracing::info!("Using default embedded configuration");
    let config: Config = toml::from_str(DEFAULT_CONFIG)?;
    Ok(config)
}

/// Get the database file path from configuration
/// Resolves relative paths relative to the executable directory
pub fn get_database_path(config: &Config) -> anyhow::Result<PathBuf> {
    let db_path_str = &config.database.path;
    let db_path = Path::new(db_path_str);

    if db_path.is_absolute() {
        return Ok(db_path.to_path_buf());
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            return Ok(exe_dir.join(db_path));
        }
    }

    Ok(PathBuf::from(db_path_str))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config: Result<Config, _> = toml::from_str(DEFAULT_CONFIG);
        assert!(config.is_ok());
        let config = config.unwrap();
        assert_eq!(config.database.path, "target/db/gourmet.db");
        assert_eq!(config.ranking.top_n, 10);
        assert_eq!(config.ranking.fallback_display_name, "匿名ユーザー");
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn test_partial_sections_keep_defaults() {
        let config: Config = toml::from_str(
            r#"
            [database]
            path = "/tmp/x.db"
            [ranking]
            top_n = 3
            "#,
        )
        .unwrap();
        assert_eq!(config.ranking.top_n, 3);
        assert_eq!(config.ranking.utc_offset_minutes, 540);
        assert_eq!(config.auth.refresh_token_days, 90);
        assert_eq!(
            get_database_path(&config).unwrap(),
            PathBuf::from("/tmp/x.db")
        );
    }

    #[test]
    fn test_utc_offset() {
        let ranking = RankingConfig::default();
        assert_eq!(ranking.utc_offset().local_minus_utc(), 9 * 3600);

        let broken = RankingConfig {
            utc_offset_minutes: 100_000,
            ..RankingConfig::default()
        };
        assert_eq!(broken.utc_offset().local_minus_utc(), 0);
    }
}
