use anyhow::Result;

use crate::shared::config;
use crate::shared::data::db::get_connection;
use crate::system::users::{repository, service};

/// Create the configured admin account when no admin exists yet
pub async fn ensure_admin_user_exists() -> Result<()> {
    let db = get_connection();
    if repository::count_admins(db).await? > 0 {
        return Ok(());
    }

    let auth = &config::get().auth;
    tracing::info!("No admin user found. Creating '{}'...", auth.admin_username);

    let admin = service::create(db, &auth.admin_username, &auth.admin_password, true).await?;
    crate::domain::a004_user_profile::service::create(&admin.id, Some(admin.username.clone())).await?;

    tracing::warn!("Default admin user '{}' created (id {})", admin.username, admin.id);
    tracing::warn!("Change the admin password in config.toml before exposing the server");

    Ok(())
}
