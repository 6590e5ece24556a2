use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::{handlers, system};
use system::auth::middleware::{require_admin, require_auth};

/// All API routes of the application
pub fn configure_routes() -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        // ========================================
        // SYSTEM AUTH ROUTES (PUBLIC)
        // ========================================
        .route(
            "/api/system/auth/register",
            post(system::handlers::auth::register),
        )
        .route("/api/system/auth/login", post(system::handlers::auth::login))
        .route(
            "/api/system/auth/refresh",
            post(system::handlers::auth::refresh),
        )
        .route(
            "/api/system/auth/logout",
            post(system::handlers::auth::logout),
        )
        .route(
            "/api/system/auth/me",
            get(system::handlers::auth::current_user).layer(middleware::from_fn(require_auth)),
        )
        // ========================================
        // A001 SHOPS
        // ========================================
        .route("/api/shops", get(handlers::a001_shop::list_all))
        .route(
            "/api/shops",
            post(handlers::a001_shop::upsert).layer(middleware::from_fn(require_admin)),
        )
        .route("/api/shops/catalog", get(handlers::a001_shop::catalog))
        .route("/api/shops/landmark", get(handlers::a001_shop::get_landmark))
        .route(
            "/api/shops/genre/:genre",
            get(handlers::a001_shop::list_by_genre),
        )
        .route(
            "/api/shops/station/:station",
            get(handlers::a001_shop::list_by_station),
        )
        .route("/api/shops/:id", get(handlers::a001_shop::get_by_id))
        // ========================================
        // A002 VISITS / A003 BOOKMARKS / A004 PROFILE (signed in)
        // ========================================
        .merge(user_routes().layer(middleware::from_fn(require_auth)))
        // ========================================
        // D400 MONTHLY RANKING
        // ========================================
        .route(
            "/api/d400/monthly_ranking",
            get(handlers::d400_monthly_ranking::get_monthly_ranking),
        )
        .route(
            "/api/d400/current_month",
            get(handlers::d400_monthly_ranking::get_current_month),
        )
}

fn user_routes() -> Router {
    Router::new()
        .route(
            "/api/visits/:shop_id/toggle",
            post(handlers::a002_visit::toggle),
        )
        .route("/api/visits/mine", get(handlers::a002_visit::list_mine))
        .route(
            "/api/visits/mine/ids",
            get(handlers::a002_visit::list_mine_ids),
        )
        .route(
            "/api/bookmarks/:shop_id/toggle",
            post(handlers::a003_bookmark::toggle),
        )
        .route("/api/bookmarks/mine", get(handlers::a003_bookmark::list_mine))
        .route(
            "/api/bookmarks/mine/ids",
            get(handlers::a003_bookmark::list_mine_ids),
        )
        .route(
            "/api/profile",
            get(handlers::a004_user_profile::get_mine).put(handlers::a004_user_profile::update_mine),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_router_builds_with_auth_layers() {
        // Layers only type-check when the middleware futures are Send
        let _router: Router = configure_routes();
    }
}
