use contracts::domain::a002_visit::{ToggleVisitResponse, VisitRecord};

use crate::shared::api_utils::{get_json, post_empty};

pub async fn toggle_visit(shop_id: &str) -> Result<ToggleVisitResponse, String> {
    post_empty(&format!("/api/visits/{}/toggle", shop_id)).await
}

pub async fn fetch_my_visits() -> Result<Vec<VisitRecord>, String> {
    get_json("/api/visits/mine").await
}

pub async fn fetch_visited_ids() -> Result<Vec<String>, String> {
    get_json("/api/visits/mine/ids").await
}
