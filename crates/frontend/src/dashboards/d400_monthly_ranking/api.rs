use contracts::dashboards::d400_monthly_ranking::{MonthlyRankingRequest, MonthlyRankingResponse};
use contracts::shared::calendar::CalendarMonth;

use crate::shared::api_utils::get_json;

/// Leaderboard of one month
pub async fn get_monthly_ranking(month: CalendarMonth) -> Result<MonthlyRankingResponse, String> {
    get_json(&format!(
        "/api/d400/monthly_ranking?year={}&month={}",
        month.year(),
        month.month()
    ))
    .await
}

/// The server's current month, used to clamp forward navigation
pub async fn get_current_month() -> Result<CalendarMonth, String> {
    let request: MonthlyRankingRequest = get_json("/api/d400/current_month").await?;
    request.to_month()
}
