use contracts::dashboards::d400_monthly_ranking::{MonthlyRankingRequest, MonthlyRankingResponse};
use contracts::shared::calendar::CalendarMonth;

use super::aggregator::{compute_ranking, RankingError, RankingOptions};
use super::sources::{StoredProfiles, StoredVisits};
use crate::shared::config;
use crate::shared::data::db::get_connection;
use sea_orm::DatabaseConnection;

fn ranking_options() -> RankingOptions {
    let cfg = &config::get().ranking;
    RankingOptions {
        top_n: cfg.top_n,
        fallback_display_name: cfg.fallback_display_name.clone(),
        offset: cfg.utc_offset(),
    }
}

/// Month containing "now" in the ranking calendar
pub fn current_month() -> CalendarMonth {
    CalendarMonth::current(config::get().ranking.utc_offset())
}

/// Get the visit leaderboard of one month
pub async fn get_monthly_ranking(month: CalendarMonth) -> Result<MonthlyRankingResponse, RankingError> {
    monthly_ranking(get_connection(), month, &ranking_options(), current_month()).await
}

/// Leaderboard of `month` read from `db`; `this_month` marks the current month
pub async fn monthly_ranking(
    db: &DatabaseConnection,
    month: CalendarMonth,
    options: &RankingOptions,
    this_month: CalendarMonth,
) -> Result<MonthlyRankingResponse, RankingError> {
    let entries = compute_ranking(
        month,
        options,
        &StoredVisits { db },
        &StoredProfiles { db },
    )
    .await?;

    Ok(MonthlyRankingResponse {
        period: month.period(),
        is_current_month: month == this_month,
        entries,
    })
}

pub fn current_month_request() -> MonthlyRankingRequest {
    MonthlyRankingRequest::for_month(current_month())
}
