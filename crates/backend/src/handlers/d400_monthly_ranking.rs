use axum::{
    extract::Query,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use contracts::dashboards::d400_monthly_ranking::{
    MonthlyRankingRequest, MonthlyRankingResponse, RankingErrorResponse,
};

use crate::dashboards::d400_monthly_ranking::aggregator::RankingError;
use crate::dashboards::d400_monthly_ranking::service;

/// GET /api/d400/monthly_ranking?year=2025&month=1
pub async fn get_monthly_ranking(Query(request): Query<MonthlyRankingRequest>) -> Response {
    let month = match request.to_month() {
        Ok(month) => month,
        Err(e) => {
            tracing::warn!("D400 Ranking: bad month {}-{}: {}", request.year, request.month, e);
            return bad_month_response(e);
        }
    };

    tracing::info!("D400 Ranking: computing ranking for {}", month);

    ranking_response(service::get_monthly_ranking(month).await)
}

/// 200 with the leaderboard, or 503 when the store could not be read
fn ranking_response(result: Result<MonthlyRankingResponse, RankingError>) -> Response {
    match result {
        Ok(response) => {
            tracing::info!(
                "D400 Ranking: returning {} entries for {}",
                response.entries.len(),
                response.period
            );
            Json(response).into_response()
        }
        Err(e) => {
            tracing::error!("D400 Ranking: failed: {}", e);
            error_response(&e)
        }
    }
}

fn bad_month_response(error: String) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(RankingErrorResponse {
            error,
            retryable: false,
        }),
    )
        .into_response()
}

fn error_response(error: &RankingError) -> Response {
    (
        StatusCode::SERVICE_UNAVAILABLE,
        Json(RankingErrorResponse {
            error: error.to_string(),
            retryable: true,
        }),
    )
        .into_response()
}

/// GET /api/d400/current_month
pub async fn get_current_month() -> Json<MonthlyRankingRequest> {
    Json(service::current_month_request())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboards::d400_monthly_ranking::aggregator::RankingOptions;
    use crate::shared::data::db::connect_in_memory;
    use chrono::FixedOffset;
    use contracts::shared::calendar::CalendarMonth;

    async fn body_json<T: serde::de::DeserializeOwned>(response: Response) -> T {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_bad_month_is_400_and_not_retryable() {
        let error = MonthlyRankingRequest { year: 2025, month: 13 }
            .to_month()
            .unwrap_err();
        let response = bad_month_response(error);

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: RankingErrorResponse = body_json(response).await;
        assert!(!body.retryable);
        assert!(body.error.contains("13"));
    }

    #[tokio::test]
    async fn test_ranking_failure_is_503_and_retryable() {
        let response = ranking_response(Err(RankingError::SourceUnavailable("disk I/O error".into())));

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        let body: RankingErrorResponse = body_json(response).await;
        assert!(body.retryable);
        assert!(body.error.contains("disk I/O error"));
    }

    #[tokio::test]
    async fn test_empty_month_is_200_with_no_entries() {
        let db = connect_in_memory().await.unwrap();
        let month = CalendarMonth::new(2025, 2).unwrap();
        let options = RankingOptions {
            top_n: 10,
            fallback_display_name: "匿名ユーザー".into(),
            offset: FixedOffset::east_opt(9 * 3600).unwrap(),
        };

        let result = service::monthly_ranking(&db, month, &options, month).await;
        let response = ranking_response(result);

        assert_eq!(response.status(), StatusCode::OK);
        let body: MonthlyRankingResponse = body_json(response).await;
        assert_eq!(body.period, "2025-02");
        assert!(body.is_current_month);
        assert!(body.entries.is_empty());
    }
}
