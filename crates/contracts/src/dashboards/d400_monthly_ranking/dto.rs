use serde::{Deserialize, Serialize};

use crate::shared::calendar::CalendarMonth;

/// Request for the monthly visit ranking
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MonthlyRankingRequest {
    pub year: i32,
    pub month: u32,
}

impl MonthlyRankingRequest {
    pub fn for_month(month: CalendarMonth) -> Self {
        Self {
            year: month.year(),
            month: month.month(),
        }
    }

    pub fn to_month(&self) -> Result<CalendarMonth, String> {
        CalendarMonth::new(self.year, self.month)
    }
}

/// Response for the monthly visit ranking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyRankingResponse {
    /// Period in format "YYYY-MM"
    pub period: String,
    /// The requested month is the server's current month (no "next" arrow)
    pub is_current_month: bool,
    /// Highest visit count first; empty when nobody visited anything
    pub entries: Vec<RankedEntry>,
}

/// One leaderboard row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedEntry {
    /// Competition rank: ties share the rank, the next count resumes at its position
    pub rank: u32,
    pub visitor_id: String,
    pub display_name: String,
    pub visit_count: u32,
    /// Visited shops in the order the store returned them, duplicates kept
    pub shop_names: Vec<String>,
}

/// Error body returned when the ranking could not be computed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingErrorResponse {
    pub error: String,
    /// Caller may retry the same request later
    pub retryable: bool,
}
