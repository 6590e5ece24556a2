//! Calendar helpers for the UI. Months are cut in Japan time.

use chrono::{DateTime, FixedOffset, Offset, Utc};
use contracts::shared::calendar::CalendarMonth;

/// JST, the calendar the ranking months are cut in
pub fn jst() -> FixedOffset {
    FixedOffset::east_opt(9 * 3600).unwrap_or_else(|| Utc.fix())
}

/// Month containing "now" in JST
pub fn this_month() -> CalendarMonth {
    CalendarMonth::current(jst())
}

/// "2025年1月"
pub fn month_label(month: CalendarMonth) -> String {
    format!("{}年{}月", month.year(), month.month())
}

/// "2025/01/31 09:05" in JST
pub fn format_datetime_jst(at: DateTime<Utc>) -> String {
    at.with_timezone(&jst()).format("%Y/%m/%d %H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_month_label() {
        let month = CalendarMonth::new(2025, 1).unwrap();
        assert_eq!(month_label(month), "2025年1月");
    }

    #[test]
    fn test_format_datetime_jst() {
        let at = Utc.with_ymd_and_hms(2025, 1, 31, 15, 5, 0).unwrap();
        assert_eq!(format_datetime_jst(at), "2025/02/01 00:05");
    }
}
