//! Calendar months and the half-open time ranges they cover.
//!
//! Months are cut in a fixed local offset (the app runs in JST by default),
//! so the same `CalendarMonth` always maps to the same UTC interval.

use chrono::{DateTime, Datelike, Duration, FixedOffset, NaiveDate, NaiveTime, TimeZone, Utc};
use std::fmt;
use std::str::FromStr;

/// A calendar month (year + month number 1..=12)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarMonth {
    year: i32,
    month: u32,
}

impl CalendarMonth {
    pub fn new(year: i32, month: u32) -> Result<Self, String> {
        if !(1..=12).contains(&month) {
            return Err(format!("Invalid month: {}", month));
        }
        if NaiveDate::from_ymd_opt(year, month, 1).is_none() {
            return Err(format!("Invalid year: {}", year));
        }
        Ok(Self { year, month })
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// The month "now" falls into, seen from the given offset
    pub fn current(offset: FixedOffset) -> Self {
        Self::from_date(Utc::now().with_timezone(&offset).date_naive())
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or_default()
    }

    /// Add `delta` months; `None` when the result leaves chrono's date range
    pub fn checked_shift(&self, delta: i32) -> Option<Self> {
        let index = self.year as i64 * 12 + (self.month as i64 - 1) + delta as i64;
        let year = i32::try_from(index.div_euclid(12)).ok()?;
        let month = index.rem_euclid(12) as u32 + 1;
        Self::new(year, month).ok()
    }

    /// "YYYY-MM"
    pub fn period(&self) -> String {
        format!("{:04}-{:02}", self.year, self.month)
    }

    /// `[first day 00:00, first day of next month 00:00)` in `offset`, as UTC
    pub fn range(&self, offset: FixedOffset) -> MonthRange {
        let next = self.checked_shift(1).unwrap_or(*self);
        MonthRange {
            start: local_midnight_to_utc(self.first_day(), offset),
            end: local_midnight_to_utc(next.first_day(), offset),
        }
    }
}

fn local_midnight_to_utc(date: NaiveDate, offset: FixedOffset) -> DateTime<Utc> {
    let local = date.and_time(NaiveTime::MIN);
    let shift = Duration::seconds(offset.local_minus_utc() as i64);
    Utc.from_utc_datetime(&(local - shift))
}

impl fmt::Display for CalendarMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for CalendarMonth {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (year, month) = s
            .trim()
            .split_once('-')
            .ok_or_else(|| anyhow::anyhow!("Expected YYYY-MM, got '{}'", s))?;
        let year: i32 = year.parse()?;
        let month: u32 = month.parse()?;
        CalendarMonth::new(year, month).map_err(|e| anyhow::anyhow!(e))
    }
}

/// Move `current` by `delta` months, refusing to go past `this_month`.
///
/// Going back is unbounded; a step that would land after `this_month`
/// returns `current` unchanged.
pub fn shift_month(current: CalendarMonth, delta: i32, this_month: CalendarMonth) -> CalendarMonth {
    match current.checked_shift(delta) {
        Some(next) if next <= this_month => next,
        _ => current,
    }
}

/// Half-open UTC interval `[start, end)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl MonthRange {
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.start <= at && at < self.end
    }

    pub fn start_ms(&self) -> i64 {
        self.start.timestamp_millis()
    }

    pub fn end_ms(&self) -> i64 {
        self.end.timestamp_millis()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jst() -> FixedOffset {
        FixedOffset::east_opt(9 * 3600).unwrap()
    }

    fn month(year: i32, month: u32) -> CalendarMonth {
        CalendarMonth::new(year, month).unwrap()
    }

    #[test]
    fn test_new_rejects_bad_month() {
        assert!(CalendarMonth::new(2025, 0).is_err());
        assert!(CalendarMonth::new(2025, 13).is_err());
        assert!(CalendarMonth::new(2025, 12).is_ok());
    }

    #[test]
    fn test_checked_shift_crosses_years() {
        assert_eq!(month(2025, 1).checked_shift(-1), Some(month(2024, 12)));
        assert_eq!(month(2024, 12).checked_shift(1), Some(month(2025, 1)));
        assert_eq!(month(2025, 3).checked_shift(-27), Some(month(2022, 12)));
        assert_eq!(month(2025, 3).checked_shift(0), Some(month(2025, 3)));
    }

    #[test]
    fn test_shift_month_clamps_at_this_month() {
        let now = month(2025, 6);
        assert_eq!(shift_month(now, 1, now), now);
        assert_eq!(shift_month(month(2025, 5), 2, now), month(2025, 5));
        assert_eq!(shift_month(month(2025, 5), 1, now), now);
        assert_eq!(shift_month(now, -1, now), month(2025, 5));
        assert_eq!(shift_month(month(1990, 1), -1, now), month(1989, 12));
    }

    #[test]
    fn test_range_is_half_open_in_local_time() {
        let range = month(2025, 3).range(jst());
        // 2025-03-01 00:00 JST == 2025-02-28 15:00 UTC
        assert_eq!(range.start, Utc.with_ymd_and_hms(2025, 2, 28, 15, 0, 0).unwrap());
        assert_eq!(range.end, Utc.with_ymd_and_hms(2025, 3, 31, 15, 0, 0).unwrap());

        let last_ms = range.end - Duration::milliseconds(1);
        assert!(range.contains(range.start));
        assert!(range.contains(last_ms));
        assert!(!range.contains(range.end));
        assert!(!range.contains(range.start - Duration::milliseconds(1)));
    }

    #[test]
    fn test_range_december_rolls_into_next_year() {
        let utc = FixedOffset::east_opt(0).unwrap();
        let range = month(2024, 12).range(utc);
        assert_eq!(range.start, Utc.with_ymd_and_hms(2024, 12, 1, 0, 0, 0).unwrap());
        assert_eq!(range.end, Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap());
        assert_eq!(range.end_ms() - range.start_ms(), 31 * 24 * 3600 * 1000);
    }

    #[test]
    fn test_period_round_trip() {
        let m: CalendarMonth = "2025-04".parse().unwrap();
        assert_eq!(m, month(2025, 4));
        assert_eq!(m.period(), "2025-04");
        assert_eq!(m.to_string(), "2025-04");
        assert!("2025-13".parse::<CalendarMonth>().is_err());
        assert!("april".parse::<CalendarMonth>().is_err());
    }
}
