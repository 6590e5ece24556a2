//! View-state of the ranking page.
//!
//! The page holds one immutable `RankingViewState`; every user action or
//! fetch outcome is a `RankingEvent` folded in with `apply`. Each month
//! selection gets a fresh request sequence number and outcomes carrying an
//! older number are dropped, so a slow response for a month the user already
//! left can never overwrite the current one.

use contracts::dashboards::d400_monthly_ranking::RankedEntry;
use contracts::shared::calendar::{shift_month, CalendarMonth};

#[derive(Debug, Clone, PartialEq)]
pub enum LoadStatus {
    Loading,
    Loaded(Vec<RankedEntry>),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum RankingEvent {
    /// ◀ (-1) or ▶ (+1)
    MonthChanged(i32),
    /// The server told us which month is current
    ThisMonthKnown(CalendarMonth),
    RowToggled(String),
    Retry,
    DataFetched {
        seq: u64,
        entries: Vec<RankedEntry>,
        /// Server says the fetched month is its current month
        is_current_month: bool,
    },
    FetchFailed { seq: u64, error: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct RankingViewState {
    month: CalendarMonth,
    this_month: CalendarMonth,
    request_seq: u64,
    status: LoadStatus,
    open_visitor: Option<String>,
}

impl RankingViewState {
    /// Starts on `this_month`, loading
    pub fn new(this_month: CalendarMonth) -> Self {
        Self {
            month: this_month,
            this_month,
            request_seq: 1,
            status: LoadStatus::Loading,
            open_visitor: None,
        }
    }

    pub fn month(&self) -> CalendarMonth {
        self.month
    }

    /// Sequence number the current fetch must carry
    pub fn request_seq(&self) -> u64 {
        self.request_seq
    }

    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    pub fn is_open(&self, visitor_id: &str) -> bool {
        self.open_visitor.as_deref() == Some(visitor_id)
    }

    pub fn can_go_next(&self) -> bool {
        self.month < self.this_month
    }

    pub fn apply(self, event: RankingEvent) -> Self {
        match event {
            RankingEvent::MonthChanged(delta) => {
                let next = shift_month(self.month, delta, self.this_month);
                if next == self.month {
                    self
                } else {
                    self.reload(next)
                }
            }
            RankingEvent::ThisMonthKnown(this_month) => {
                // follow the server while the user is still on the initial month,
                // and never stay past it
                let untouched = self.month == self.this_month;
                let follow = self.month != this_month && (untouched || self.month > this_month);
                let state = Self { this_month, ..self };
                if follow {
                    state.reload(this_month)
                } else {
                    state
                }
            }
            RankingEvent::RowToggled(visitor_id) => {
                let open_visitor = if self.is_open(&visitor_id) {
                    None
                } else {
                    Some(visitor_id)
                };
                Self { open_visitor, ..self }
            }
            RankingEvent::Retry => {
                let month = self.month;
                self.reload(month)
            }
            RankingEvent::DataFetched {
                seq,
                entries,
                is_current_month,
            } if seq == self.request_seq => Self {
                this_month: if is_current_month { self.month } else { self.this_month },
                status: LoadStatus::Loaded(entries),
                ..self
            },
            RankingEvent::FetchFailed { seq, error } if seq == self.request_seq => Self {
                status: LoadStatus::Failed(error),
                ..self
            },
            // stale outcome of an abandoned request
            RankingEvent::DataFetched { .. } | RankingEvent::FetchFailed { .. } => self,
        }
    }

    fn reload(self, month: CalendarMonth) -> Self {
        Self {
            month,
            request_seq: self.request_seq + 1,
            status: LoadStatus::Loading,
            open_visitor: None,
            ..self
        }
    }
}

/// "1位"
pub fn rank_label(rank: u32) -> String {
    format!("{}位", rank)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn month(y: i32, m: u32) -> CalendarMonth {
        CalendarMonth::new(y, m).unwrap()
    }

    fn entry(visitor: &str, rank: u32, count: u32) -> RankedEntry {
        RankedEntry {
            rank,
            visitor_id: visitor.into(),
            display_name: visitor.to_uppercase(),
            visit_count: count,
            shop_names: vec!["ramen".into(); count as usize],
        }
    }

    #[test]
    fn test_next_month_is_clamped() {
        let state = RankingViewState::new(month(2025, 3));
        let seq = state.request_seq();

        let state = state.apply(RankingEvent::MonthChanged(1));

        assert_eq!(state.month(), month(2025, 3));
        assert_eq!(state.request_seq(), seq);
        assert!(!state.can_go_next());
    }

    #[test]
    fn test_previous_month_starts_new_request() {
        let state = RankingViewState::new(month(2025, 1))
            .apply(RankingEvent::DataFetched { seq: 1, entries: vec![entry("a", 1, 2)], is_current_month: true })
            .apply(RankingEvent::RowToggled("a".into()))
            .apply(RankingEvent::MonthChanged(-1));

        assert_eq!(state.month(), month(2024, 12));
        assert_eq!(state.request_seq(), 2);
        assert_eq!(state.status(), &LoadStatus::Loading);
        assert!(!state.is_open("a"));
        assert!(state.can_go_next());
    }

    #[test]
    fn test_stale_response_is_ignored() {
        let state = RankingViewState::new(month(2025, 3)).apply(RankingEvent::MonthChanged(-1));
        assert_eq!(state.request_seq(), 2);

        // the response for March arrives after the user moved to February
        let state = state.apply(RankingEvent::DataFetched { seq: 1, entries: vec![entry("late", 1, 9)], is_current_month: true });
        assert_eq!(state.status(), &LoadStatus::Loading);

        let state = state.apply(RankingEvent::DataFetched { seq: 2, entries: vec![], is_current_month: false });
        assert_eq!(state.status(), &LoadStatus::Loaded(vec![]));
    }

    #[test]
    fn test_failure_then_retry() {
        let state = RankingViewState::new(month(2025, 3))
            .apply(RankingEvent::FetchFailed { seq: 1, error: "503".into() });
        assert_eq!(state.status(), &LoadStatus::Failed("503".into()));

        let state = state.apply(RankingEvent::Retry);
        assert_eq!(state.status(), &LoadStatus::Loading);
        assert_eq!(state.request_seq(), 2);
        assert_eq!(state.month(), month(2025, 3));
    }

    #[test]
    fn test_only_one_row_open() {
        let state = RankingViewState::new(month(2025, 3))
            .apply(RankingEvent::RowToggled("a".into()))
            .apply(RankingEvent::RowToggled("b".into()));
        assert!(state.is_open("b"));
        assert!(!state.is_open("a"));

        let state = state.apply(RankingEvent::RowToggled("b".into()));
        assert!(!state.is_open("b"));
    }

    #[test]
    fn test_server_month_clamps_client_clock() {
        // client clock is ahead of the server
        let state = RankingViewState::new(month(2025, 4)).apply(RankingEvent::ThisMonthKnown(month(2025, 3)));
        assert_eq!(state.month(), month(2025, 3));
        assert_eq!(state.request_seq(), 2);

        let same = state.clone().apply(RankingEvent::ThisMonthKnown(month(2025, 3)));
        assert_eq!(same, state);
    }

    #[test]
    fn test_server_month_ahead_moves_initial_view() {
        // browser still in March, server already in April
        let state = RankingViewState::new(month(2025, 3)).apply(RankingEvent::ThisMonthKnown(month(2025, 4)));
        assert_eq!(state.month(), month(2025, 4));
        assert_eq!(state.request_seq(), 2);
        assert_eq!(state.status(), &LoadStatus::Loading);
        assert!(!state.can_go_next());
    }

    #[test]
    fn test_server_month_ahead_keeps_navigated_month() {
        let state = RankingViewState::new(month(2025, 3))
            .apply(RankingEvent::MonthChanged(-1))
            .apply(RankingEvent::ThisMonthKnown(month(2025, 4)));
        assert_eq!(state.month(), month(2025, 2));
        assert_eq!(state.request_seq(), 2);
        assert!(state.can_go_next());
    }

    #[test]
    fn test_fetched_current_month_disables_next() {
        // browser clock behind: it thinks February is current
        let state = RankingViewState::new(month(2025, 2)).apply(RankingEvent::MonthChanged(-1));
        assert!(state.can_go_next());

        let state = state.apply(RankingEvent::DataFetched {
            seq: 2,
            entries: vec![],
            is_current_month: true,
        });
        assert!(!state.can_go_next());
        assert_eq!(state.month(), month(2025, 1));
    }

    #[test]
    fn test_rank_label() {
        assert_eq!(rank_label(1), "1位");
    }
}
