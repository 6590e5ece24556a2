use async_trait::async_trait;
use chrono::FixedOffset;
use contracts::dashboards::d400_monthly_ranking::RankedEntry;
use contracts::domain::a002_visit::VisitRecord;
use contracts::shared::calendar::{CalendarMonth, MonthRange};
use futures::future::try_join_all;
use std::collections::HashMap;

/// Cross-visitor query over all visit marks
#[async_trait]
pub trait VisitRecordSource: Send + Sync {
    async fn fetch_range(&self, range: &MonthRange) -> anyhow::Result<Vec<VisitRecord>>;
}

/// `Ok(None)` means the visitor has no display name
#[async_trait]
pub trait DisplayNameResolver: Send + Sync {
    async fn resolve(&self, visitor_id: &str) -> anyhow::Result<Option<String>>;
}

#[derive(Debug, thiserror::Error)]
pub enum RankingError {
    #[error("visit store unavailable: {0}")]
    SourceUnavailable(String),
    #[error("display name lookup failed for {visitor_id}: {reason}")]
    ResolverUnavailable { visitor_id: String, reason: String },
}

#[derive(Debug, Clone)]
pub struct RankingOptions {
    pub top_n: usize,
    pub fallback_display_name: String,
    /// Calendar the month is cut in
    pub offset: FixedOffset,
}

/// Visits of one visitor inside the month
#[derive(Debug, Clone, PartialEq)]
pub struct VisitorAggregate {
    pub visitor_id: String,
    pub visit_count: u32,
    pub shop_names: Vec<String>,
}

/// Leaderboard of `month`: top `options.top_n` visitors by visit count.
///
/// Ties on count are ordered by `visitor_id` and share a competition rank.
/// An empty month yields an empty list.
pub async fn compute_ranking(
    month: CalendarMonth,
    options: &RankingOptions,
    source: &dyn VisitRecordSource,
    resolver: &dyn DisplayNameResolver,
) -> Result<Vec<RankedEntry>, RankingError> {
    let range = month.range(options.offset);
    let records = source
        .fetch_range(&range)
        .await
        .map_err(|e| RankingError::SourceUnavailable(e.to_string()))?;

    let mut aggregates = aggregate_visits(records, &range);
    aggregates.sort_by(|a, b| {
        b.visit_count
            .cmp(&a.visit_count)
            .then_with(|| a.visitor_id.cmp(&b.visitor_id))
    });
    aggregates.truncate(options.top_n);

    let names = try_join_all(aggregates.iter().map(|agg| async move {
        resolver
            .resolve(&agg.visitor_id)
            .await
            .map_err(|e| RankingError::ResolverUnavailable {
                visitor_id: agg.visitor_id.clone(),
                reason: e.to_string(),
            })
    }))
    .await?;

    let counts: Vec<u32> = aggregates.iter().map(|a| a.visit_count).collect();
    let ranks = competition_ranks(&counts);

    let entries = aggregates
        .into_iter()
        .zip(names)
        .zip(ranks)
        .map(|((agg, name), rank)| RankedEntry {
            rank,
            display_name: name
                .filter(|n| !n.trim().is_empty())
                .unwrap_or_else(|| options.fallback_display_name.clone()),
            visitor_id: agg.visitor_id,
            visit_count: agg.visit_count,
            shop_names: agg.shop_names,
        })
        .collect();

    Ok(entries)
}

/// Group records per visitor in first-seen order, dropping records outside `range`
pub fn aggregate_visits(records: Vec<VisitRecord>, range: &MonthRange) -> Vec<VisitorAggregate> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut aggregates: Vec<VisitorAggregate> = Vec::new();

    for record in records {
        if !range.contains(record.visited_at) {
            tracing::debug!(
                "Skipping visit of {} at {} outside {}..{}",
                record.visitor_id,
                record.visited_at,
                range.start,
                range.end
            );
            continue;
        }
        match index.get(&record.visitor_id) {
            Some(&i) => {
                aggregates[i].visit_count += 1;
                aggregates[i].shop_names.push(record.shop_name);
            }
            None => {
                index.insert(record.visitor_id.clone(), aggregates.len());
                aggregates.push(VisitorAggregate {
                    visitor_id: record.visitor_id,
                    visit_count: 1,
                    shop_names: vec![record.shop_name],
                });
            }
        }
    }

    aggregates
}

/// Ranks for counts already sorted descending: `[5, 5, 3] -> [1, 1, 3]`
pub fn competition_ranks(counts: &[u32]) -> Vec<u32> {
    let mut ranks = Vec::with_capacity(counts.len());
    let mut last_rank = 0u32;
    let mut last_count: Option<u32> = None;

    for (position, &count) in counts.iter().enumerate() {
        let rank = if last_count == Some(count) {
            last_rank
        } else {
            position as u32 + 1
        };
        ranks.push(rank);
        last_rank = rank;
        last_count = Some(count);
    }

    ranks
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct InMemorySource {
        records: Vec<VisitRecord>,
        fail: bool,
    }

    #[async_trait]
    impl VisitRecordSource for InMemorySource {
        // Returns everything so the aggregator's own range check is exercised
        async fn fetch_range(&self, _range: &MonthRange) -> anyhow::Result<Vec<VisitRecord>> {
            if self.fail {
                anyhow::bail!("connection refused");
            }
            Ok(self.records.clone())
        }
    }

    #[derive(Default)]
    struct MapResolver {
        names: HashMap<String, String>,
        fail_for: Option<String>,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl DisplayNameResolver for MapResolver {
        async fn resolve(&self, visitor_id: &str) -> anyhow::Result<Option<String>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_for.as_deref() == Some(visitor_id) {
                anyhow::bail!("timeout");
            }
            Ok(self.names.get(visitor_id).cloned())
        }
    }

    fn jst() -> FixedOffset {
        FixedOffset::east_opt(9 * 3600).unwrap()
    }

    fn options() -> RankingOptions {
        RankingOptions {
            top_n: 10,
            fallback_display_name: "匿名ユーザー".into(),
            offset: jst(),
        }
    }

    fn january() -> CalendarMonth {
        CalendarMonth::new(2025, 1).unwrap()
    }

    /// JST wall-clock time as UTC
    fn jst_at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32, ms: u32) -> DateTime<Utc> {
        jst().with_ymd_and_hms(y, m, d, h, min, s).unwrap().with_timezone(&Utc)
            + chrono::Duration::milliseconds(ms as i64)
    }

    fn visit(visitor: &str, shop: &str, at: DateTime<Utc>) -> VisitRecord {
        VisitRecord {
            visitor_id: visitor.into(),
            shop_id: format!("{}-id", shop),
            shop_name: shop.into(),
            visited_at: at,
        }
    }

    /// `count` visits by `visitor` spread over mid-January
    fn visits(visitor: &str, count: u32) -> Vec<VisitRecord> {
        (0..count)
            .map(|i| visit(visitor, &format!("{}-shop{}", visitor, i), jst_at(2025, 1, 10 + i, 12, 0, 0, 0)))
            .collect()
    }

    fn source(records: Vec<VisitRecord>) -> InMemorySource {
        InMemorySource { records, fail: false }
    }

    #[test]
    fn test_competition_ranks_tie_law() {
        assert_eq!(competition_ranks(&[5, 5, 3, 3, 3, 1]), vec![1, 1, 3, 3, 3, 6]);
        assert_eq!(competition_ranks(&[4, 3, 2]), vec![1, 2, 3]);
        assert_eq!(competition_ranks(&[2, 2, 2]), vec![1, 1, 1]);
        assert!(competition_ranks(&[]).is_empty());
    }

    #[tokio::test]
    async fn test_ranking_assigns_competition_ranks() {
        let mut records = Vec::new();
        for (visitor, count) in [("f", 1), ("c", 3), ("a", 5), ("d", 3), ("b", 5), ("e", 3)] {
            records.extend(visits(visitor, count));
        }
        let resolver = MapResolver::default();

        let entries = compute_ranking(january(), &options(), &source(records), &resolver)
            .await
            .unwrap();

        let ranks: Vec<u32> = entries.iter().map(|e| e.rank).collect();
        let ids: Vec<&str> = entries.iter().map(|e| e.visitor_id.as_str()).collect();
        assert_eq!(ranks, vec![1, 1, 3, 3, 3, 6]);
        assert_eq!(ids, vec!["a", "b", "c", "d", "e", "f"]);
        assert_eq!(entries[0].visit_count, 5);
        assert_eq!(entries[0].shop_names.len(), 5);
    }

    #[tokio::test]
    async fn test_ranking_truncates_to_top_n() {
        let mut records = Vec::new();
        for i in 0..15u32 {
            records.extend(visits(&format!("v{:02}", i), i + 1));
        }
        let resolver = MapResolver::default();

        let entries = compute_ranking(january(), &options(), &source(records), &resolver)
            .await
            .unwrap();

        assert_eq!(entries.len(), 10);
        assert_eq!(entries[0].visitor_id, "v14");
        assert_eq!(entries[0].visit_count, 15);
        assert_eq!(entries[9].visit_count, 6);
        // Names are only looked up for kept visitors
        assert_eq!(resolver.calls.load(Ordering::SeqCst), 10);
    }

    #[tokio::test]
    async fn test_empty_month_is_not_an_error() {
        let resolver = MapResolver::default();
        let entries = compute_ranking(january(), &options(), &source(vec![]), &resolver)
            .await
            .unwrap();
        assert!(entries.is_empty());
    }

    #[tokio::test]
    async fn test_unresolved_name_uses_fallback() {
        let mut records = visits("named", 2);
        records.extend(visits("anon", 1));
        let resolver = MapResolver {
            names: HashMap::from([("named".to_string(), "たろう".to_string())]),
            ..Default::default()
        };

        let entries = compute_ranking(january(), &options(), &source(records), &resolver)
            .await
            .unwrap();

        assert_eq!(entries[0].display_name, "たろう");
        assert_eq!(entries[1].display_name, "匿名ユーザー");
    }

    #[tokio::test]
    async fn test_source_failure_is_reported() {
        let failing = InMemorySource {
            records: visits("a", 1),
            fail: true,
        };
        let resolver = MapResolver::default();

        let result = compute_ranking(january(), &options(), &failing, &resolver).await;

        assert!(matches!(result, Err(RankingError::SourceUnavailable(_))));
        assert_eq!(resolver.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_resolver_failure_fails_whole_ranking() {
        let mut records = visits("a", 2);
        records.extend(visits("b", 1));
        let resolver = MapResolver {
            fail_for: Some("b".into()),
            ..Default::default()
        };

        let result = compute_ranking(january(), &options(), &source(records), &resolver).await;

        match result {
            Err(RankingError::ResolverUnavailable { visitor_id, .. }) => assert_eq!(visitor_id, "b"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_month_boundaries() {
        let records = vec![
            visit("in", "first", jst_at(2025, 1, 1, 0, 0, 0, 0)),
            visit("in", "last", jst_at(2025, 1, 31, 23, 59, 59, 999)),
            visit("out", "prev", jst_at(2024, 12, 31, 23, 59, 59, 999)),
            visit("out", "next", jst_at(2025, 2, 1, 0, 0, 0, 0)),
        ];
        let resolver = MapResolver::default();

        let entries = compute_ranking(january(), &options(), &source(records), &resolver)
            .await
            .unwrap();

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].visitor_id, "in");
        assert_eq!(entries[0].shop_names, vec!["first", "last"]);
    }

    #[tokio::test]
    async fn test_ranking_is_idempotent() {
        let mut records = visits("a", 3);
        records.extend(visits("b", 3));
        records.extend(visits("c", 1));
        let src = source(records);
        let resolver = MapResolver::default();

        let first = compute_ranking(january(), &options(), &src, &resolver).await.unwrap();
        let second = compute_ranking(january(), &options(), &src, &resolver).await.unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_aggregate_keeps_encounter_order_and_duplicates() {
        let range = january().range(jst());
        let at = jst_at(2025, 1, 5, 9, 0, 0, 0);
        let records = vec![
            visit("b", "ramen", at),
            visit("a", "sushi", at),
            visit("b", "ramen", at),
        ];

        let aggregates = aggregate_visits(records, &range);

        assert_eq!(aggregates[0].visitor_id, "b");
        assert_eq!(aggregates[0].visit_count, 2);
        assert_eq!(aggregates[0].shop_names, vec!["ramen", "ramen"]);
        assert_eq!(aggregates[1].visitor_id, "a");
    }
}
