use async_trait::async_trait;
use contracts::domain::a002_visit::VisitRecord;
use contracts::shared::calendar::MonthRange;
use sea_orm::DatabaseConnection;

use super::aggregator::{DisplayNameResolver, VisitRecordSource};
use crate::domain::{a002_visit, a004_user_profile};

/// Visits read from the `a002_visit` table
pub struct StoredVisits<'a> {
    pub db: &'a DatabaseConnection,
}

#[async_trait]
impl VisitRecordSource for StoredVisits<'_> {
    async fn fetch_range(&self, range: &MonthRange) -> anyhow::Result<Vec<VisitRecord>> {
        a002_visit::repository::list_in_range(self.db, range).await
    }
}

/// Display names read from the `a004_user_profile` table
pub struct StoredProfiles<'a> {
    pub db: &'a DatabaseConnection,
}

#[async_trait]
impl DisplayNameResolver for StoredProfiles<'_> {
    async fn resolve(&self, visitor_id: &str) -> anyhow::Result<Option<String>> {
        let profile = a004_user_profile::repository::get_by_id(self.db, visitor_id).await?;
        Ok(profile.and_then(|p| p.display_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboards::d400_monthly_ranking::aggregator::{compute_ranking, RankingOptions};
    use crate::shared::data::db::connect_in_memory;
    use chrono::{FixedOffset, TimeZone, Utc};
    use contracts::domain::a004_user_profile::UserProfile;
    use contracts::shared::calendar::CalendarMonth;

    #[tokio::test]
    async fn test_ranking_over_stored_visits() {
        let db = connect_in_memory().await.unwrap();
        let at = Utc.with_ymd_and_hms(2025, 3, 10, 3, 0, 0).unwrap();
        for (user, shop) in [("u1", "a"), ("u1", "b"), ("u2", "a")] {
            let mut record = VisitRecord::new(user, shop, format!("shop {}", shop));
            record.visited_at = at;
            a002_visit::repository::insert(&db, &record).await.unwrap();
        }
        a004_user_profile::repository::upsert(
            &db,
            &UserProfile {
                id: "u1".into(),
                display_name: Some("はなこ".into()),
            },
        )
        .await
        .unwrap();

        let options = RankingOptions {
            top_n: 10,
            fallback_display_name: "匿名ユーザー".into(),
            offset: FixedOffset::east_opt(9 * 3600).unwrap(),
        };
        let entries = compute_ranking(
            CalendarMonth::new(2025, 3).unwrap(),
            &options,
            &StoredVisits { db: &db },
            &StoredProfiles { db: &db },
        )
        .await
        .unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].display_name, "はなこ");
        assert_eq!(entries[0].visit_count, 2);
        assert_eq!(entries[1].display_name, "匿名ユーザー");
        assert_eq!(entries[1].rank, 2);
    }
}
