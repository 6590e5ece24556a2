use chrono::{DateTime, TimeZone, Utc};
use contracts::domain::a002_visit::VisitRecord;
use contracts::shared::calendar::MonthRange;
use serde::{Deserialize, Serialize};

use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a002_visit")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_id: String,
    #[sea_orm(primary_key, auto_increment = false)]
    pub shop_id: String,
    pub shop_name: String,
    /// Milliseconds since the Unix epoch, UTC
    pub visited_at_ms: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for VisitRecord {
    fn from(m: Model) -> Self {
        let visited_at = Utc
            .timestamp_millis_opt(m.visited_at_ms)
            .single()
            .unwrap_or_else(|| {
                tracing::warn!("Visit {}/{} has invalid timestamp {}", m.user_id, m.shop_id, m.visited_at_ms);
                DateTime::<Utc>::default()
            });
        VisitRecord {
            visitor_id: m.user_id,
            shop_id: m.shop_id,
            shop_name: m.shop_name,
            visited_at,
        }
    }
}

pub async fn insert(db: &DatabaseConnection, record: &VisitRecord) -> anyhow::Result<()> {
    let active = ActiveModel {
        user_id: Set(record.visitor_id.clone()),
        shop_id: Set(record.shop_id.clone()),
        shop_name: Set(record.shop_name.clone()),
        visited_at_ms: Set(record.visited_at.timestamp_millis()),
    };
    active.insert(db).await?;
    Ok(())
}

pub async fn delete(db: &DatabaseConnection, user_id: &str, shop_id: &str) -> anyhow::Result<bool> {
    let result = Entity::delete_many()
        .filter(Column::UserId.eq(user_id))
        .filter(Column::ShopId.eq(shop_id))
        .exec(db)
        .await?;
    Ok(result.rows_affected > 0)
}

pub async fn exists(db: &DatabaseConnection, user_id: &str, shop_id: &str) -> anyhow::Result<bool> {
    let found = Entity::find_by_id((user_id.to_string(), shop_id.to_string()))
        .one(db)
        .await?;
    Ok(found.is_some())
}

/// One user's visits, newest first
pub async fn list_by_user(db: &DatabaseConnection, user_id: &str) -> anyhow::Result<Vec<VisitRecord>> {
    let items = Entity::find()
        .filter(Column::UserId.eq(user_id))
        .order_by_desc(Column::VisitedAtMs)
        .all(db)
        .await?;
    Ok(items.into_iter().map(Into::into).collect())
}

/// Every user's visits with `visited_at` in `[range.start, range.end)`,
/// oldest first
pub async fn list_in_range(db: &DatabaseConnection, range: &MonthRange) -> anyhow::Result<Vec<VisitRecord>> {
    let items = Entity::find()
        .filter(Column::VisitedAtMs.gte(range.start_ms()))
        .filter(Column::VisitedAtMs.lt(range.end_ms()))
        .order_by_asc(Column::VisitedAtMs)
        .order_by_asc(Column::UserId)
        .all(db)
        .await?;
    Ok(items.into_iter().map(Into::into).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::db::connect_in_memory;
    use chrono::{Duration, FixedOffset};
    use contracts::shared::calendar::CalendarMonth;

    fn visit(user: &str, shop: &str, at: DateTime<Utc>) -> VisitRecord {
        VisitRecord {
            visitor_id: user.into(),
            shop_id: shop.into(),
            shop_name: format!("shop-{}", shop),
            visited_at: at,
        }
    }

    #[tokio::test]
    async fn test_range_boundaries() {
        let db = connect_in_memory().await.unwrap();
        let jst = FixedOffset::east_opt(9 * 3600).unwrap();
        let range = CalendarMonth::new(2025, 5).unwrap().range(jst);

        let one_ms = Duration::milliseconds(1);
        insert(&db, &visit("u1", "before", range.start - one_ms)).await.unwrap();
        insert(&db, &visit("u1", "first", range.start)).await.unwrap();
        insert(&db, &visit("u2", "last", range.end - one_ms)).await.unwrap();
        insert(&db, &visit("u2", "after", range.end)).await.unwrap();

        let found = list_in_range(&db, &range).await.unwrap();
        let shops: Vec<_> = found.iter().map(|v| v.shop_id.as_str()).collect();
        assert_eq!(shops, vec!["first", "last"]);
        assert_eq!(found[1].visited_at, range.end - one_ms);
    }

    #[tokio::test]
    async fn test_toggle_primitives() {
        let db = connect_in_memory().await.unwrap();
        let now = Utc::now();
        insert(&db, &visit("u1", "s1", now)).await.unwrap();
        insert(&db, &visit("u1", "s2", now + Duration::seconds(5))).await.unwrap();

        assert!(exists(&db, "u1", "s1").await.unwrap());
        assert!(!exists(&db, "u2", "s1").await.unwrap());

        let mine = list_by_user(&db, "u1").await.unwrap();
        assert_eq!(mine[0].shop_id, "s2");

        assert!(delete(&db, "u1", "s1").await.unwrap());
        assert!(!delete(&db, "u1", "s1").await.unwrap());
        assert_eq!(list_by_user(&db, "u1").await.unwrap().len(), 1);
    }
}
