use contracts::domain::a003_bookmark::Bookmark;
use serde::{Deserialize, Serialize};

use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a003_bookmark")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_id: String,
    #[sea_orm(primary_key, auto_increment = false)]
    pub shop_id: String,
    pub shop_name: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Bookmark {
    fn from(m: Model) -> Self {
        Bookmark {
            user_id: m.user_id,
            shop_id: m.shop_id,
            shop_name: m.shop_name,
            created_at: m.created_at,
        }
    }
}

pub async fn insert(db: &DatabaseConnection, bookmark: &Bookmark) -> anyhow::Result<()> {
    let active = ActiveModel {
        user_id: Set(bookmark.user_id.clone()),
        shop_id: Set(bookmark.shop_id.clone()),
        shop_name: Set(bookmark.shop_name.clone()),
        created_at: Set(bookmark.created_at),
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

/// Newest first
pub async fn list_by_user(db: &DatabaseConnection, user_id: &str) -> anyhow::Result<Vec<Bookmark>> {
    let items = Entity::find()
        .filter(Column::UserId.eq(user_id))
        .order_by_desc(Column::CreatedAt)
        .all(db)
        .await?;
    Ok(items.into_iter().map(Into::into).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::db::connect_in_memory;
    use chrono::{Duration, Utc};

    #[tokio::test]
    async fn test_bookmarks_are_per_user() {
        let db = connect_in_memory().await.unwrap();
        let now = Utc::now();
        for (user, shop, offset) in [("u1", "s1", 0), ("u1", "s2", 10), ("u2", "s1", 20)] {
            insert(
                &db,
                &Bookmark {
                    user_id: user.into(),
                    shop_id: shop.into(),
                    shop_name: shop.to_uppercase(),
                    created_at: now + Duration::seconds(offset),
                },
            )
            .await
            .unwrap();
        }

        let mine = list_by_user(&db, "u1").await.unwrap();
        let ids: Vec<_> = mine.iter().map(|b| b.shop_id.as_str()).collect();
        assert_eq!(ids, vec!["s2", "s1"]);

        assert!(delete(&db, "u1", "s1").await.unwrap());
        assert_eq!(list_by_user(&db, "u1").await.unwrap().len(), 1);
        assert_eq!(list_by_user(&db, "u2").await.unwrap().len(), 1);
    }
}
