use contracts::domain::a004_user_profile::UserProfile;
use serde::{Deserialize, Serialize};

use sea_orm::entity::prelude::*;
use sea_orm::sea_query::OnConflict;
use sea_orm::{EntityTrait, Set};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a004_user_profile")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub display_name: Option<String>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for UserProfile {
    fn from(m: Model) -> Self {
        UserProfile {
            id: m.id,
            display_name: m.display_name,
        }
    }
}

pub async fn get_by_id(db: &DatabaseConnection, id: &str) -> anyhow::Result<Option<UserProfile>> {
    let result = Entity::find_by_id(id.to_string()).one(db).await?;
    Ok(result.map(Into::into))
}

/// Insert or replace the display name of `profile.id`
pub async fn upsert(db: &DatabaseConnection, profile: &UserProfile) -> anyhow::Result<()> {
    let active = ActiveModel {
        id: Set(profile.id.clone()),
        display_name: Set(profile.display_name.clone()),
        updated_at: Set(chrono::Utc::now()),
    };
    Entity::insert(active)
        .on_conflict(
            OnConflict::column(Column::Id)
                .update_columns([Column::DisplayName, Column::UpdatedAt])
                .to_owned(),
        )
        .exec(db)
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::db::connect_in_memory;

    #[tokio::test]
    async fn test_upsert_replaces_display_name() {
        let db = connect_in_memory().await.unwrap();
        assert!(get_by_id(&db, "u1").await.unwrap().is_none());

        let mut profile = UserProfile {
            id: "u1".into(),
            display_name: Some("たろう".into()),
        };
        upsert(&db, &profile).await.unwrap();
        profile.display_name = Some("じろう".into());
        upsert(&db, &profile).await.unwrap();

        let stored = get_by_id(&db, "u1").await.unwrap().unwrap();
        assert_eq!(stored.display_name.as_deref(), Some("じろう"));
    }
}
