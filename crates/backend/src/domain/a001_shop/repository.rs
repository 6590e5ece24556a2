use chrono::Utc;
use contracts::domain::a001_shop::{BusinessHours, LatLng, Shop, ShopId};
use contracts::domain::common::EntityMetadata;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Select, Set};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a001_shop")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    pub genre: String,
    pub station: String,
    pub address: String,
    pub price_range: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// JSON array of `BusinessHours`
    pub business_hours: String,
    pub is_landmark: bool,
    pub is_deleted: bool,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Shop {
    fn from(m: Model) -> Self {
        let business_hours: Vec<BusinessHours> = serde_json::from_str(&m.business_hours)
            .unwrap_or_else(|e| {
                tracing::warn!("Shop {} has unreadable business_hours: {}", m.id, e);
                Vec::new()
            });
        let location = match (m.latitude, m.longitude) {
            (Some(latitude), Some(longitude)) => Some(LatLng {
                latitude,
                longitude,
            }),
            _ => None,
        };
        let uuid = Uuid::parse_str(&m.id).unwrap_or_else(|_| {
            tracing::warn!("Shop id {} is not a UUID", m.id);
            Uuid::nil()
        });

        Shop {
            id: ShopId(uuid),
            name: m.name,
            genre: m.genre,
            station: m.station,
            address: m.address,
            price_range: m.price_range,
            location,
            business_hours,
            is_landmark: m.is_landmark,
            metadata: EntityMetadata {
                created_at: m.created_at.unwrap_or_else(Utc::now),
                updated_at: m.updated_at.unwrap_or_else(Utc::now),
                is_deleted: m.is_deleted,
                version: m.version,
            },
        }
    }
}

fn to_active(shop: &Shop) -> anyhow::Result<ActiveModel> {
    Ok(ActiveModel {
        id: Set(shop.to_string_id()),
        name: Set(shop.name.clone()),
        genre: Set(shop.genre.clone()),
        station: Set(shop.station.clone()),
        address: Set(shop.address.clone()),
        price_range: Set(shop.price_range.clone()),
        latitude: Set(shop.location.map(|l| l.latitude)),
        longitude: Set(shop.location.map(|l| l.longitude)),
        business_hours: Set(serde_json::to_string(&shop.business_hours)?),
        is_landmark: Set(shop.is_landmark),
        is_deleted: Set(shop.metadata.is_deleted),
        created_at: Set(Some(shop.metadata.created_at)),
        updated_at: Set(Some(shop.metadata.updated_at)),
        version: Set(shop.metadata.version),
    })
}

fn listed() -> Select<Entity> {
    Entity::find()
        .filter(Column::IsDeleted.eq(false))
        .filter(Column::IsLandmark.eq(false))
        .order_by_asc(Column::Name)
}

/// All listed shops (landmarks excluded), by name
pub async fn list_all(db: &DatabaseConnection) -> anyhow::Result<Vec<Shop>> {
    let items = listed().all(db).await?;
    Ok(items.into_iter().map(Into::into).collect())
}

pub async fn list_by_genre(db: &DatabaseConnection, genre: &str) -> anyhow::Result<Vec<Shop>> {
    let items = listed().filter(Column::Genre.eq(genre)).all(db).await?;
    Ok(items.into_iter().map(Into::into).collect())
}

pub async fn list_by_station(db: &DatabaseConnection, station: &str) -> anyhow::Result<Vec<Shop>> {
    let items = listed().filter(Column::Station.eq(station)).all(db).await?;
    Ok(items.into_iter().map(Into::into).collect())
}

/// The landmark drawn on every station page, if one is registered
pub async fn get_landmark(db: &DatabaseConnection) -> anyhow::Result<Option<Shop>> {
    let result = Entity::find()
        .filter(Column::IsDeleted.eq(false))
        .filter(Column::IsLandmark.eq(true))
        .order_by_asc(Column::CreatedAt)
        .one(db)
        .await?;
    Ok(result.map(Into::into))
}

pub async fn get_by_id(db: &DatabaseConnection, id: Uuid) -> anyhow::Result<Option<Shop>> {
    let result = Entity::find_by_id(id.to_string()).one(db).await?;
    Ok(result.map(Shop::from).filter(|s| !s.metadata.is_deleted))
}

pub async fn insert(db: &DatabaseConnection, shop: &Shop) -> anyhow::Result<Uuid> {
    to_active(shop)?.insert(db).await?;
    Ok(shop.id.value())
}

pub async fn update(db: &DatabaseConnection, shop: &Shop) -> anyhow::Result<()> {
    let mut active = to_active(shop)?;
    active.created_at = sea_orm::ActiveValue::NotSet;
    active.update(db).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::db::connect_in_memory;
    use contracts::domain::a001_shop::ShopDto;

    fn shop(name: &str, genre: &str, station: &str) -> Shop {
        Shop::new_for_insert(&ShopDto {
            name: name.into(),
            genre: genre.into(),
            station: station.into(),
            latitude: Some(34.67),
            longitude: Some(135.49),
            business_hours: vec![BusinessHours {
                label: Some("ランチ".into()),
                open: 1130,
                close: 1400,
            }],
            ..Default::default()
        })
    }

    #[tokio::test]
    async fn test_insert_and_filter() {
        let db = connect_in_memory().await.unwrap();
        insert(&db, &shop("麺屋いろは", "ラーメン", "難波")).await.unwrap();
        insert(&db, &shop("喫茶ミナミ", "カフェ", "難波")).await.unwrap();
        insert(&db, &shop("中華そば", "ラーメン", "本町")).await.unwrap();

        let mut landmark = shop("OCA", "学校", "本町");
        landmark.is_landmark = true;
        insert(&db, &landmark).await.unwrap();

        assert_eq!(list_all(&db).await.unwrap().len(), 3);

        let ramen = list_by_genre(&db, "ラーメン").await.unwrap();
        let names: Vec<_> = ramen.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["中華そば", "麺屋いろは"]);

        let namba = list_by_station(&db, "難波").await.unwrap();
        assert_eq!(namba.len(), 2);
        assert_eq!(namba[0].business_hours.len(), 1);
        assert_eq!(namba[0].location.unwrap().latitude, 34.67);

        let found = get_landmark(&db).await.unwrap().unwrap();
        assert_eq!(found.name, "OCA");
        assert!(list_by_station(&db, "本町")
            .await
            .unwrap()
            .iter()
            .all(|s| !s.is_landmark));
    }

    #[tokio::test]
    async fn test_update_and_soft_deleted_hidden() {
        let db = connect_in_memory().await.unwrap();
        let mut item = shop("麺屋いろは", "ラーメン", "難波");
        let id = insert(&db, &item).await.unwrap();

        item.price_range = "800~1200".into();
        item.metadata.touch();
        update(&db, &item).await.unwrap();
        let stored = get_by_id(&db, id).await.unwrap().unwrap();
        assert_eq!(stored.price_range, "800~1200");
        assert_eq!(stored.metadata.version, 1);

        item.metadata.is_deleted = true;
        update(&db, &item).await.unwrap();
        assert!(get_by_id(&db, id).await.unwrap().is_none());
        assert!(list_all(&db).await.unwrap().is_empty());
    }
}
