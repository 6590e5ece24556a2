use crate::domain::common::{AggregateId, EntityMetadata};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// ID Type
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShopId(pub Uuid);

impl ShopId {
    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl AggregateId for ShopId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(ShopId)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// Value objects
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub latitude: f64,
    pub longitude: f64,
}

/// One opening slot. `open`/`close` are HHmm integers (`1130` = 11:30);
/// hours past 24 are allowed for late-night closing (`2600` = 02:00 next day).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessHours {
    #[serde(default)]
    pub label: Option<String>,
    pub open: u32,
    pub close: u32,
}

impl BusinessHours {
    /// "ランチ: 11:30 - 14:00", or "11:30 - 14:00" without a label
    pub fn display(&self) -> String {
        let span = format!("{} - {}", format_hhmm(self.open), format_hhmm(self.close));
        match self.label.as_deref().map(str::trim) {
            Some(label) if !label.is_empty() => format!("{}: {}", label, span),
            _ => span,
        }
    }

    fn is_valid_time(value: u32) -> bool {
        value % 100 < 60 && value / 100 < 30
    }
}

/// HHmm integer → "HH:mm"
pub fn format_hhmm(value: u32) -> String {
    format!("{:02}:{:02}", value / 100, value % 100)
}

// ============================================================================
// Aggregate Root
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shop {
    pub id: ShopId,
    pub name: String,
    pub genre: String,
    /// Nearest train station
    pub station: String,
    pub address: String,
    /// Free-form price band shown after a yen sign, e.g. "1000~2000"
    pub price_range: String,
    pub location: Option<LatLng>,
    pub business_hours: Vec<BusinessHours>,
    /// Reference point drawn with its own marker on station pages
    /// (never listed as a shop, never bookmarked or visited)
    pub is_landmark: bool,
    pub metadata: EntityMetadata,
}

impl Shop {
    pub fn new_for_insert(dto: &ShopDto) -> Self {
        let mut shop = Self {
            id: ShopId::new_v4(),
            name: String::new(),
            genre: String::new(),
            station: String::new(),
            address: String::new(),
            price_range: String::new(),
            location: None,
            business_hours: Vec::new(),
            is_landmark: false,
            metadata: EntityMetadata::new(),
        };
        shop.update(dto);
        shop
    }

    pub fn to_string_id(&self) -> String {
        self.id.as_string()
    }

    pub fn update(&mut self, dto: &ShopDto) {
        self.name = dto.name.trim().to_string();
        self.genre = dto.genre.trim().to_string();
        self.station = dto.station.trim().to_string();
        self.address = dto.address.trim().to_string();
        self.price_range = dto.price_range.trim().to_string();
        self.location = match (dto.latitude, dto.longitude) {
            (Some(latitude), Some(longitude)) => Some(LatLng {
                latitude,
                longitude,
            }),
            _ => None,
        };
        self.business_hours = dto.business_hours.clone();
        self.is_landmark = dto.is_landmark;
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.name.is_empty() {
            return Err("Shop name must not be empty".into());
        }
        if !self.is_landmark && self.station.is_empty() {
            return Err("Station must not be empty".into());
        }
        if let Some(loc) = self.location {
            if !(-90.0..=90.0).contains(&loc.latitude) || !(-180.0..=180.0).contains(&loc.longitude)
            {
                return Err(format!(
                    "Coordinates out of range: {}, {}",
                    loc.latitude, loc.longitude
                ));
            }
        }
        for hours in &self.business_hours {
            if !BusinessHours::is_valid_time(hours.open) || !BusinessHours::is_valid_time(hours.close)
            {
                return Err(format!(
                    "Invalid business hours: {} - {}",
                    hours.open, hours.close
                ));
            }
        }
        Ok(())
    }

    /// OpenStreetMap link centred on the shop
    pub fn osm_link(&self) -> Option<String> {
        self.location.map(|loc| {
            format!(
                "https://www.openstreetmap.org/?mlat={lat}&mlon={lng}#map=18/{lat}/{lng}",
                lat = loc.latitude,
                lng = loc.longitude
            )
        })
    }
}

/// Admin form payload. `id == None` creates a new shop.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShopDto {
    pub id: Option<String>,
    pub name: String,
    pub genre: String,
    pub station: String,
    pub address: String,
    pub price_range: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    #[serde(default)]
    pub business_hours: Vec<BusinessHours>,
    #[serde(default)]
    pub is_landmark: bool,
}

/// Distinct genres and stations for the home page
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShopCatalog {
    pub genres: Vec<String>,
    pub stations: Vec<String>,
}

impl ShopCatalog {
    /// First-seen order, blanks and landmarks skipped
    pub fn from_shops(shops: &[Shop]) -> Self {
        let mut catalog = Self::default();
        for shop in shops.iter().filter(|s| !s.is_landmark) {
            push_distinct(&mut catalog.genres, &shop.genre);
            push_distinct(&mut catalog.stations, &shop.station);
        }
        catalog
    }
}

fn push_distinct(values: &mut Vec<String>, candidate: &str) {
    let candidate = candidate.trim();
    if !candidate.is_empty() && !values.iter().any(|v| v == candidate) {
        values.push(candidate.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dto(name: &str, genre: &str, station: &str) -> ShopDto {
        ShopDto {
            name: name.into(),
            genre: genre.into(),
            station: station.into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_format_hhmm() {
        assert_eq!(format_hhmm(930), "09:30");
        assert_eq!(format_hhmm(1800), "18:00");
        assert_eq!(format_hhmm(0), "00:00");
        assert_eq!(format_hhmm(2530), "25:30");
    }

    #[test]
    fn test_business_hours_display() {
        let lunch = BusinessHours {
            label: Some("ランチ".into()),
            open: 1130,
            close: 1400,
        };
        assert_eq!(lunch.display(), "ランチ: 11:30 - 14:00");

        let unlabeled = BusinessHours {
            label: Some("  ".into()),
            open: 1700,
            close: 2300,
        };
        assert_eq!(unlabeled.display(), "17:00 - 23:00");
    }

    #[test]
    fn test_validate() {
        assert!(Shop::new_for_insert(&dto("麺屋", "ラーメン", "難波")).validate().is_ok());
        assert!(Shop::new_for_insert(&dto("  ", "ラーメン", "難波")).validate().is_err());
        assert!(Shop::new_for_insert(&dto("麺屋", "ラーメン", "")).validate().is_err());

        let mut bad_hours = dto("麺屋", "ラーメン", "難波");
        bad_hours.business_hours.push(BusinessHours {
            label: None,
            open: 1175,
            close: 1400,
        });
        assert!(Shop::new_for_insert(&bad_hours).validate().is_err());

        let mut bad_coords = dto("麺屋", "ラーメン", "難波");
        bad_coords.latitude = Some(134.6);
        bad_coords.longitude = Some(135.5);
        assert!(Shop::new_for_insert(&bad_coords).validate().is_err());
    }

    #[test]
    fn test_location_requires_both_coordinates() {
        let mut half = dto("麺屋", "ラーメン", "難波");
        half.latitude = Some(34.67);
        assert!(Shop::new_for_insert(&half).location.is_none());

        half.longitude = Some(135.49);
        let shop = Shop::new_for_insert(&half);
        assert!(shop.osm_link().unwrap().contains("mlat=34.67&mlon=135.49"));
    }

    #[test]
    fn test_catalog_distinct_first_seen() {
        let mut landmark = dto("OCA", "学校", "本町");
        landmark.is_landmark = true;
        let shops: Vec<Shop> = [
            dto("A", "ラーメン", "難波"),
            dto("B", "カフェ", "本町"),
            dto("C", "ラーメン", "難波"),
            dto("D", "", "心斎橋"),
            landmark,
        ]
        .iter()
        .map(Shop::new_for_insert)
        .collect();

        let catalog = ShopCatalog::from_shops(&shops);
        assert_eq!(catalog.genres, vec!["ラーメン", "カフェ"]);
        assert_eq!(catalog.stations, vec!["難波", "本町", "心斎橋"]);
    }
}
