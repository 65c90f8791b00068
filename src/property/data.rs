//! Classification types consumed by the premium calculator

use serde::{Deserialize, Serialize};

/// Coarse scale of the insured pagoda
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeCategory {
    Small,
    Medium,
    Large,
}

impl SizeCategory {
    pub const ALL: [SizeCategory; 3] = [SizeCategory::Small, SizeCategory::Medium, SizeCategory::Large];

    /// Case-insensitive parse; `None` for anything but small, medium or large
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "small" => Some(SizeCategory::Small),
            "medium" => Some(SizeCategory::Medium),
            "large" => Some(SizeCategory::Large),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SizeCategory::Small => "small",
            SizeCategory::Medium => "medium",
            SizeCategory::Large => "large",
        }
    }
}

/// Geographic risk zone of the pagoda (recorded, not priced)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoneCategory {
    City,
    Rural,
    Forest,
}

impl ZoneCategory {
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "city" => Some(ZoneCategory::City),
            "rural" => Some(ZoneCategory::Rural),
            "forest" => Some(ZoneCategory::Forest),
            _ => None,
        }
    }
}

/// Kind of building on the pagoda grounds
///
/// Deserializing an unrecognized label yields `Other`, so pricing always
/// sees a closed set of kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum BuildingKind {
    /// Main temple (vihara)
    MainTemple,
    /// Chanting hall (sala)
    ChantingHall,
    /// Monk residence (kuti)
    Residence,
    /// Any other building
    Other,
}

impl BuildingKind {
    /// Case-insensitive parse of a recognized label
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "main_temple" => Some(BuildingKind::MainTemple),
            "chanting_hall" => Some(BuildingKind::ChantingHall),
            "residence" => Some(BuildingKind::Residence),
            "other" => Some(BuildingKind::Other),
            _ => None,
        }
    }

    /// Parse any label, defaulting to `Other`
    pub fn from_label(label: &str) -> Self {
        Self::parse(label).unwrap_or(BuildingKind::Other)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BuildingKind::MainTemple => "main_temple",
            BuildingKind::ChantingHall => "chanting_hall",
            BuildingKind::Residence => "residence",
            BuildingKind::Other => "other",
        }
    }
}

impl From<String> for BuildingKind {
    fn from(label: String) -> Self {
        BuildingKind::from_label(&label)
    }
}

/// Main construction material of a building (recorded, not priced)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConstructionMaterial {
    Concrete,
    Wood,
    Mixed,
}

impl ConstructionMaterial {
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "concrete" => Some(ConstructionMaterial::Concrete),
            "wood" => Some(ConstructionMaterial::Wood),
            "mixed" => Some(ConstructionMaterial::Mixed),
            _ => None,
        }
    }
}

/// Classification of the insured pagoda
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyClassification {
    pub size: SizeCategory,

    #[serde(default)]
    pub zone: Option<ZoneCategory>,

    /// Construction year; drives the age loading
    #[serde(default)]
    pub year_built: Option<i32>,
}

impl PropertyClassification {
    pub fn new(size: SizeCategory) -> Self {
        Self {
            size,
            zone: None,
            year_built: None,
        }
    }

    pub fn with_year_built(mut self, year_built: i32) -> Self {
        self.year_built = Some(year_built);
        self
    }

    pub fn with_zone(mut self, zone: ZoneCategory) -> Self {
        self.zone = Some(zone);
        self
    }
}

/// Classification of one building on the pagoda grounds
///
/// Deserializing an unrecognized `kind` yields `Other` with the label kept in
/// `raw_kind`, the same as classifying a request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "BuildingRecord")]
pub struct BuildingClassification {
    #[serde(default)]
    pub name: Option<String>,

    pub kind: BuildingKind,

    /// Caller's label when it was not a recognized kind
    #[serde(default)]
    pub raw_kind: Option<String>,

    #[serde(default)]
    pub construction_material: Option<ConstructionMaterial>,

    #[serde(default)]
    pub estimated_value: Option<f64>,

    /// Floor area in square meters
    #[serde(default)]
    pub area: Option<f64>,

    #[serde(default)]
    pub year_built: Option<i32>,
}

/// Stored form of a building classification, with the kind as a free label
#[derive(Deserialize)]
struct BuildingRecord {
    #[serde(default)]
    name: Option<String>,
    kind: String,
    #[serde(default)]
    raw_kind: Option<String>,
    #[serde(default)]
    construction_material: Option<ConstructionMaterial>,
    #[serde(default)]
    estimated_value: Option<f64>,
    #[serde(default)]
    area: Option<f64>,
    #[serde(default)]
    year_built: Option<i32>,
}

impl From<BuildingRecord> for BuildingClassification {
    fn from(record: BuildingRecord) -> Self {
        let (kind, raw_kind) = match BuildingKind::parse(&record.kind) {
            Some(kind) => (kind, record.raw_kind),
            None => (BuildingKind::Other, record.raw_kind.or(Some(record.kind))),
        };

        Self {
            name: record.name,
            kind,
            raw_kind,
            construction_material: record.construction_material,
            estimated_value: record.estimated_value,
            area: record.area,
            year_built: record.year_built,
        }
    }
}

impl BuildingClassification {
    pub fn new(kind: BuildingKind) -> Self {
        Self {
            name: None,
            kind,
            raw_kind: None,
            construction_material: None,
            estimated_value: None,
            area: None,
            year_built: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Label shown in the breakdown: the caller's own label if it fell back to `Other`
    pub fn display_kind(&self) -> &str {
        self.raw_kind.as_deref().unwrap_or(self.kind.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_parse() {
        assert_eq!(SizeCategory::parse("small"), Some(SizeCategory::Small));
        assert_eq!(SizeCategory::parse(" Medium "), Some(SizeCategory::Medium));
        assert_eq!(SizeCategory::parse("LARGE"), Some(SizeCategory::Large));
        assert_eq!(SizeCategory::parse("gigantic"), None);
        assert_eq!(SizeCategory::parse(""), None);
    }

    #[test]
    fn test_size_ordering() {
        assert!(SizeCategory::Small < SizeCategory::Medium);
        assert!(SizeCategory::Medium < SizeCategory::Large);
    }

    #[test]
    fn test_building_kind_fallback() {
        assert_eq!(BuildingKind::from_label("main_temple"), BuildingKind::MainTemple);
        assert_eq!(BuildingKind::from_label("Chanting_Hall"), BuildingKind::ChantingHall);
        assert_eq!(BuildingKind::from_label("shrine"), BuildingKind::Other);
        assert_eq!(BuildingKind::from_label(""), BuildingKind::Other);
        assert_eq!(BuildingKind::parse("kitchen"), None);
    }

    #[test]
    fn test_building_kind_deserialize_fallback() {
        let kinds: Vec<BuildingKind> =
            serde_json::from_str(r#"["residence", "storage", "main_temple"]"#).expect("Failed to parse");
        assert_eq!(kinds, vec![BuildingKind::Residence, BuildingKind::Other, BuildingKind::MainTemple]);

        let json = serde_json::to_string(&BuildingKind::ChantingHall).expect("Failed to serialize");
        assert_eq!(json, "\"chanting_hall\"");
    }

    #[test]
    fn test_display_kind() {
        let mut building = BuildingClassification::new(BuildingKind::Other);
        assert_eq!(building.display_kind(), "other");

        building.raw_kind = Some("kitchen".to_string());
        assert_eq!(building.display_kind(), "kitchen");
    }

    #[test]
    fn test_building_deserialize_keeps_unrecognized_label() {
        let building: BuildingClassification =
            serde_json::from_str(r#"{"name": "Kitchen", "kind": "kitchen"}"#).expect("Failed to parse");
        assert_eq!(building.kind, BuildingKind::Other);
        assert_eq!(building.raw_kind.as_deref(), Some("kitchen"));
        assert_eq!(building.display_kind(), "kitchen");

        let building: BuildingClassification =
            serde_json::from_str(r#"{"kind": "Main_Temple"}"#).expect("Failed to parse");
        assert_eq!(building.kind, BuildingKind::MainTemple);
        assert_eq!(building.raw_kind, None);

        // A stored classification round-trips unchanged
        let mut stored = BuildingClassification::new(BuildingKind::Other).with_name("Storehouse");
        stored.raw_kind = Some("storage".to_string());
        let json = serde_json::to_string(&stored).expect("Failed to serialize");
        let parsed: BuildingClassification = serde_json::from_str(&json).expect("Failed to parse");
        assert_eq!(parsed, stored);
    }
}
