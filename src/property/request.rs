//! Caller-facing request shape
//!
//! Requests arrive as JSON from forms and older clients that disagree on field
//! spelling (`size` vs `pagodaSize`, `building_type` vs `type`, ...) and on
//! whether numbers are sent as JSON numbers or as strings. All known spellings
//! are accepted here and converted into typed classifications.

use super::{
    BuildingClassification, BuildingKind, ConstructionMaterial, PropertyClassification, SizeCategory,
    ZoneCategory,
};
use crate::error::PricingError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Premium calculation request as received from a caller
///
/// The pagoda-level legacy spellings are separate fields so a body carrying
/// both spellings still parses; the canonical spelling wins.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PremiumRequest {
    /// Size tier label (small, medium, large)
    #[serde(default)]
    pub size: Option<String>,

    #[serde(default, rename = "pagodaSize", skip_serializing_if = "Option::is_none")]
    pub pagoda_size: Option<String>,

    /// Risk zone label (city, rural, forest)
    #[serde(default)]
    pub zone: Option<String>,

    #[serde(default, rename = "pagodaType", skip_serializing_if = "Option::is_none")]
    pub pagoda_type: Option<String>,

    #[serde(default)]
    pub year_built: Option<NumericInput>,

    #[serde(default, rename = "yearBuilt", skip_serializing_if = "Option::is_none")]
    pub year_built_camel: Option<NumericInput>,

    #[serde(default)]
    pub buildings: Vec<BuildingRequest>,
}

/// One building as received from a caller
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BuildingRequest {
    #[serde(default, alias = "building_name")]
    pub name: Option<String>,

    #[serde(default, alias = "type", alias = "buildingType")]
    pub building_type: Option<String>,

    #[serde(default, alias = "constructionType")]
    pub construction_material: Option<String>,

    #[serde(default, alias = "estimatedValue")]
    pub estimated_value: Option<NumericInput>,

    #[serde(default)]
    pub area: Option<NumericInput>,

    #[serde(default, alias = "yearBuilt")]
    pub year_built: Option<NumericInput>,
}

/// Number sent either as a JSON number or as a numeric string
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumericInput {
    Number(f64),
    Text(String),
}

impl NumericInput {
    /// Parse as an amount; range checks happen in the calculator
    pub fn to_amount(&self, field: &str) -> Result<f64, PricingError> {
        match self {
            NumericInput::Number(value) => Ok(*value),
            NumericInput::Text(text) => text
                .trim()
                .parse::<f64>()
                .map_err(|_| PricingError::invalid(field, text, "expected a number")),
        }
    }

    /// Parse as a whole calendar year
    pub fn to_year(&self, field: &str) -> Result<i32, PricingError> {
        let value = self.to_amount(field)?;
        if !value.is_finite() || value.fract() != 0.0 || value < i32::MIN as f64 || value > i32::MAX as f64 {
            return Err(PricingError::invalid(field, self, "expected a whole year"));
        }
        Ok(value as i32)
    }
}

impl fmt::Display for NumericInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericInput::Number(value) => write!(f, "{value}"),
            NumericInput::Text(text) => f.write_str(text),
        }
    }
}

impl From<i32> for NumericInput {
    fn from(value: i32) -> Self {
        NumericInput::Number(f64::from(value))
    }
}

impl From<f64> for NumericInput {
    fn from(value: f64) -> Self {
        NumericInput::Number(value)
    }
}

impl PremiumRequest {
    /// Convert into typed classifications
    ///
    /// Size is required and must be recognized. Building kinds that are missing
    /// or unrecognized become `BuildingKind::Other`. Numeric strings are parsed
    /// here; anything unparseable is reported against the caller's field name.
    pub fn classify(&self) -> Result<(PropertyClassification, Vec<BuildingClassification>), PricingError> {
        let size = match self.size.as_deref().or(self.pagoda_size.as_deref()) {
            Some(label) => SizeCategory::parse(label)
                .ok_or_else(|| PricingError::invalid("size", label, "expected one of small, medium, large"))?,
            None => return Err(PricingError::invalid("size", "", "size is required")),
        };

        let zone = match self.zone.as_deref().or(self.pagoda_type.as_deref()) {
            Some(label) => Some(
                ZoneCategory::parse(label)
                    .ok_or_else(|| PricingError::invalid("zone", label, "expected one of city, rural, forest"))?,
            ),
            None => None,
        };

        let year_built = self
            .year_built
            .as_ref()
            .or(self.year_built_camel.as_ref())
            .map(|year| year.to_year("yearBuilt"))
            .transpose()?;

        let property = PropertyClassification {
            size,
            zone,
            year_built,
        };

        let buildings = self
            .buildings
            .iter()
            .enumerate()
            .map(|(index, building)| building.classify(index))
            .collect::<Result<Vec<_>, _>>()?;

        Ok((property, buildings))
    }
}

impl BuildingRequest {
    fn classify(&self, index: usize) -> Result<BuildingClassification, PricingError> {
        let (kind, raw_kind) = match self.building_type.as_deref() {
            Some(label) => match BuildingKind::parse(label) {
                Some(kind) => (kind, None),
                None => {
                    log::debug!("Building {index}: kind {label:?} not recognized, priced as other");
                    (BuildingKind::Other, Some(label.to_string()))
                }
            },
            None => (BuildingKind::Other, None),
        };

        let construction_material = match self.construction_material.as_deref() {
            Some(label) => Some(ConstructionMaterial::parse(label).ok_or_else(|| {
                PricingError::invalid(
                    format!("buildings[{index}].constructionType"),
                    label,
                    "expected one of concrete, wood, mixed",
                )
            })?),
            None => None,
        };

        let estimated_value = self
            .estimated_value
            .as_ref()
            .map(|value| value.to_amount(&format!("buildings[{index}].estimatedValue")))
            .transpose()?;
        let area = self
            .area
            .as_ref()
            .map(|area| area.to_amount(&format!("buildings[{index}].area")))
            .transpose()?;
        let year_built = self
            .year_built
            .as_ref()
            .map(|year| year.to_year(&format!("buildings[{index}].yearBuilt")))
            .transpose()?;

        Ok(BuildingClassification {
            name: self.name.clone(),
            kind,
            raw_kind,
            construction_material,
            estimated_value,
            area,
            year_built,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_canonical_fields() {
        let request: PremiumRequest = serde_json::from_str(
            r#"{
                "size": "medium",
                "year_built": 1960,
                "buildings": [
                    {"building_name": "Vihara", "building_type": "main_temple"},
                    {"name": "Sala", "type": "chanting_hall"}
                ]
            }"#,
        )
        .expect("Failed to parse");

        let (property, buildings) = request.classify().expect("Failed to classify");
        assert_eq!(property.size, SizeCategory::Medium);
        assert_eq!(property.year_built, Some(1960));
        assert_eq!(buildings.len(), 2);
        assert_eq!(buildings[0].kind, BuildingKind::MainTemple);
        assert_eq!(buildings[0].name.as_deref(), Some("Vihara"));
        assert_eq!(buildings[1].kind, BuildingKind::ChantingHall);
        assert_eq!(buildings[1].name.as_deref(), Some("Sala"));
    }

    #[test]
    fn test_classify_route_spelling() {
        let request: PremiumRequest = serde_json::from_str(
            r#"{
                "pagodaType": "Rural",
                "pagodaSize": "LARGE",
                "buildings": [
                    {"buildingType": "shrine", "constructionType": "wood", "estimatedValue": 25000, "area": 120.5}
                ]
            }"#,
        )
        .expect("Failed to parse");

        let (property, buildings) = request.classify().expect("Failed to classify");
        assert_eq!(property.size, SizeCategory::Large);
        assert_eq!(property.zone, Some(ZoneCategory::Rural));
        assert_eq!(buildings[0].kind, BuildingKind::Other);
        assert_eq!(buildings[0].raw_kind.as_deref(), Some("shrine"));
        assert_eq!(buildings[0].construction_material, Some(ConstructionMaterial::Wood));
        assert_eq!(buildings[0].estimated_value, Some(25_000.0));
        assert_eq!(buildings[0].area, Some(120.5));
    }

    #[test]
    fn test_missing_building_type_is_other() {
        let request = PremiumRequest {
            size: Some("small".into()),
            buildings: vec![BuildingRequest::default()],
            ..Default::default()
        };

        let (_, buildings) = request.classify().expect("Failed to classify");
        assert_eq!(buildings[0].kind, BuildingKind::Other);
        assert_eq!(buildings[0].raw_kind, None);
    }

    #[test]
    fn test_unrecognized_size_rejected() {
        let request = PremiumRequest {
            size: Some("gigantic".into()),
            ..Default::default()
        };

        let err = request.classify().unwrap_err();
        assert_eq!(err.field(), "size");
        assert!(err.to_string().contains("gigantic"));
    }

    #[test]
    fn test_missing_size_rejected() {
        let err = PremiumRequest::default().classify().unwrap_err();
        assert_eq!(err.field(), "size");
    }

    #[test]
    fn test_unrecognized_zone_rejected() {
        let request = PremiumRequest {
            size: Some("small".into()),
            zone: Some("desert".into()),
            ..Default::default()
        };

        assert_eq!(request.classify().unwrap_err().field(), "zone");
    }

    #[test]
    fn test_unrecognized_material_rejected() {
        let request = PremiumRequest {
            size: Some("small".into()),
            buildings: vec![
                BuildingRequest::default(),
                BuildingRequest {
                    construction_material: Some("straw".into()),
                    ..Default::default()
                },
            ],
            ..Default::default()
        };

        let err = request.classify().unwrap_err();
        assert_eq!(err.field(), "buildings[1].constructionType");
    }

    #[test]
    fn test_numeric_strings_accepted() {
        let request: PremiumRequest = serde_json::from_str(
            r#"{
                "size": "medium",
                "yearBuilt": " 1966 ",
                "buildings": [
                    {"type": "main_temple", "estimatedValue": "25000", "area": "120.5", "yearBuilt": "1970"}
                ]
            }"#,
        )
        .expect("Failed to parse");

        let (property, buildings) = request.classify().expect("Failed to classify");
        assert_eq!(property.year_built, Some(1966));
        assert_eq!(buildings[0].estimated_value, Some(25_000.0));
        assert_eq!(buildings[0].area, Some(120.5));
        assert_eq!(buildings[0].year_built, Some(1970));
    }

    #[test]
    fn test_unparseable_numbers_itemized() {
        let request: PremiumRequest =
            serde_json::from_str(r#"{"size": "small", "yearBuilt": "abc"}"#).expect("Failed to parse");
        let err = request.classify().unwrap_err();
        assert_eq!(err.field(), "yearBuilt");
        assert!(err.to_string().contains("abc"));

        let request: PremiumRequest =
            serde_json::from_str(r#"{"size": "small", "year_built": 1966.5}"#).expect("Failed to parse");
        assert_eq!(request.classify().unwrap_err().field(), "yearBuilt");

        let request: PremiumRequest = serde_json::from_str(
            r#"{"size": "small", "buildings": [{"type": "other"}, {"type": "other", "estimatedValue": "lots"}]}"#,
        )
        .expect("Failed to parse");
        assert_eq!(request.classify().unwrap_err().field(), "buildings[1].estimatedValue");

        let request: PremiumRequest =
            serde_json::from_str(r#"{"size": "small", "buildings": [{"yearBuilt": "1990s"}]}"#)
                .expect("Failed to parse");
        assert_eq!(request.classify().unwrap_err().field(), "buildings[0].yearBuilt");
    }

    #[test]
    fn test_both_spellings_prefer_canonical() {
        let request: PremiumRequest = serde_json::from_str(
            r#"{
                "size": "small",
                "pagodaSize": "large",
                "zone": "forest",
                "pagodaType": "city",
                "year_built": 1990,
                "yearBuilt": "1950",
                "buildings": [{"type": "other"}]
            }"#,
        )
        .expect("Failed to parse");

        let (property, _) = request.classify().expect("Failed to classify");
        assert_eq!(property.size, SizeCategory::Small);
        assert_eq!(property.zone, Some(ZoneCategory::Forest));
        assert_eq!(property.year_built, Some(1990));
    }
}
