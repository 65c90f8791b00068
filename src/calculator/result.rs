//! Premium calculation output
//!
//! Serialized with camelCase keys. The JSON form is what gets persisted as a
//! policy's `calculation_details`, so field names must stay stable.

use crate::property::{SizeCategory, ZoneCategory};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Name shown for a building submitted without one
pub const UNKNOWN_BUILDING_NAME: &str = "Unknown Building";

/// Priced premium with its itemized justification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PremiumResult {
    /// Total premium in whole currency units
    pub total_premium: f64,
    pub breakdown: PremiumBreakdown,
    /// One line per building, in input order
    pub details: Vec<BuildingPremiumLine>,
    pub metadata: CalculationMetadata,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PremiumBreakdown {
    /// Size tier component
    pub base_premium: f64,
    /// Sum of all building lines
    pub building_premium: f64,
    /// base_premium + building_premium
    pub subtotal: f64,
    pub factors: PremiumFactors,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PremiumFactors {
    /// Multiplicative age loading (1.0, 1.1 or 1.2 with default tables)
    pub age_factor: f64,
    /// Amount added by the age loading after rounding
    pub age_increase: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildingPremiumLine {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub premium: f64,
}

/// Inputs echoed back for audit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationMetadata {
    pub pagoda_size: SizeCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zone: Option<ZoneCategory>,
    pub number_of_buildings: usize,
    pub year_built: Option<i32>,
    #[serde(default)]
    pub building_age: Option<u32>,
    /// Advisory only; excluded from any comparison of results
    pub calculated_at: DateTime<Utc>,
}

impl PremiumResult {
    /// JSON audit trail stored alongside a persisted policy
    pub fn calculation_details(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Parse a stored audit trail
    pub fn from_calculation_details(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Compare pricing content, ignoring the advisory timestamp
    pub fn same_pricing(&self, other: &PremiumResult) -> bool {
        self.total_premium == other.total_premium
            && self.breakdown == other.breakdown
            && self.details == other.details
            && self.metadata.same_inputs(&other.metadata)
    }
}

impl CalculationMetadata {
    /// Every echoed input except `calculated_at`
    pub fn same_inputs(&self, other: &CalculationMetadata) -> bool {
        let CalculationMetadata {
            pagoda_size,
            zone,
            number_of_buildings,
            year_built,
            building_age,
            calculated_at: _,
        } = self;

        *pagoda_size == other.pagoda_size
            && *zone == other.zone
            && *number_of_buildings == other.number_of_buildings
            && *year_built == other.year_built
            && *building_age == other.building_age
    }
}
