//! Size, building and age-loading tables

use super::loader::ConfigError;
use super::*;
use crate::property::{BuildingKind, SizeCategory};
use serde::{Deserialize, Serialize};

/// Base premium by pagoda size tier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SizeRates {
    pub small: f64,
    pub medium: f64,
    pub large: f64,
}

impl Default for SizeRates {
    fn default() -> Self {
        Self {
            small: SMALL_BASE_PREMIUM,
            medium: MEDIUM_BASE_PREMIUM,
            large: LARGE_BASE_PREMIUM,
        }
    }
}

impl SizeRates {
    /// Base premium for a size tier
    pub fn get_rate(&self, size: SizeCategory) -> f64 {
        match size {
            SizeCategory::Small => self.small,
            SizeCategory::Medium => self.medium,
            SizeCategory::Large => self.large,
        }
    }
}

/// Flat premium by building kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildingRates {
    pub main_temple: f64,
    pub chanting_hall: f64,
    pub residence: f64,
    pub other: f64,
}

impl Default for BuildingRates {
    fn default() -> Self {
        Self {
            main_temple: MAIN_TEMPLE_PREMIUM,
            chanting_hall: CHANTING_HALL_PREMIUM,
            residence: RESIDENCE_PREMIUM,
            other: OTHER_BUILDING_PREMIUM,
        }
    }
}

impl BuildingRates {
    pub fn get_rate(&self, kind: BuildingKind) -> f64 {
        match kind {
            BuildingKind::MainTemple => self.main_temple,
            BuildingKind::ChantingHall => self.chanting_hall,
            BuildingKind::Residence => self.residence,
            BuildingKind::Other => self.other,
        }
    }
}

/// Step loading on construction age
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgeLoading {
    /// Ages strictly above this use `moderate_factor`
    pub moderate_threshold: u32,
    pub moderate_factor: f64,
    /// Ages strictly above this use `old_factor`
    pub old_threshold: u32,
    pub old_factor: f64,
    /// Earliest accepted construction year
    pub min_year_built: i32,
}

impl Default for AgeLoading {
    fn default() -> Self {
        Self {
            moderate_threshold: MODERATE_AGE_THRESHOLD,
            moderate_factor: MODERATE_AGE_FACTOR,
            old_threshold: OLD_AGE_THRESHOLD,
            old_factor: OLD_AGE_FACTOR,
            min_year_built: MIN_YEAR_BUILT,
        }
    }
}

impl AgeLoading {
    /// Loading factor for a construction age in whole years
    pub fn factor(&self, age: u32) -> f64 {
        if age > self.old_threshold {
            self.old_factor
        } else if age > self.moderate_threshold {
            self.moderate_factor
        } else {
            1.0
        }
    }
}

/// Acceptable range for a persisted premium
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PremiumBounds {
    pub min: f64,
    pub max: f64,
}

impl Default for PremiumBounds {
    fn default() -> Self {
        Self {
            min: MIN_PREMIUM,
            max: MAX_PREMIUM,
        }
    }
}

impl PremiumBounds {
    pub fn contains(&self, premium: f64) -> bool {
        premium >= self.min && premium <= self.max
    }
}

/// Combined rate tables injected into the calculator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RateTables {
    pub size: SizeRates,
    pub buildings: BuildingRates,
    pub age: AgeLoading,
    pub annual_discount_rate: f64,
    pub bounds: PremiumBounds,
}

impl Default for RateTables {
    fn default() -> Self {
        Self {
            size: SizeRates::default(),
            buildings: BuildingRates::default(),
            age: AgeLoading::default(),
            annual_discount_rate: ANNUAL_DISCOUNT_RATE,
            bounds: PremiumBounds::default(),
        }
    }
}

impl RateTables {
    /// Check that the tables describe a usable pricing model
    pub fn validate(&self) -> Result<(), ConfigError> {
        let amounts = [
            ("size.small", self.size.small),
            ("size.medium", self.size.medium),
            ("size.large", self.size.large),
            ("buildings.main_temple", self.buildings.main_temple),
            ("buildings.chanting_hall", self.buildings.chanting_hall),
            ("buildings.residence", self.buildings.residence),
            ("buildings.other", self.buildings.other),
        ];
        for (name, amount) in amounts {
            if !amount.is_finite() || amount < 0.0 {
                return Err(ConfigError::Invalid(format!("{name} must be a non-negative amount, got {amount}")));
            }
            // Whole units keep age_increase non-negative after rounding
            if amount.fract() != 0.0 {
                return Err(ConfigError::Invalid(format!("{name} must be whole currency units, got {amount}")));
            }
        }

        if !(self.size.small < self.size.medium && self.size.medium < self.size.large) {
            return Err(ConfigError::Invalid(format!(
                "size tiers must increase strictly: small {} < medium {} < large {}",
                self.size.small, self.size.medium, self.size.large
            )));
        }

        let age = &self.age;
        if age.moderate_threshold >= age.old_threshold {
            return Err(ConfigError::Invalid(format!(
                "age.moderate_threshold ({}) must be below age.old_threshold ({})",
                age.moderate_threshold, age.old_threshold
            )));
        }
        // Loadings never discount and never shrink with age
        if !(1.0 <= age.moderate_factor && age.moderate_factor <= age.old_factor) {
            return Err(ConfigError::Invalid(format!(
                "age factors must satisfy 1.0 <= moderate ({}) <= old ({})",
                age.moderate_factor, age.old_factor
            )));
        }

        if !(0.0..1.0).contains(&self.annual_discount_rate) {
            return Err(ConfigError::Invalid(format!(
                "annual_discount_rate must be in [0, 1), got {}",
                self.annual_discount_rate
            )));
        }

        if !(self.bounds.min >= 0.0 && self.bounds.min <= self.bounds.max) {
            return Err(ConfigError::Invalid(format!(
                "premium bounds must satisfy 0 <= min ({}) <= max ({})",
                self.bounds.min, self.bounds.max
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_rates() {
        let rates = SizeRates::default();

        assert_eq!(rates.get_rate(SizeCategory::Small), 200.0);
        assert_eq!(rates.get_rate(SizeCategory::Medium), 500.0);
        assert_eq!(rates.get_rate(SizeCategory::Large), 1000.0);
    }

    #[test]
    fn test_building_rates() {
        let rates = BuildingRates::default();

        assert_eq!(rates.get_rate(BuildingKind::MainTemple), 300.0);
        assert_eq!(rates.get_rate(BuildingKind::ChantingHall), 150.0);
        assert_eq!(rates.get_rate(BuildingKind::Residence), 100.0);
        assert_eq!(rates.get_rate(BuildingKind::Other), 80.0);
    }

    #[test]
    fn test_age_loading_steps() {
        let age = AgeLoading::default();

        assert_eq!(age.factor(0), 1.0);
        assert_eq!(age.factor(30), 1.0);   // Boundary carries no loading
        assert_eq!(age.factor(31), 1.1);
        assert_eq!(age.factor(50), 1.1);
        assert_eq!(age.factor(51), 1.2);
        assert_eq!(age.factor(400), 1.2);
    }

    #[test]
    fn test_premium_bounds() {
        let bounds = PremiumBounds::default();

        assert!(bounds.contains(100.0));
        assert!(bounds.contains(50_000.0));
        assert!(!bounds.contains(99.0));
        assert!(!bounds.contains(50_001.0));
    }

    #[test]
    fn test_default_tables_are_valid() {
        assert!(RateTables::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_broken_tables() {
        let mut tables = RateTables::default();
        tables.size.medium = 150.0;
        assert!(tables.validate().is_err());

        let mut tables = RateTables::default();
        tables.buildings.other = -1.0;
        assert!(tables.validate().is_err());

        let mut tables = RateTables::default();
        tables.age.moderate_factor = 0.9;
        assert!(tables.validate().is_err());

        let mut tables = RateTables::default();
        tables.age.old_threshold = 20;
        assert!(tables.validate().is_err());

        let mut tables = RateTables::default();
        tables.buildings.residence = 99.5;
        assert!(tables.validate().is_err());

        let mut tables = RateTables::default();
        tables.annual_discount_rate = 1.5;
        assert!(tables.validate().is_err());

        let mut tables = RateTables::default();
        tables.bounds.min = 60_000.0;
        assert!(tables.validate().is_err());
    }
}
