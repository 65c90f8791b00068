//! Premium calculation engine

use super::discount::{annual_discount, AnnualDiscountResult};
use super::result::{
    BuildingPremiumLine, CalculationMetadata, PremiumBreakdown, PremiumFactors, PremiumResult,
    UNKNOWN_BUILDING_NAME,
};
use super::round_half_up;
use crate::error::PricingError;
use crate::property::{BuildingClassification, PremiumRequest, PropertyClassification};
use crate::rates::RateTables;
use chrono::{DateTime, Datelike, Utc};

/// Prices a pagoda and its buildings against a fixed set of rate tables
///
/// Holds no mutable state: one instance can be shared across threads and
/// every call depends only on its arguments and the tables.
#[derive(Debug, Clone)]
pub struct PremiumCalculator {
    rates: RateTables,
    /// Reject properties submitted without any building
    require_buildings: bool,
}

impl Default for PremiumCalculator {
    fn default() -> Self {
        Self::new(RateTables::default())
    }
}

impl PremiumCalculator {
    pub fn new(rates: RateTables) -> Self {
        Self {
            rates,
            require_buildings: true,
        }
    }

    /// Price properties without buildings at their base premium instead of rejecting them
    pub fn allow_empty_buildings(mut self, allow: bool) -> Self {
        self.require_buildings = !allow;
        self
    }

    pub fn rates(&self) -> &RateTables {
        &self.rates
    }

    /// Calculate the premium as of now
    pub fn calculate_premium(
        &self,
        property: &PropertyClassification,
        buildings: &[BuildingClassification],
    ) -> Result<PremiumResult, PricingError> {
        self.calculate_premium_at(property, buildings, Utc::now())
    }

    /// Calculate the premium with building age measured at `as_of`
    ///
    /// 1. Base premium from the size tier
    /// 2. One flat premium per building kind, summed
    /// 3. Age factor from `year_built` (step schedule)
    /// 4. total = round(subtotal × age factor)
    pub fn calculate_premium_at(
        &self,
        property: &PropertyClassification,
        buildings: &[BuildingClassification],
        as_of: DateTime<Utc>,
    ) -> Result<PremiumResult, PricingError> {
        let current_year = as_of.year();
        self.validate_inputs(property, buildings, current_year)?;

        let base_premium = self.rates.size.get_rate(property.size);

        let details: Vec<BuildingPremiumLine> = buildings
            .iter()
            .map(|building| BuildingPremiumLine {
                name: building
                    .name
                    .clone()
                    .unwrap_or_else(|| UNKNOWN_BUILDING_NAME.to_string()),
                kind: building.display_kind().to_string(),
                premium: self.rates.buildings.get_rate(building.kind),
            })
            .collect();
        let building_premium: f64 = details.iter().map(|line| line.premium).sum();

        // year_built <= current_year after validation
        let building_age = property.year_built.map(|year| (current_year - year) as u32);
        let age_factor = building_age.map_or(1.0, |age| self.rates.age.factor(age));

        let subtotal = base_premium + building_premium;
        let total_premium = round_half_up(subtotal * age_factor);
        let age_increase = total_premium - subtotal;

        Ok(PremiumResult {
            total_premium,
            breakdown: PremiumBreakdown {
                base_premium,
                building_premium,
                subtotal,
                factors: PremiumFactors {
                    age_factor,
                    age_increase,
                },
            },
            details,
            metadata: CalculationMetadata {
                pagoda_size: property.size,
                zone: property.zone,
                number_of_buildings: buildings.len(),
                year_built: property.year_built,
                building_age,
                calculated_at: as_of,
            },
        })
    }

    /// Classify a caller request and price it as of now
    pub fn calculate_request(&self, request: &PremiumRequest) -> Result<PremiumResult, PricingError> {
        self.calculate_request_at(request, Utc::now())
    }

    pub fn calculate_request_at(
        &self,
        request: &PremiumRequest,
        as_of: DateTime<Utc>,
    ) -> Result<PremiumResult, PricingError> {
        let (property, buildings) = request.classify()?;
        self.calculate_premium_at(&property, &buildings, as_of)
    }

    /// Annual payment price for a monthly premium, using this calculator's discount rate
    pub fn calculate_annual_discount(&self, monthly_premium: f64) -> Result<AnnualDiscountResult, PricingError> {
        annual_discount(monthly_premium, self.rates.annual_discount_rate)
    }

    /// Whether a premium lies within this calculator's persistable bounds
    pub fn validate_premium(&self, premium: f64) -> bool {
        self.rates.bounds.contains(premium)
    }

    fn validate_inputs(
        &self,
        property: &PropertyClassification,
        buildings: &[BuildingClassification],
        current_year: i32,
    ) -> Result<(), PricingError> {
        if self.require_buildings && buildings.is_empty() {
            return Err(PricingError::invalid("buildings", "[]", "at least one building is required"));
        }

        if let Some(year) = property.year_built {
            self.validate_year("yearBuilt", year, current_year)?;
        }

        for (index, building) in buildings.iter().enumerate() {
            if let Some(value) = building.estimated_value {
                validate_amount(&format!("buildings[{index}].estimatedValue"), value)?;
            }
            if let Some(area) = building.area {
                validate_amount(&format!("buildings[{index}].area"), area)?;
            }
            if let Some(year) = building.year_built {
                self.validate_year(&format!("buildings[{index}].yearBuilt"), year, current_year)?;
            }
        }

        Ok(())
    }

    fn validate_year(&self, field: &str, year: i32, current_year: i32) -> Result<(), PricingError> {
        if year > current_year {
            return Err(PricingError::invalid(
                field,
                year,
                format!("construction year is after {current_year}"),
            ));
        }
        if year < self.rates.age.min_year_built {
            return Err(PricingError::invalid(
                field,
                year,
                format!("construction year is before {}", self.rates.age.min_year_built),
            ));
        }
        Ok(())
    }
}

fn validate_amount(field: &str, value: f64) -> Result<(), PricingError> {
    if !value.is_finite() || value < 0.0 {
        return Err(PricingError::invalid(field, value, "must be a non-negative number"));
    }
    Ok(())
}
