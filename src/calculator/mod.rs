//! Premium calculation
//!
//! Canonical pricing model: a size-tier base premium plus a flat premium per
//! building kind, multiplied by a step age loading and rounded to whole
//! currency units.

mod engine;
mod result;
mod discount;

pub use engine::PremiumCalculator;
pub use result::{
    BuildingPremiumLine, CalculationMetadata, PremiumBreakdown, PremiumFactors, PremiumResult,
    UNKNOWN_BUILDING_NAME,
};
pub use discount::{annual_discount, AnnualDiscountResult};

use crate::error::PricingError;
use crate::property::{BuildingClassification, PropertyClassification};
use crate::rates::{ANNUAL_DISCOUNT_RATE, MAX_PREMIUM, MIN_PREMIUM};

/// Calculate a premium with the default rate tables as of now
pub fn calculate_premium(
    property: &PropertyClassification,
    buildings: &[BuildingClassification],
) -> Result<PremiumResult, PricingError> {
    PremiumCalculator::default().calculate_premium(property, buildings)
}

/// Annual payment price for a monthly premium at the standard 10% discount
pub fn calculate_annual_discount(monthly_premium: f64) -> Result<AnnualDiscountResult, PricingError> {
    annual_discount(monthly_premium, ANNUAL_DISCOUNT_RATE)
}

/// True iff `MIN_PREMIUM <= premium <= MAX_PREMIUM`
pub fn validate_premium(premium: f64) -> bool {
    (MIN_PREMIUM..=MAX_PREMIUM).contains(&premium)
}

/// Round to whole currency units, halves rounding up (2.5 → 3, -2.5 → -2)
pub fn round_half_up(value: f64) -> f64 {
    let floor = value.floor();
    if value - floor >= 0.5 {
        floor + 1.0
    } else {
        floor
    }
}
