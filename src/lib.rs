//! Pagoda Premium - fire-insurance premium engine for pagodas and their buildings
//!
//! This library provides:
//! - Premium calculation from size tier, building kinds and construction age
//! - Named, overridable rate tables shared by the calculator and its callers
//! - Annual payment discount and premium bounds checks
//! - A framework-free request handler for the calculate endpoint
//! - Portfolio quoting over a CSV register of pagodas

pub mod error;
pub mod rates;
pub mod property;
pub mod calculator;
pub mod handler;
pub mod portfolio;

// Re-export commonly used types
pub use error::PricingError;
pub use rates::RateTables;
pub use property::{BuildingClassification, BuildingKind, PremiumRequest, PropertyClassification, SizeCategory};
pub use calculator::{
    calculate_annual_discount, calculate_premium, validate_premium, AnnualDiscountResult,
    PremiumCalculator, PremiumResult,
};
