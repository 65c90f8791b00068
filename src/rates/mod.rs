//! Rate tables for premium pricing
//!
//! Every amount the calculator uses is defined once here as a named constant.
//! The constants seed `RateTables::default()`; a JSON file may override any
//! subset of them.

mod tables;
pub mod loader;

pub use tables::{AgeLoading, BuildingRates, PremiumBounds, RateTables, SizeRates};
pub use loader::ConfigError;

// ============================================================================
// Size tiers
// ============================================================================
// Base premium charged for the property itself, independent of buildings.
// Tiers must be strictly increasing from small to large.

/// Base premium for a small pagoda
pub const SMALL_BASE_PREMIUM: f64 = 200.0;

/// Base premium for a medium pagoda
pub const MEDIUM_BASE_PREMIUM: f64 = 500.0;

/// Base premium for a large pagoda
pub const LARGE_BASE_PREMIUM: f64 = 1000.0;

// ============================================================================
// Building kinds
// ============================================================================

/// Premium per main temple (vihara)
pub const MAIN_TEMPLE_PREMIUM: f64 = 300.0;

/// Premium per chanting hall
pub const CHANTING_HALL_PREMIUM: f64 = 150.0;

/// Premium per monk residence (kuti)
pub const RESIDENCE_PREMIUM: f64 = 100.0;

/// Premium for any other building, including unrecognized kinds
pub const OTHER_BUILDING_PREMIUM: f64 = 80.0;

// ============================================================================
// Age loading
// ============================================================================
// Step schedule on construction age in whole years. Comparisons are strict:
// age 30 carries no loading, age 31 carries the moderate loading.

/// Ages strictly above this carry the moderate loading
pub const MODERATE_AGE_THRESHOLD: u32 = 30;

/// Loading for 30 < age <= 50 (10% increase)
pub const MODERATE_AGE_FACTOR: f64 = 1.1;

/// Ages strictly above this carry the old-building loading
pub const OLD_AGE_THRESHOLD: u32 = 50;

/// Loading for age > 50 (20% increase)
pub const OLD_AGE_FACTOR: f64 = 1.2;

/// Earliest construction year accepted as valid input
pub const MIN_YEAR_BUILT: i32 = 1900;

// ============================================================================
// Payment terms and bounds
// ============================================================================

/// Discount applied when twelve monthly premiums are paid annually (10%)
pub const ANNUAL_DISCOUNT_RATE: f64 = 0.10;

/// Smallest premium callers should persist
pub const MIN_PREMIUM: f64 = 100.0;

/// Largest premium callers should persist
pub const MAX_PREMIUM: f64 = 50_000.0;
