//! Property and building classifications, and the request shape they are built from

mod data;
pub mod request;

pub use data::{
    BuildingClassification, BuildingKind, ConstructionMaterial, PropertyClassification, SizeCategory,
    ZoneCategory,
};
pub use request::{BuildingRequest, NumericInput, PremiumRequest};
