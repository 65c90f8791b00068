//! Error type for the pricing API

use serde::Serialize;
use thiserror::Error;

/// Failure raised by premium calculation and input conversion.
///
/// Malformed input is the only way pricing can fail. The variant carries the
/// field path (e.g. `buildings[1].estimatedValue`) and the offending value so
/// callers can build an itemized validation message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PricingError {
    #[error("invalid value {value:?} for `{field}`: {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },
}

impl PricingError {
    pub fn invalid(field: impl Into<String>, value: impl ToString, reason: impl Into<String>) -> Self {
        PricingError::InvalidInput {
            field: field.into(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    /// Field path of the offending input
    pub fn field(&self) -> &str {
        match self {
            PricingError::InvalidInput { field, .. } => field,
        }
    }

    /// Itemized form used in validation responses
    pub fn to_field_error(&self) -> FieldError {
        match self {
            PricingError::InvalidInput { field, value, reason } => FieldError {
                field: field.clone(),
                value: value.clone(),
                msg: reason.clone(),
            },
        }
    }
}

/// One entry of a validation error list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub value: String,
    pub msg: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_format() {
        let err = PricingError::invalid("size", "gigantic", "expected small, medium or large");
        assert_eq!(
            err.to_string(),
            "invalid value \"gigantic\" for `size`: expected small, medium or large"
        );
        assert_eq!(err.field(), "size");
    }

    #[test]
    fn test_field_error() {
        let err = PricingError::invalid("buildings[0].area", -3.5, "must be non-negative");
        let item = err.to_field_error();
        assert_eq!(item.field, "buildings[0].area");
        assert_eq!(item.value, "-3.5");
        assert_eq!(item.msg, "must be non-negative");
    }
}
