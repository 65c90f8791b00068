//! Calculate endpoint, independent of any HTTP framework
//!
//! Turns a raw JSON body into a status code and the JSON envelope used by the
//! rest of the application (`success`, `message`, `data` / `errors`).

use crate::calculator::PremiumCalculator;
use crate::error::PricingError;
use crate::property::PremiumRequest;
use chrono::{DateTime, Utc};
use serde_json::{json, Value};

/// Status code and JSON body ready to be written to a client
#[derive(Debug, Clone, PartialEq)]
pub struct HandlerResponse {
    pub status: u16,
    pub body: Value,
}

impl HandlerResponse {
    fn ok(data: Value) -> Self {
        Self {
            status: 200,
            body: json!({
                "success": true,
                "message": "Premium calculated successfully",
                "data": data,
            }),
        }
    }

    fn bad_request(message: &str, errors: Value) -> Self {
        Self {
            status: 400,
            body: json!({
                "success": false,
                "message": message,
                "errors": errors,
            }),
        }
    }

    fn internal(message: String) -> Self {
        Self {
            status: 500,
            body: json!({
                "success": false,
                "message": "Failed to calculate premium",
                "error": message,
            }),
        }
    }
}

impl From<PricingError> for HandlerResponse {
    fn from(err: PricingError) -> Self {
        HandlerResponse::bad_request("Validation failed", json!([err.to_field_error()]))
    }
}

/// Handle a calculate request body, measuring building age at `as_of`
pub fn handle_calculate(body: &[u8], calculator: &PremiumCalculator, as_of: DateTime<Utc>) -> HandlerResponse {
    let request: PremiumRequest = match serde_json::from_slice(body) {
        Ok(request) => request,
        Err(err) => {
            return HandlerResponse::bad_request(
                "Malformed request body",
                json!([{ "field": "body", "value": "", "msg": err.to_string() }]),
            );
        }
    };

    let result = match calculator.calculate_request_at(&request, as_of) {
        Ok(result) => result,
        Err(err) => return err.into(),
    };

    match serde_json::to_value(&result) {
        Ok(data) => HandlerResponse::ok(data),
        Err(err) => HandlerResponse::internal(err.to_string()),
    }
}
