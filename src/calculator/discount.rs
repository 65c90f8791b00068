//! Annual payment discount

use super::round_half_up;
use crate::error::PricingError;
use serde::{Deserialize, Serialize};

/// Cost of paying twelve monthly premiums as one annual payment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnualDiscountResult {
    pub monthly_premium: f64,
    /// monthly_premium × 12
    pub annual_premium: f64,
    pub discount_rate: f64,
    /// round(annual_premium × discount_rate)
    pub discount_amount: f64,
    /// annual_premium - discount_amount
    pub final_amount: f64,
    pub savings: f64,
}

/// Apply `discount_rate` to twelve months of `monthly_premium`
pub fn annual_discount(monthly_premium: f64, discount_rate: f64) -> Result<AnnualDiscountResult, PricingError> {
    if !monthly_premium.is_finite() || monthly_premium < 0.0 {
        return Err(PricingError::invalid(
            "monthlyPremium",
            monthly_premium,
            "must be a non-negative amount",
        ));
    }

    let annual_premium = monthly_premium * 12.0;
    let discount_amount = round_half_up(annual_premium * discount_rate);
    let final_amount = annual_premium - discount_amount;

    Ok(AnnualDiscountResult {
        monthly_premium,
        annual_premium,
        discount_rate,
        discount_amount,
        final_amount,
        savings: discount_amount,
    })
}
