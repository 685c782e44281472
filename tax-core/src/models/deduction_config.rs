use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Lowest personal allowance accepted, both on requests and as the
/// configured default.
pub const MIN_PERSONAL_DEDUCTION: Decimal = dec!(10000);

/// Deduction limits and defaults.
///
/// Only `personal_deduction_default` and `k_receipt_default` change at
/// runtime; see [`crate::settings::DeductionSettings`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeductionConfig {
    pub personal_deduction_default: Decimal,
    pub personal_deduction_max: Decimal,
    pub donation_max: Decimal,
    pub k_receipt_default: Decimal,
    pub k_receipt_max: Decimal,
}

impl Default for DeductionConfig {
    fn default() -> Self {
        Self {
            personal_deduction_default: dec!(60000),
            personal_deduction_max: dec!(100000),
            donation_max: dec!(100000),
            k_receipt_default: dec!(50000),
            k_receipt_max: dec!(100000),
        }
    }
}
