use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::AllowanceDeclaration;

/// A single-person tax computation request, as decoded by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxComputationRequest {
    pub total_income: Decimal,

    /// Tax already withheld at source.
    #[serde(rename = "wht")]
    pub withholding_tax: Decimal,

    #[serde(default)]
    pub allowances: Vec<AllowanceDeclaration>,
}

/// Tax attributed to one bracket of the schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketTax {
    pub label: String,
    pub tax: Decimal,
}

/// Outcome of a single computation, after withholding has been netted.
///
/// `total_tax` may be negative (an overall refund). Bracket taxes never are.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxComputationResult {
    pub total_tax: Decimal,
    pub brackets: Vec<BracketTax>,
}
