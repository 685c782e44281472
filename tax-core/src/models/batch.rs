use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One row of batch input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchIncomeRecord {
    pub total_income: Decimal,
    #[serde(rename = "wht")]
    pub withholding_tax: Decimal,
    pub donation: Decimal,
}

/// Net tax for one batch record. `tax_refund` is only set when positive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchTaxDetail {
    pub total_income: Decimal,
    pub tax: Decimal,
    pub tax_refund: Option<Decimal>,
}
