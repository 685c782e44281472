use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AllowanceType {
    #[serde(rename = "personal")]
    Personal,
    #[serde(rename = "donation")]
    Donation,
    #[serde(rename = "k-receipt")]
    KReceipt,
    /// Any type without its own rule. Amounts pass through unchanged.
    #[serde(rename = "other")]
    #[serde(other)]
    Other,
}

impl AllowanceType {
    /// Wire name, as used in request bodies and log fields.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Personal => "personal",
            Self::Donation => "donation",
            Self::KReceipt => "k-receipt",
            Self::Other => "other",
        }
    }
}

/// A single allowance declared on a request. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllowanceDeclaration {
    pub allowance_type: AllowanceType,
    pub amount: Decimal,
}

impl AllowanceDeclaration {
    pub fn new(
        allowance_type: AllowanceType,
        amount: Decimal,
    ) -> Self {
        Self {
            allowance_type,
            amount,
        }
    }
}
