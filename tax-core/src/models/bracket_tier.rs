use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One tier of the progressive schedule.
///
/// `lower_bound` is the threshold above which `rate` applies. `label` is an
/// opaque display string and may contain non-ASCII text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketTier {
    pub label: String,
    pub lower_bound: Decimal,
    pub rate: Decimal,
}

impl BracketTier {
    pub fn new(
        label: impl Into<String>,
        lower_bound: Decimal,
        rate: Decimal,
    ) -> Self {
        Self {
            label: label.into(),
            lower_bound,
            rate,
        }
    }
}
