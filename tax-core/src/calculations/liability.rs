//! Progressive liability calculation.
//!
//! Income is sliced from the top of the schedule down. Each tier taxes the
//! portion of the remaining income above its own lower bound, after which
//! the remaining income is clamped to that bound before the next (lower)
//! tier is evaluated.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use tax_core::calculations::{BracketTable, LiabilityCalculator};
//!
//! let table = BracketTable::reference();
//! let liability = LiabilityCalculator::new(&table).compute_liability(dec!(1000000));
//!
//! assert_eq!(liability.total_tax, dec!(110000));
//! assert_eq!(liability.brackets[1].tax, dec!(35000));
//! assert_eq!(liability.brackets[2].tax, dec!(75000));
//! ```

use rust_decimal::Decimal;
use tracing::debug;

use crate::BracketTax;
use crate::calculations::BracketTable;

/// Gross liability before any withholding is netted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Liability {
    pub total_tax: Decimal,
    /// One entry per tier, lowest tier first. Untaxed tiers carry zero.
    pub brackets: Vec<BracketTax>,
}

#[derive(Debug, Clone)]
pub struct LiabilityCalculator<'a> {
    table: &'a BracketTable,
}

impl<'a> LiabilityCalculator<'a> {
    pub fn new(table: &'a BracketTable) -> Self {
        Self { table }
    }

    /// Computes total tax and the per-bracket breakdown for `taxable_income`.
    ///
    /// Zero or negative income produces a zero liability in every bracket.
    pub fn compute_liability(
        &self,
        taxable_income: Decimal,
    ) -> Liability {
        let tiers = self.table.tiers();
        let mut taxes = vec![Decimal::ZERO; tiers.len()];
        let mut remaining = taxable_income;

        for (idx, tier) in tiers.iter().enumerate().rev() {
            if remaining > tier.lower_bound {
                taxes[idx] = (remaining - tier.lower_bound) * tier.rate;
                remaining = tier.lower_bound;
            }
        }

        let total_tax: Decimal = taxes.iter().copied().sum();
        debug!(%taxable_income, %total_tax, "computed liability");

        Liability {
            total_tax,
            brackets: tiers
                .iter()
                .zip(taxes)
                .map(|(tier, tax)| BracketTax {
                    label: tier.label.clone(),
                    tax,
                })
                .collect(),
        }
    }
}
