//! The progressive bracket schedule.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use thiserror::Error;

use crate::BracketTier;

/// Reasons a tier list cannot be used as a progressive schedule.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BracketTableError {
    #[error("bracket table must contain at least one tier")]
    Empty,

    #[error("first tier must start at 0, got {0}")]
    FirstTierNotZero(Decimal),

    #[error("tier '{label}' lower bound {lower_bound} is not above the previous tier")]
    NotAscending { label: String, lower_bound: Decimal },

    #[error("tier '{label}' rate {rate} is not above the previous tier")]
    RateNotIncreasing { label: String, rate: Decimal },
}

/// Ordered, read-only set of progressive tiers.
///
/// Tiers are contiguous: each one covers income from its own `lower_bound`
/// up to the next tier's `lower_bound`, and the last one is unbounded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BracketTable {
    tiers: Vec<BracketTier>,
}

impl BracketTable {
    /// Builds a table from tiers sorted by `lower_bound`.
    ///
    /// # Errors
    ///
    /// Returns [`BracketTableError`] if the list is empty, does not start at
    /// zero, or if bounds or rates fail to strictly increase.
    pub fn new(tiers: Vec<BracketTier>) -> Result<Self, BracketTableError> {
        let first = tiers.first().ok_or(BracketTableError::Empty)?;
        if !first.lower_bound.is_zero() {
            return Err(BracketTableError::FirstTierNotZero(first.lower_bound));
        }

        for pair in tiers.windows(2) {
            let (prev, next) = (&pair[0], &pair[1]);
            if next.lower_bound <= prev.lower_bound {
                return Err(BracketTableError::NotAscending {
                    label: next.label.clone(),
                    lower_bound: next.lower_bound,
                });
            }
            if next.rate <= prev.rate {
                return Err(BracketTableError::RateNotIncreasing {
                    label: next.label.clone(),
                    rate: next.rate,
                });
            }
        }

        Ok(Self { tiers })
    }

    /// The fixed reference schedule.
    ///
    /// | Tier | Income | Rate |
    /// |------|--------|------|
    /// | 1 | 0 - 150,000 | 0% |
    /// | 2 | 150,001 - 500,000 | 10% |
    /// | 3 | 500,001 - 1,000,000 | 15% |
    /// | 4 | 1,000,001 - 2,000,000 | 20% |
    /// | 5 | above 2,000,000 | 35% |
    pub fn reference() -> Self {
        Self {
            tiers: vec![
                BracketTier::new("0-150,000", dec!(0), dec!(0)),
                BracketTier::new("150,001-500,000", dec!(150000), dec!(0.10)),
                BracketTier::new("500,001-1,000,000", dec!(500000), dec!(0.15)),
                BracketTier::new("1,000,001-2,000,000", dec!(1000000), dec!(0.20)),
                BracketTier::new("2,000,001 ขึ้นไป", dec!(2000000), dec!(0.35)),
            ],
        }
    }

    pub fn tiers(&self) -> &[BracketTier] {
        &self.tiers
    }
}

impl Default for BracketTable {
    fn default() -> Self {
        Self::reference()
    }
}
