use rust_decimal::Decimal;
use thiserror::Error;

/// Request-level validation failures.
///
/// Any of these aborts the computation; nothing is partially applied.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// An allowance was declared with a negative amount.
    #[error("deduction amounts cannot be negative, got {0}")]
    NegativeDeduction(Decimal),

    /// A personal allowance fell outside the accepted range.
    #[error("personal deduction must be between {min} and {max}, got {amount}")]
    PersonalDeductionOutOfRange {
        min: Decimal,
        max: Decimal,
        amount: Decimal,
    },

    /// Summing or subtracting amounts would leave the representable range.
    #[error("amount {amount} takes the computation outside the supported range")]
    AmountOutOfRange { amount: Decimal },

    /// Withholding tax was negative or exceeded total income.
    #[error("withholding tax {withholding_tax} must be between 0 and total income {total_income}")]
    InvalidWithholding {
        withholding_tax: Decimal,
        total_income: Decimal,
    },
}
