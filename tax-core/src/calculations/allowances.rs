//! Allowance resolution.
//!
//! Declared allowances are validated and adjusted one at a time, in input
//! order, and summed on top of the configured personal deduction default.
//!
//! | Type | Rule |
//! |------|------|
//! | any | Negative amount rejects the whole request |
//! | `personal` | Must be within `10,000..=personal_deduction_max`; added on top of the default |
//! | `donation` | Capped at `donation_max` |
//! | `k-receipt` | Above `k_receipt_max`, replaced by `k_receipt_default` |
//! | other | Added unchanged |

use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::calculations::common::min;
use crate::{AllowanceDeclaration, AllowanceType, DeductionConfig, MIN_PERSONAL_DEDUCTION, ValidationError};

#[derive(Debug, Clone)]
pub struct AllowanceResolver<'a> {
    config: &'a DeductionConfig,
}

impl<'a> AllowanceResolver<'a> {
    pub fn new(config: &'a DeductionConfig) -> Self {
        Self { config }
    }

    /// Sums the personal deduction default and every resolved allowance.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] on the first negative amount, the first
    /// out-of-range personal allowance, or a total too large to represent.
    /// Nothing is partially applied.
    pub fn resolve_deductions(
        &self,
        declarations: &[AllowanceDeclaration],
    ) -> Result<Decimal, ValidationError> {
        let mut total = self.config.personal_deduction_default;

        for declaration in declarations {
            let amount = self.resolve(declaration)?;
            total = total
                .checked_add(amount)
                .ok_or(ValidationError::AmountOutOfRange { amount })?;
        }

        debug!(total_deductions = %total, count = declarations.len(), "resolved deductions");
        Ok(total)
    }

    /// Returns the amount a single declaration contributes.
    fn resolve(
        &self,
        declaration: &AllowanceDeclaration,
    ) -> Result<Decimal, ValidationError> {
        let amount = declaration.amount;
        if amount < Decimal::ZERO {
            return Err(ValidationError::NegativeDeduction(amount));
        }

        debug!(kind = declaration.allowance_type.as_str(), %amount, "resolving allowance");
        match declaration.allowance_type {
            AllowanceType::Personal => self.personal(amount),
            AllowanceType::Donation => Ok(self.donation(amount)),
            AllowanceType::KReceipt => Ok(self.k_receipt(amount)),
            AllowanceType::Other => Ok(amount),
        }
    }

    fn personal(
        &self,
        amount: Decimal,
    ) -> Result<Decimal, ValidationError> {
        let max = self.config.personal_deduction_max;
        if amount < MIN_PERSONAL_DEDUCTION || amount > max {
            return Err(ValidationError::PersonalDeductionOutOfRange {
                min: MIN_PERSONAL_DEDUCTION,
                max,
                amount,
            });
        }
        Ok(amount)
    }

    fn donation(
        &self,
        amount: Decimal,
    ) -> Decimal {
        let capped = min(amount, self.config.donation_max);
        if capped != amount {
            warn!(%amount, cap = %capped, "donation allowance capped");
        }
        capped
    }

    // Replaced with the default rather than clamped to the max.
    fn k_receipt(
        &self,
        amount: Decimal,
    ) -> Decimal {
        if amount > self.config.k_receipt_max && amount > Decimal::ZERO {
            let replacement = self.config.k_receipt_default;
            warn!(%amount, %replacement, "k-receipt allowance above maximum, using default");
            return replacement;
        }
        amount
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn declare(
        allowance_type: AllowanceType,
        amount: Decimal,
    ) -> AllowanceDeclaration {
        AllowanceDeclaration::new(allowance_type, amount)
    }

    fn resolve(declarations: &[AllowanceDeclaration]) -> Result<Decimal, ValidationError> {
        AllowanceResolver::new(&DeductionConfig::default()).resolve_deductions(declarations)
    }

    #[test]
    fn no_declarations_yields_personal_default() {
        assert_eq!(resolve(&[]), Ok(dec!(60000)));
    }

    #[test]
    fn accumulator_starts_at_configured_default() {
        let config = DeductionConfig {
            personal_deduction_default: dec!(45000),
            ..DeductionConfig::default()
        };

        let total = AllowanceResolver::new(&config).resolve_deductions(&[]);

        assert_eq!(total, Ok(dec!(45000)));
    }

    // =========================================================================
    // personal
    // =========================================================================

    #[test]
    fn personal_below_floor_is_rejected() {
        let result = resolve(&[declare(AllowanceType::Personal, dec!(5000))]);

        assert_eq!(
            result,
            Err(ValidationError::PersonalDeductionOutOfRange {
                min: dec!(10000),
                max: dec!(100000),
                amount: dec!(5000),
            })
        );
    }

    #[test]
    fn personal_above_max_is_rejected() {
        let result = resolve(&[declare(AllowanceType::Personal, dec!(100000.01))]);

        assert!(matches!(
            result,
            Err(ValidationError::PersonalDeductionOutOfRange { .. })
        ));
    }

    #[test]
    fn personal_is_added_on_top_of_default() {
        let result = resolve(&[declare(AllowanceType::Personal, dec!(10000))]);

        assert_eq!(result, Ok(dec!(70000)));
    }

    #[test]
    fn personal_range_is_inclusive() {
        assert_eq!(
            resolve(&[declare(AllowanceType::Personal, dec!(100000))]),
            Ok(dec!(160000))
        );
    }

    #[test]
    fn personal_error_message_names_range() {
        let err = resolve(&[declare(AllowanceType::Personal, dec!(5000))]).unwrap_err();

        assert_eq!(
            err.to_string(),
            "personal deduction must be between 10000 and 100000, got 5000"
        );
    }

    // =========================================================================
    // donation
    // =========================================================================

    #[test]
    fn donation_above_max_is_capped() {
        let result = resolve(&[declare(AllowanceType::Donation, dec!(150000))]);

        assert_eq!(result, Ok(dec!(60000) + dec!(100000)));
    }

    #[test]
    fn donation_within_max_is_unchanged() {
        let result = resolve(&[declare(AllowanceType::Donation, dec!(200))]);

        assert_eq!(result, Ok(dec!(60200)));
    }

    // =========================================================================
    // k-receipt
    // =========================================================================

    #[test]
    fn k_receipt_above_max_is_replaced_by_default() {
        let result = resolve(&[declare(AllowanceType::KReceipt, dec!(200000))]);

        assert_eq!(result, Ok(dec!(60000) + dec!(50000)));
    }

    #[test]
    fn k_receipt_at_max_is_unchanged() {
        let result = resolve(&[declare(AllowanceType::KReceipt, dec!(100000))]);

        assert_eq!(result, Ok(dec!(160000)));
    }

    #[test]
    fn k_receipt_replacement_follows_configured_default() {
        let config = DeductionConfig {
            k_receipt_default: dec!(0),
            ..DeductionConfig::default()
        };

        let result = AllowanceResolver::new(&config)
            .resolve_deductions(&[declare(AllowanceType::KReceipt, dec!(100001))]);

        assert_eq!(result, Ok(dec!(60000)));
    }

    // =========================================================================
    // other / combinations
    // =========================================================================

    #[test]
    fn other_types_pass_through_unchanged() {
        let result = resolve(&[declare(AllowanceType::Other, dec!(1234567))]);

        assert_eq!(result, Ok(dec!(1294567)));
    }

    #[test]
    fn total_beyond_decimal_range_is_rejected() {
        let half = Decimal::MAX / dec!(2);

        let result = resolve(&[
            declare(AllowanceType::Other, half),
            declare(AllowanceType::Other, half),
        ]);

        assert_eq!(result, Err(ValidationError::AmountOutOfRange { amount: half }));
    }

    #[test]
    fn single_huge_allowance_on_top_of_default_is_rejected() {
        let result = resolve(&[declare(AllowanceType::Other, Decimal::MAX)]);

        assert_eq!(
            result,
            Err(ValidationError::AmountOutOfRange {
                amount: Decimal::MAX
            })
        );
    }

    #[test]
    fn negative_amount_rejects_any_type() {
        for kind in [
            AllowanceType::Personal,
            AllowanceType::Donation,
            AllowanceType::KReceipt,
            AllowanceType::Other,
        ] {
            let result = resolve(&[declare(kind, dec!(-1))]);

            assert_eq!(
                result,
                Err(ValidationError::NegativeDeduction(dec!(-1))),
                "type {}",
                kind.as_str()
            );
        }
    }

    #[test]
    fn zero_amount_is_accepted() {
        assert_eq!(
            resolve(&[declare(AllowanceType::Donation, dec!(0))]),
            Ok(dec!(60000))
        );
    }

    #[test]
    fn first_invalid_declaration_aborts_request() {
        let result = resolve(&[
            declare(AllowanceType::Donation, dec!(1000)),
            declare(AllowanceType::Other, dec!(-5)),
            declare(AllowanceType::Personal, dec!(1)),
        ]);

        assert_eq!(result, Err(ValidationError::NegativeDeduction(dec!(-5))));
    }

    #[test]
    fn mixed_declarations_are_summed() {
        let result = resolve(&[
            declare(AllowanceType::Donation, dec!(150000)),
            declare(AllowanceType::KReceipt, dec!(200000)),
            declare(AllowanceType::Personal, dec!(20000)),
        ]);

        assert_eq!(result, Ok(dec!(60000) + dec!(100000) + dec!(50000) + dec!(20000)));
    }

    #[test]
    fn resolution_does_not_mutate_config() {
        let config = DeductionConfig::default();
        let before = config;

        let _ = AllowanceResolver::new(&config)
            .resolve_deductions(&[declare(AllowanceType::KReceipt, dec!(200000))]);

        assert_eq!(config, before);
    }
}
