//! Single-request income tax computation.
//!
//! # Steps
//!
//! | Step | Description |
//! |------|-------------|
//! | 1 | Total deductions: personal default + resolved allowances |
//! | 2 | Validate withholding: `0 <= wht <= total income` |
//! | 3 | Taxable income: total income - total deductions (may be negative) |
//! | 4 | Liability from the bracket table |
//! | 5 | Net withholding against total and each bracket |
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use tax_core::calculations::{BracketTable, IncomeTaxWorksheet};
//! use tax_core::{AllowanceDeclaration, AllowanceType, DeductionConfig, TaxComputationRequest};
//!
//! let table = BracketTable::reference();
//! let request = TaxComputationRequest {
//!     total_income: dec!(500000),
//!     withholding_tax: dec!(0),
//!     allowances: vec![AllowanceDeclaration::new(AllowanceType::Donation, dec!(200000))],
//! };
//!
//! let result = IncomeTaxWorksheet::new(&table)
//!     .calculate(&request, &DeductionConfig::default())
//!     .unwrap();
//!
//! assert_eq!(result.total_tax, dec!(19000));
//! ```

use rust_decimal::Decimal;
use tracing::debug;

use crate::calculations::{AllowanceResolver, BracketTable, LiabilityCalculator, net_withholding};
use crate::{DeductionConfig, TaxComputationRequest, TaxComputationResult, ValidationError};

#[derive(Debug, Clone)]
pub struct IncomeTaxWorksheet<'a> {
    liability: LiabilityCalculator<'a>,
}

impl<'a> IncomeTaxWorksheet<'a> {
    pub fn new(table: &'a BracketTable) -> Self {
        Self {
            liability: LiabilityCalculator::new(table),
        }
    }

    /// Runs every step for one request against a configuration snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] if an allowance is invalid or the
    /// withholding amount is outside `0..=total_income`. Allowances are
    /// checked first.
    pub fn calculate(
        &self,
        request: &TaxComputationRequest,
        config: &DeductionConfig,
    ) -> Result<TaxComputationResult, ValidationError> {
        let total_deductions =
            AllowanceResolver::new(config).resolve_deductions(&request.allowances)?;

        self.validate_withholding(request.withholding_tax, request.total_income)?;

        let taxable_income = request
            .total_income
            .checked_sub(total_deductions)
            .ok_or(ValidationError::AmountOutOfRange {
                amount: total_deductions,
            })?;
        debug!(%taxable_income, %total_deductions, "taxable income");

        let liability = self.liability.compute_liability(taxable_income);
        let net = net_withholding(
            liability.total_tax,
            &liability.brackets,
            request.withholding_tax,
        );

        Ok(TaxComputationResult {
            total_tax: net.net_total,
            brackets: net.brackets,
        })
    }

    fn validate_withholding(
        &self,
        withholding_tax: Decimal,
        total_income: Decimal,
    ) -> Result<(), ValidationError> {
        if withholding_tax < Decimal::ZERO || withholding_tax > total_income {
            return Err(ValidationError::InvalidWithholding {
                withholding_tax,
                total_income,
            });
        }
        Ok(())
    }
}
