//! Batch netting over many income records.
//!
//! Batch records skip allowance resolution. Withholding is subtracted from
//! taxable income and then again from the computed tax; when the second
//! subtraction goes below zero the shortfall becomes a refund.

use rust_decimal::Decimal;
use tracing::info;

use crate::calculations::common::max;
use crate::calculations::{BracketTable, LiabilityCalculator};
use crate::{BatchIncomeRecord, BatchTaxDetail, DeductionConfig, ValidationError};

#[derive(Debug, Clone)]
pub struct BatchCalculator<'a> {
    liability: LiabilityCalculator<'a>,
    config: &'a DeductionConfig,
}

impl<'a> BatchCalculator<'a> {
    pub fn new(
        table: &'a BracketTable,
        config: &'a DeductionConfig,
    ) -> Self {
        Self {
            liability: LiabilityCalculator::new(table),
            config,
        }
    }

    /// Computes one [`BatchTaxDetail`] per record, in input order.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::AmountOutOfRange`] for the first record
    /// whose deductions push taxable income past the decimal range. No
    /// partial result is returned.
    pub fn compute_batch(
        &self,
        records: &[BatchIncomeRecord],
    ) -> Result<Vec<BatchTaxDetail>, ValidationError> {
        let details = records
            .iter()
            .map(|r| self.compute_record(r))
            .collect::<Result<Vec<_>, _>>()?;
        info!(records = details.len(), "computed batch");
        Ok(details)
    }

    fn compute_record(
        &self,
        record: &BatchIncomeRecord,
    ) -> Result<BatchTaxDetail, ValidationError> {
        let out_of_range = || ValidationError::AmountOutOfRange {
            amount: max(record.donation, record.withholding_tax),
        };

        let taxable_income = record
            .total_income
            .checked_sub(self.config.personal_deduction_default)
            .and_then(|income| income.checked_sub(record.donation))
            .and_then(|income| income.checked_sub(record.withholding_tax))
            .ok_or_else(out_of_range)?;
        let tax = self.liability.compute_liability(taxable_income).total_tax;

        let net_tax = tax
            .checked_sub(record.withholding_tax)
            .ok_or_else(out_of_range)?;
        let (tax, tax_refund) = if net_tax < Decimal::ZERO {
            (Decimal::ZERO, Some(-net_tax))
        } else {
            (net_tax, None)
        };

        Ok(BatchTaxDetail {
            total_income: record.total_income,
            tax,
            tax_refund,
        })
    }
}
