use std::io::Read;

use rust_decimal::Decimal;
use tax_core::calculations::{BatchCalculator, BracketTable};
use tax_core::{BatchIncomeRecord, BatchTaxDetail, DeductionConfig, ValidationError};
use thiserror::Error;
use tracing::debug;

/// Errors that can occur when loading batch income records.
///
/// The first failing row aborts the whole load; no partial record list is
/// ever returned.
#[derive(Debug, Error)]
pub enum BatchLoadError {
    #[error("CSV parse error on row {row}: {source}")]
    Parse {
        row: usize,
        #[source]
        source: csv::Error,
    },

    #[error("negative {field} on row {row}: {amount}")]
    NegativeAmount {
        field: &'static str,
        row: usize,
        amount: Decimal,
    },

    #[error("batch computation failed: {0}")]
    Compute(#[from] ValidationError),
}

/// Loader for batch income records.
///
/// The CSV must carry a header row with these columns (any order, values
/// may be surrounded by whitespace):
///
/// | Column | Type | Notes |
/// |--------|------|-------|
/// | `totalIncome` | decimal | Gross income |
/// | `wht` | decimal | Withholding tax already paid |
/// | `donation` | decimal | Donation deduction, not capped in batch mode |
///
/// ```csv
/// totalIncome,wht,donation
/// 500000.0,0.0,0.0
/// 600000.0,40000.0,20000.0
/// ```
pub struct BatchRecordLoader;

impl BatchRecordLoader {
    /// Parse every record from a CSV reader, in file order.
    ///
    /// Row numbers in errors are 1-based and exclude the header.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<BatchIncomeRecord>, BatchLoadError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .flexible(false)
            .from_reader(reader);

        let records = csv_reader
            .deserialize::<BatchIncomeRecord>()
            .enumerate()
            .map(|(idx, result)| {
                let row = idx + 1;
                let record = result.map_err(|source| BatchLoadError::Parse { row, source })?;
                check_non_negative(&record, row)?;
                Ok(record)
            })
            .collect::<Result<Vec<_>, BatchLoadError>>()?;

        debug!(records = records.len(), "parsed batch records");
        Ok(records)
    }

    /// Parse the whole input, then compute tax for every record.
    ///
    /// Computation only starts once every row has parsed successfully, and
    /// a record whose amounts cannot be computed fails the whole batch.
    pub fn compute<R: Read>(
        reader: R,
        table: &BracketTable,
        config: &DeductionConfig,
    ) -> Result<Vec<BatchTaxDetail>, BatchLoadError> {
        let records = Self::parse(reader)?;
        Ok(BatchCalculator::new(table, config).compute_batch(&records)?)
    }
}

fn check_non_negative(
    record: &BatchIncomeRecord,
    row: usize,
) -> Result<(), BatchLoadError> {
    let fields = [
        ("totalIncome", record.total_income),
        ("wht", record.withholding_tax),
        ("donation", record.donation),
    ];

    match fields.into_iter().find(|(_, amount)| *amount < Decimal::ZERO) {
        Some((field, amount)) => Err(BatchLoadError::NegativeAmount { field, row, amount }),
        None => Ok(()),
    }
}
