//! Wiring between the command line, the deduction store and the calculators.

use std::io::Read;

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use tax_core::calculations::{BracketTable, IncomeTaxWorksheet};
use tax_core::db::{DbConfig, RepositoryRegistry};
use tax_core::{
    AdjustableDeduction, BatchTaxDetail, DeductionConfig, DeductionRepository, DeductionSettings,
    TaxComputationRequest, TaxComputationResult,
};
use tax_data::BatchRecordLoader;
use tax_db_sqlite::SqliteRepositoryFactory;
use tracing::{debug, info};

/// Registry with every backend this binary knows about.
pub fn build_registry() -> RepositoryRegistry {
    let mut registry = RepositoryRegistry::new();
    registry.register(Box::new(SqliteRepositoryFactory));
    registry
}

pub async fn open_repository(config: &DbConfig) -> Result<Box<dyn DeductionRepository>> {
    debug!("connecting to {} backend", config.backend);
    build_registry()
        .create(config)
        .await
        .with_context(|| {
            format!(
                "failed to open {} store '{}'",
                config.backend, config.connection_string
            )
        })
}

/// Start from the built-in defaults and overlay whatever the store holds.
///
/// Without a store the built-in defaults are used unchanged.
pub async fn load_settings(repo: Option<&dyn DeductionRepository>) -> Result<DeductionSettings> {
    let mut config = DeductionConfig::default();

    if let Some(repo) = repo {
        let stored = repo
            .list_allowance_defaults()
            .await
            .context("failed to read stored deduction defaults")?;
        for (kind, amount) in stored {
            match kind {
                AdjustableDeduction::Personal => config.personal_deduction_default = amount,
                AdjustableDeduction::KReceipt => config.k_receipt_default = amount,
            }
        }
    }

    DeductionSettings::validated(config).context("stored deduction defaults are out of range")
}

/// Validate an administrative update, persist it, then apply it.
///
/// A rejected amount is never stored, and a failed store write leaves the
/// in-memory settings unchanged. Returns the value now in effect.
pub async fn update_deduction(
    settings: &DeductionSettings,
    repo: Option<&dyn DeductionRepository>,
    kind: AdjustableDeduction,
    amount: Decimal,
) -> Result<Decimal> {
    settings.check_default(kind, amount)?;

    if let Some(repo) = repo {
        repo.set_allowance_default(kind, amount)
            .await
            .with_context(|| format!("failed to store {} default", kind.as_str()))?;
    }

    settings.set_default(kind, amount)?;

    let config = settings.get_config();
    Ok(match kind {
        AdjustableDeduction::Personal => config.personal_deduction_default,
        AdjustableDeduction::KReceipt => config.k_receipt_default,
    })
}

pub fn calculate(
    settings: &DeductionSettings,
    request: &TaxComputationRequest,
) -> Result<TaxComputationResult> {
    let table = BracketTable::reference();
    let result = IncomeTaxWorksheet::new(&table).calculate(request, &settings.get_config())?;
    Ok(result)
}

pub fn calculate_batch<R: Read>(
    settings: &DeductionSettings,
    reader: R,
) -> Result<Vec<BatchTaxDetail>> {
    let table = BracketTable::reference();
    let details = BatchRecordLoader::compute(reader, &table, &settings.get_config())?;
    info!(records = details.len(), "batch computed");
    Ok(details)
}
