//! Runtime-adjustable deduction defaults.
//!
//! [`DeductionSettings`] is created once at startup, shared (typically in an
//! `Arc`) with everything that computes tax, and updated by administrative
//! operations. Readers take a [`DeductionConfig`] snapshot; each setter
//! replaces a single field, last writer wins.

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::info;

use crate::db::AdjustableDeduction;
use crate::{DeductionConfig, MIN_PERSONAL_DEDUCTION};

/// An administrative update fell outside the allowed range.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("personal deduction must be between {min} and {max}, got {amount}")]
    PersonalDeductionOutOfRange {
        min: Decimal,
        max: Decimal,
        amount: Decimal,
    },

    #[error("k-receipt deduction must be between 0 and {max}, got {amount}")]
    KReceiptOutOfRange { max: Decimal, amount: Decimal },
}

#[derive(Debug, Default)]
pub struct DeductionSettings {
    config: RwLock<DeductionConfig>,
}

impl DeductionSettings {
    /// Wraps `config` without validating it; use [`Self::validated`] for
    /// values loaded from outside the process.
    pub fn new(config: DeductionConfig) -> Self {
        Self {
            config: RwLock::new(config),
        }
    }

    /// Builds settings from `config` after checking both adjustable
    /// defaults against their limits.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError`] if either default is out of range.
    pub fn validated(config: DeductionConfig) -> Result<Self, ConfigurationError> {
        check_personal_default(&config, config.personal_deduction_default)?;
        check_k_receipt_default(&config, config.k_receipt_default)?;
        Ok(Self::new(config))
    }

    /// Returns a copy of the current configuration.
    pub fn get_config(&self) -> DeductionConfig {
        *self.read()
    }

    /// Replaces the personal deduction default.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::PersonalDeductionOutOfRange`] unless
    /// `10000 <= amount <= personal_deduction_max`. The stored value is
    /// left unchanged on error.
    pub fn set_personal_deduction_default(
        &self,
        amount: Decimal,
    ) -> Result<(), ConfigurationError> {
        let mut config = self.write();
        check_personal_default(&config, amount)?;
        config.personal_deduction_default = amount;
        info!(%amount, "personal deduction default updated");
        Ok(())
    }

    /// Replaces the k-receipt default.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::KReceiptOutOfRange`] unless
    /// `0 <= amount <= k_receipt_max`.
    pub fn set_k_receipt_default(
        &self,
        amount: Decimal,
    ) -> Result<(), ConfigurationError> {
        let mut config = self.write();
        check_k_receipt_default(&config, amount)?;
        config.k_receipt_default = amount;
        info!(%amount, "k-receipt default updated");
        Ok(())
    }

    /// Checks `amount` against the current limits for `kind` without
    /// changing anything.
    pub fn check_default(
        &self,
        kind: AdjustableDeduction,
        amount: Decimal,
    ) -> Result<(), ConfigurationError> {
        let config = self.read();
        match kind {
            AdjustableDeduction::Personal => check_personal_default(&config, amount),
            AdjustableDeduction::KReceipt => check_k_receipt_default(&config, amount),
        }
    }

    /// Dispatches to the setter for `kind`.
    pub fn set_default(
        &self,
        kind: AdjustableDeduction,
        amount: Decimal,
    ) -> Result<(), ConfigurationError> {
        match kind {
            AdjustableDeduction::Personal => self.set_personal_deduction_default(amount),
            AdjustableDeduction::KReceipt => self.set_k_receipt_default(amount),
        }
    }

    // The guarded value is plain Copy data, so a poisoned lock still holds a
    // consistent config.
    fn read(&self) -> RwLockReadGuard<'_, DeductionConfig> {
        self.config.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, DeductionConfig> {
        self.config.write().unwrap_or_else(PoisonError::into_inner)
    }
}

fn check_personal_default(
    config: &DeductionConfig,
    amount: Decimal,
) -> Result<(), ConfigurationError> {
    if amount < MIN_PERSONAL_DEDUCTION || amount > config.personal_deduction_max {
        return Err(ConfigurationError::PersonalDeductionOutOfRange {
            min: MIN_PERSONAL_DEDUCTION,
            max: config.personal_deduction_max,
            amount,
        });
    }
    Ok(())
}

fn check_k_receipt_default(
    config: &DeductionConfig,
    amount: Decimal,
) -> Result<(), ConfigurationError> {
    if amount < Decimal::ZERO || amount > config.k_receipt_max {
        return Err(ConfigurationError::KReceiptOutOfRange {
            max: config.k_receipt_max,
            amount,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;

    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn default_settings_use_reference_config() {
        let settings = DeductionSettings::default();

        assert_eq!(settings.get_config(), DeductionConfig::default());
    }

    #[test]
    fn get_config_is_idempotent() {
        let settings = DeductionSettings::default();

        assert_eq!(settings.get_config(), settings.get_config());
    }

    // =========================================================================
    // personal default
    // =========================================================================

    #[test]
    fn set_personal_default_updates_only_that_field() {
        let settings = DeductionSettings::default();

        settings
            .set_personal_deduction_default(dec!(70000))
            .expect("70000 is within range");

        let expected = DeductionConfig {
            personal_deduction_default: dec!(70000),
            ..DeductionConfig::default()
        };
        assert_eq!(settings.get_config(), expected);
    }

    #[test]
    fn set_personal_default_accepts_range_bounds() {
        let settings = DeductionSettings::default();

        assert_eq!(settings.set_personal_deduction_default(dec!(10000)), Ok(()));
        assert_eq!(settings.set_personal_deduction_default(dec!(100000)), Ok(()));
        assert_eq!(settings.get_config().personal_deduction_default, dec!(100000));
    }

    #[test]
    fn set_personal_default_out_of_range_leaves_value_unchanged() {
        let settings = DeductionSettings::default();

        let below = settings.set_personal_deduction_default(dec!(9999));
        let above = settings.set_personal_deduction_default(dec!(100001));

        assert_eq!(
            below,
            Err(ConfigurationError::PersonalDeductionOutOfRange {
                min: dec!(10000),
                max: dec!(100000),
                amount: dec!(9999),
            })
        );
        assert!(above.is_err());
        assert_eq!(settings.get_config().personal_deduction_default, dec!(60000));
    }

    // =========================================================================
    // k-receipt default
    // =========================================================================

    #[test]
    fn set_k_receipt_default_updates_value() {
        let settings = DeductionSettings::default();

        settings.set_k_receipt_default(dec!(0)).expect("0 is within range");

        assert_eq!(settings.get_config().k_receipt_default, dec!(0));
    }

    #[test]
    fn set_k_receipt_default_out_of_range_is_rejected() {
        let settings = DeductionSettings::default();

        assert_eq!(
            settings.set_k_receipt_default(dec!(100000.5)),
            Err(ConfigurationError::KReceiptOutOfRange {
                max: dec!(100000),
                amount: dec!(100000.5),
            })
        );
        assert!(settings.set_k_receipt_default(dec!(-1)).is_err());
        assert_eq!(settings.get_config().k_receipt_default, dec!(50000));
    }

    #[test]
    fn k_receipt_error_message_names_range() {
        let err = DeductionSettings::default()
            .set_k_receipt_default(dec!(200000))
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "k-receipt deduction must be between 0 and 100000, got 200000"
        );
    }

    // =========================================================================
    // validated construction
    // =========================================================================

    #[test]
    fn validated_rejects_out_of_range_defaults() {
        let config = DeductionConfig {
            personal_deduction_default: dec!(5000),
            ..DeductionConfig::default()
        };

        assert!(matches!(
            DeductionSettings::validated(config),
            Err(ConfigurationError::PersonalDeductionOutOfRange { .. })
        ));
    }

    #[test]
    fn validated_accepts_reference_defaults() {
        let settings =
            DeductionSettings::validated(DeductionConfig::default()).expect("defaults are valid");

        assert_eq!(settings.get_config(), DeductionConfig::default());
    }

    // =========================================================================
    // sharing
    // =========================================================================

    #[test]
    fn updates_are_visible_across_threads() {
        let settings = Arc::new(DeductionSettings::default());

        let writer = {
            let settings = Arc::clone(&settings);
            thread::spawn(move || settings.set_k_receipt_default(dec!(25000)))
        };
        writer
            .join()
            .expect("writer thread panicked")
            .expect("25000 is within range");

        assert_eq!(settings.get_config().k_receipt_default, dec!(25000));
    }

    #[test]
    fn check_default_validates_without_mutating() {
        let settings = DeductionSettings::default();

        assert_eq!(
            settings.check_default(AdjustableDeduction::KReceipt, dec!(100001)),
            Err(ConfigurationError::KReceiptOutOfRange {
                max: dec!(100000),
                amount: dec!(100001),
            })
        );
        assert_eq!(
            settings.check_default(AdjustableDeduction::Personal, dec!(90000)),
            Ok(())
        );
        assert_eq!(settings.get_config(), DeductionConfig::default());
    }

    #[test]
    fn set_default_routes_by_kind() {
        let settings = DeductionSettings::default();

        settings
            .set_default(AdjustableDeduction::KReceipt, dec!(20000))
            .expect("in range");
        settings
            .set_default(AdjustableDeduction::Personal, dec!(30000))
            .expect("in range");

        let config = settings.get_config();
        assert_eq!(config.k_receipt_default, dec!(20000));
        assert_eq!(config.personal_deduction_default, dec!(30000));
    }
}
