//! Common utility functions for tax calculations.
//!
//! Calculations work on unrounded values. [`round_to_display`] exists for
//! the presentation layer and is never applied inside the engine.

use rust_decimal::Decimal;

/// Rounds a decimal value to one decimal place using half-up rounding.
///
/// Values at exactly 0.05 are rounded away from zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::common::round_to_display;
///
/// assert_eq!(round_to_display(dec!(29000)), dec!(29000.0));
/// assert_eq!(round_to_display(dec!(123.44)), dec!(123.4));
/// assert_eq!(round_to_display(dec!(123.45)), dec!(123.5));
/// assert_eq!(round_to_display(dec!(-123.45)), dec!(-123.5)); // Away from zero
/// ```
pub fn round_to_display(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(1, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}

/// Returns the maximum of two decimal values.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::common::max;
///
/// assert_eq!(max(dec!(100.00), dec!(200.00)), dec!(200.00));
/// assert_eq!(max(dec!(-100.00), dec!(0)), dec!(0));
/// ```
pub fn max(
    a: Decimal,
    b: Decimal,
) -> Decimal {
    if a > b { a } else { b }
}

/// Returns the minimum of two decimal values.
pub fn min(
    a: Decimal,
    b: Decimal,
) -> Decimal {
    if a < b { a } else { b }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    // =========================================================================
    // round_to_display tests
    // =========================================================================

    #[test]
    fn round_to_display_rounds_down_below_midpoint() {
        assert_eq!(round_to_display(dec!(123.44)), dec!(123.4));
    }

    #[test]
    fn round_to_display_rounds_up_at_midpoint() {
        assert_eq!(round_to_display(dec!(123.45)), dec!(123.5));
    }

    #[test]
    fn round_to_display_handles_negative_values() {
        assert_eq!(round_to_display(dec!(-123.45)), dec!(-123.5));
    }

    #[test]
    fn round_to_display_preserves_whole_values() {
        assert_eq!(round_to_display(dec!(35000)), dec!(35000.0));
    }

    #[test]
    fn round_to_display_handles_zero() {
        assert_eq!(round_to_display(dec!(0.04)), dec!(0.0));
    }

    // =========================================================================
    // max / min tests
    // =========================================================================

    #[test]
    fn max_returns_larger_value() {
        assert_eq!(max(dec!(100.00), dec!(200.00)), dec!(200.00));
        assert_eq!(max(dec!(200.00), dec!(100.00)), dec!(200.00));
    }

    #[test]
    fn max_handles_negative_and_zero() {
        assert_eq!(max(dec!(-50.00), Decimal::ZERO), Decimal::ZERO);
    }

    #[test]
    fn min_returns_smaller_value() {
        assert_eq!(min(dec!(150000), dec!(100000)), dec!(100000));
        assert_eq!(min(dec!(100), dec!(100000)), dec!(100));
    }
}
