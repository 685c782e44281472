//! Withholding tax netting.

use rust_decimal::Decimal;

use crate::BracketTax;
use crate::calculations::common::max;

/// Liability after withholding has been netted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetLiability {
    /// Total tax minus withholding. Negative means an overall refund.
    pub net_total: Decimal,
    pub brackets: Vec<BracketTax>,
}

/// Nets `withholding_tax` against the total and against every bracket.
///
/// The full withholding amount is subtracted from each bracket on its own
/// and each result is floored at zero, so the bracket rows do not generally
/// add up to `net_total` once more than one bracket is taxed.
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::BracketTax;
/// use tax_core::calculations::net_withholding;
///
/// let brackets = vec![
///     BracketTax { label: "A".into(), tax: dec!(20000) },
///     BracketTax { label: "B".into(), tax: dec!(30000) },
/// ];
/// let net = net_withholding(dec!(50000), &brackets, dec!(25000));
///
/// assert_eq!(net.net_total, dec!(25000));
/// assert_eq!(net.brackets[0].tax, dec!(0));
/// assert_eq!(net.brackets[1].tax, dec!(5000));
/// ```
pub fn net_withholding(
    total_tax: Decimal,
    brackets: &[BracketTax],
    withholding_tax: Decimal,
) -> NetLiability {
    NetLiability {
        net_total: total_tax - withholding_tax,
        brackets: brackets
            .iter()
            .map(|bracket| BracketTax {
                label: bracket.label.clone(),
                tax: max(bracket.tax - withholding_tax, Decimal::ZERO),
            })
            .collect(),
    }
}
