//! JSON shapes printed by `tax-calc`.
//!
//! Every amount is rounded half away from zero to one decimal place and
//! written as a JSON number.

use std::io::Read;

use rust_decimal::Decimal;
use serde::Serialize;
use tax_core::calculations::common::round_to_display;
use tax_core::{BatchTaxDetail, DeductionConfig, TaxComputationRequest, TaxComputationResult};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxResponse {
    #[serde(with = "rust_decimal::serde::float")]
    pub tax: Decimal,
    pub tax_level: Vec<TaxLevel>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaxLevel {
    pub level: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub tax: Decimal,
}

impl From<&TaxComputationResult> for TaxResponse {
    fn from(result: &TaxComputationResult) -> Self {
        Self {
            tax: round_to_display(result.total_tax),
            tax_level: result
                .brackets
                .iter()
                .map(|bracket| TaxLevel {
                    level: bracket.label.clone(),
                    tax: round_to_display(bracket.tax),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchResponse {
    pub taxes: Vec<TaxDetail>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxDetail {
    #[serde(with = "rust_decimal::serde::float")]
    pub total_income: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub tax: Decimal,
    #[serde(
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub tax_refund: Option<Decimal>,
}

impl From<&[BatchTaxDetail]> for BatchResponse {
    fn from(details: &[BatchTaxDetail]) -> Self {
        Self {
            taxes: details
                .iter()
                .map(|detail| TaxDetail {
                    total_income: round_to_display(detail.total_income),
                    tax: round_to_display(detail.tax),
                    tax_refund: detail.tax_refund.map(round_to_display),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalDeductionResponse {
    #[serde(with = "rust_decimal::serde::float")]
    pub personal_deduction: Decimal,
}

impl PersonalDeductionResponse {
    pub fn new(amount: Decimal) -> Self {
        Self {
            personal_deduction: round_to_display(amount),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KReceiptResponse {
    #[serde(with = "rust_decimal::serde::float")]
    pub k_receipt: Decimal,
}

impl KReceiptResponse {
    pub fn new(amount: Decimal) -> Self {
        Self {
            k_receipt: round_to_display(amount),
        }
    }
}

/// Current deduction configuration as shown by `deductions show`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeductionsResponse {
    #[serde(with = "rust_decimal::serde::float")]
    pub personal_deduction: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub personal_deduction_max: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub donation_max: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub k_receipt: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub k_receipt_max: Decimal,
}

impl From<&DeductionConfig> for DeductionsResponse {
    fn from(config: &DeductionConfig) -> Self {
        Self {
            personal_deduction: round_to_display(config.personal_deduction_default),
            personal_deduction_max: round_to_display(config.personal_deduction_max),
            donation_max: round_to_display(config.donation_max),
            k_receipt: round_to_display(config.k_receipt_default),
            k_receipt_max: round_to_display(config.k_receipt_max),
        }
    }
}

/// Decode a `{"totalIncome", "wht", "allowances"}` request body.
pub fn read_request<R: Read>(reader: R) -> Result<TaxComputationRequest, serde_json::Error> {
    serde_json::from_reader(reader)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;
    use serde_json::json;
    use tax_core::{AllowanceDeclaration, AllowanceType, BracketTax};

    use super::*;

    #[test]
    fn tax_response_rounds_and_renames() {
        let result = TaxComputationResult {
            total_tax: dec!(1234.55),
            brackets: vec![
                BracketTax {
                    label: "0-150,000".to_string(),
                    tax: dec!(0),
                },
                BracketTax {
                    label: "150,001-500,000".to_string(),
                    tax: dec!(1234.55),
                },
            ],
        };

        let value = serde_json::to_value(TaxResponse::from(&result)).unwrap();

        assert_eq!(
            value,
            json!({
                "tax": 1234.6,
                "taxLevel": [
                    {"level": "0-150,000", "tax": 0.0},
                    {"level": "150,001-500,000", "tax": 1234.6},
                ]
            })
        );
    }

    #[test]
    fn batch_response_omits_absent_refund() {
        let details = vec![
            BatchTaxDetail {
                total_income: dec!(500000),
                tax: dec!(29000),
                tax_refund: None,
            },
            BatchTaxDetail {
                total_income: dec!(100000),
                tax: dec!(0),
                tax_refund: Some(dec!(10000)),
            },
        ];

        let value = serde_json::to_value(BatchResponse::from(details.as_slice())).unwrap();

        assert_eq!(
            value,
            json!({
                "taxes": [
                    {"totalIncome": 500000.0, "tax": 29000.0},
                    {"totalIncome": 100000.0, "tax": 0.0, "taxRefund": 10000.0},
                ]
            })
        );
    }

    #[test]
    fn admin_responses_use_their_own_keys() {
        assert_eq!(
            serde_json::to_value(PersonalDeductionResponse::new(dec!(70000))).unwrap(),
            json!({"personalDeduction": 70000.0})
        );
        assert_eq!(
            serde_json::to_value(KReceiptResponse::new(dec!(12345.67))).unwrap(),
            json!({"kReceipt": 12345.7})
        );
    }

    #[test]
    fn deductions_response_lists_defaults_and_limits() {
        let value =
            serde_json::to_value(DeductionsResponse::from(&DeductionConfig::default())).unwrap();

        assert_eq!(
            value,
            json!({
                "personalDeduction": 60000.0,
                "personalDeductionMax": 100000.0,
                "donationMax": 100000.0,
                "kReceipt": 50000.0,
                "kReceiptMax": 100000.0,
            })
        );
    }

    #[test]
    fn read_request_accepts_numbers_and_allowance_types() {
        let body = r#"{
            "totalIncome": 500000.0,
            "wht": 0.0,
            "allowances": [
                {"allowanceType": "donation", "amount": 200000.0},
                {"allowanceType": "k-receipt", "amount": 30000}
            ]
        }"#;

        let request = read_request(body.as_bytes()).expect("valid body");

        assert_eq!(
            request,
            TaxComputationRequest {
                total_income: dec!(500000),
                withholding_tax: dec!(0),
                allowances: vec![
                    AllowanceDeclaration::new(AllowanceType::Donation, dec!(200000)),
                    AllowanceDeclaration::new(AllowanceType::KReceipt, dec!(30000)),
                ],
            }
        );
    }

    #[test]
    fn read_request_without_allowances_defaults_to_empty() {
        let request = read_request(r#"{"totalIncome": 1000, "wht": 10}"#.as_bytes())
            .expect("allowances are optional");

        assert!(request.allowances.is_empty());
    }

    #[test]
    fn read_request_rejects_missing_income() {
        assert!(read_request(r#"{"wht": 0}"#.as_bytes()).is_err());
    }
}
