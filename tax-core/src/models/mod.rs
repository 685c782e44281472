mod allowance;
mod batch;
mod bracket_tier;
mod deduction_config;
mod tax_computation;

pub use allowance::{AllowanceDeclaration, AllowanceType};
pub use batch::{BatchIncomeRecord, BatchTaxDetail};
pub use bracket_tier::BracketTier;
pub use deduction_config::{DeductionConfig, MIN_PERSONAL_DEDUCTION};
pub use tax_computation::{BracketTax, TaxComputationRequest, TaxComputationResult};
