//! Personal income tax calculations.
//!
//! The bracket table and liability calculator are shared by the
//! single-request worksheet and the batch calculator. Only the worksheet
//! resolves declared allowances.

pub mod allowances;
pub mod batch;
pub mod brackets;
pub mod common;
pub mod income_tax;
pub mod liability;
pub mod withholding;

pub use allowances::AllowanceResolver;
pub use batch::BatchCalculator;
pub use brackets::{BracketTable, BracketTableError};
pub use income_tax::IncomeTaxWorksheet;
pub use liability::{Liability, LiabilityCalculator};
pub use withholding::{NetLiability, net_withholding};
