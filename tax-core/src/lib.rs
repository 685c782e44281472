pub mod calculations;
pub mod db;
mod error;
pub mod models;
pub mod settings;

pub use db::repository::{AdjustableDeduction, DeductionRepository, RepositoryError};
pub use error::ValidationError;
pub use models::*;
pub use settings::{ConfigurationError, DeductionSettings};
