pub mod factory;
pub mod repository;

pub use factory::{DbConfig, RepositoryFactory, RepositoryRegistry};
pub use repository::{AdjustableDeduction, DeductionRepository, RepositoryError};
