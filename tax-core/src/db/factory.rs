//! Selecting and opening the store that keeps the adjustable deduction
//! defaults between runs.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tracing::debug;

use super::repository::{DeductionRepository, RepositoryError};

/// Where the deduction defaults live.
///
/// `connection_string` is handed to the backend named by `backend` as is.
/// For `sqlite` it is a file path or `:memory:`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbConfig {
    pub backend: String,
    pub connection_string: String,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            backend: "sqlite".to_string(),
            connection_string: ":memory:".to_string(),
        }
    }
}

/// Opens a deduction store for one backend.
///
/// A store returned from `create` must already hold a row for every
/// [`AdjustableDeduction`](super::AdjustableDeduction).
#[async_trait]
pub trait RepositoryFactory: Send + Sync {
    fn backend_name(&self) -> &'static str;

    async fn create(
        &self,
        config: &DbConfig,
    ) -> Result<Box<dyn DeductionRepository>, RepositoryError>;
}

/// Deduction store backends known to the binary, by name.
#[derive(Default)]
pub struct RepositoryRegistry {
    factories: BTreeMap<&'static str, Box<dyn RepositoryFactory>>,
}

impl RepositoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a backend. A later registration under the same name wins.
    pub fn register(&mut self, factory: Box<dyn RepositoryFactory>) {
        debug!(backend = factory.backend_name(), "registering deduction store");
        self.factories.insert(factory.backend_name(), factory);
    }

    pub fn available_backends(&self) -> Vec<&'static str> {
        self.factories.keys().copied().collect()
    }

    /// Opens the deduction store named by `config.backend`.
    ///
    /// An unregistered name is a [`RepositoryError::Configuration`] listing
    /// the backends that are registered.
    pub async fn create(
        &self,
        config: &DbConfig,
    ) -> Result<Box<dyn DeductionRepository>, RepositoryError> {
        let Some(factory) = self.factories.get(config.backend.as_str()) else {
            return Err(RepositoryError::Configuration(format!(
                "unknown backend '{}'; available: {}",
                config.backend,
                self.available_backends().join(", ")
            )));
        };

        factory.create(config).await
    }
}
