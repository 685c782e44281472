use async_trait::async_trait;
use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("Record not found")]
    NotFound,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// The deduction defaults that administrators may change and that
/// therefore outlive the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AdjustableDeduction {
    Personal,
    KReceipt,
}

impl AdjustableDeduction {
    pub const ALL: [AdjustableDeduction; 2] = [Self::Personal, Self::KReceipt];

    /// Stored name of the deduction.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Personal => "Personal",
            Self::KReceipt => "Kreceipt",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Personal" => Some(Self::Personal),
            "Kreceipt" => Some(Self::KReceipt),
            _ => None,
        }
    }
}

#[async_trait]
pub trait DeductionRepository: Send + Sync {
    async fn get_allowance_default(
        &self,
        kind: AdjustableDeduction,
    ) -> Result<Decimal, RepositoryError>;

    async fn set_allowance_default(
        &self,
        kind: AdjustableDeduction,
        amount: Decimal,
    ) -> Result<(), RepositoryError>;

    async fn list_allowance_defaults(
        &self,
    ) -> Result<Vec<(AdjustableDeduction, Decimal)>, RepositoryError>;
}
