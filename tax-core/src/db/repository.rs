use async_trait::async_trait;
use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("Record not found")]
    NotFound,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Connection error: {0}")]
    Connection(String),
}

/// Persistent home of the admin-tunable allowance settings.
///
/// Implementations return values exactly as stored. Clamping is the
/// caller's job and happens on every read.
#[async_trait]
pub trait ConfigStore: Send + Sync {
    async fn get_personal_allowance(&self) -> Result<Decimal, RepositoryError>;
    async fn get_k_receipt_cap(&self) -> Result<Decimal, RepositoryError>;

    async fn set_personal_allowance(
        &self,
        amount: Decimal,
    ) -> Result<(), RepositoryError>;
    async fn set_k_receipt_cap(
        &self,
        amount: Decimal,
    ) -> Result<(), RepositoryError>;
}
