use tax_core::{RepositoryError, TaxSettings};

use crate::repository::SqliteConfigStore;

/// Opens `database_url`, applies migrations and writes the bootstrap
/// settings row, returning a store that is ready to serve requests.
///
/// `database_url` may be a sqlx URL (`sqlite:tax.db?mode=rwc`), a bare file
/// path (created if missing) or `:memory:`.
///
/// ```rust,no_run
/// # async fn run() -> Result<(), tax_core::RepositoryError> {
/// let _store = tax_db_sqlite::open_store("sqlite:tax.db?mode=rwc").await?;
/// # Ok(())
/// # }
/// ```
pub async fn open_store(database_url: &str) -> Result<SqliteConfigStore, RepositoryError> {
    let store = SqliteConfigStore::new(database_url)
        .await
        .map_err(|e| RepositoryError::Connection(format!("{e:#}")))?;
    store
        .run_migrations()
        .await
        .map_err(|e| RepositoryError::Database(format!("{e:#}")))?;
    store
        .seed_defaults(&TaxSettings::default())
        .await
        .map_err(|e| RepositoryError::Database(format!("{e:#}")))?;

    tracing::debug!("config store ready");
    Ok(store)
}
