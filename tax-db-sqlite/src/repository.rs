use std::str::FromStr;

use anyhow::{Context, Result};
use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tax_core::{ConfigStore, RepositoryError, TaxSettings};

use crate::decimal::{decimal_to_f64, get_optional_decimal};

/// Primary key of the single settings row.
const SETTINGS_ROW_ID: i64 = 1;

/// One column of the `allowance` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Setting {
    PersonalAllowance,
    KReceiptCap,
}

impl Setting {
    fn column(self) -> &'static str {
        match self {
            Self::PersonalAllowance => "personal",
            Self::KReceiptCap => "k_receipt",
        }
    }

    fn select_sql(self) -> &'static str {
        match self {
            Self::PersonalAllowance => "SELECT personal FROM allowance WHERE id = ?",
            Self::KReceiptCap => "SELECT k_receipt FROM allowance WHERE id = ?",
        }
    }

    fn update_sql(self) -> &'static str {
        match self {
            Self::PersonalAllowance => "UPDATE allowance SET personal = ? WHERE id = ?",
            Self::KReceiptCap => "UPDATE allowance SET k_receipt = ? WHERE id = ?",
        }
    }

    /// Value reported when the column is NULL.
    fn default_value(self) -> Decimal {
        match self {
            Self::PersonalAllowance => TaxSettings::DEFAULT_PERSONAL_ALLOWANCE,
            Self::KReceiptCap => TaxSettings::DEFAULT_K_RECEIPT_CAP,
        }
    }
}

fn is_in_memory(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}

pub struct SqliteConfigStore {
    pool: SqlitePool,
}

impl SqliteConfigStore {
    /// Open `database_url`, creating the file if it does not exist.
    ///
    /// In-memory databases are pinned to a single long-lived connection so
    /// the schema survives between queries.
    pub async fn new(database_url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(database_url)
            .with_context(|| format!("Invalid database url: {}", database_url))?
            .create_if_missing(true);

        let pool_options = if is_in_memory(database_url) {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new()
        };

        let pool = pool_options
            .connect_with(options)
            .await
            .with_context(|| format!("Failed to connect to database: {}", database_url))?;
        Ok(Self { pool })
    }

    pub async fn new_with_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .context("Failed to run database migrations")?;
        Ok(())
    }

    /// Write the bootstrap settings row unless it already exists.
    pub async fn seed_defaults(
        &self,
        defaults: &TaxSettings,
    ) -> Result<()> {
        let result = sqlx::query(
            "INSERT OR IGNORE INTO allowance (id, personal, k_receipt) VALUES (?, ?, ?)",
        )
        .bind(SETTINGS_ROW_ID)
        .bind(decimal_to_f64(defaults.personal_allowance))
        .bind(decimal_to_f64(defaults.k_receipt_cap))
        .execute(&self.pool)
        .await
        .context("Failed to seed default allowance settings")?;

        if result.rows_affected() > 0 {
            tracing::info!(
                personal_allowance = %defaults.personal_allowance,
                k_receipt_cap = %defaults.k_receipt_cap,
                "seeded default allowance settings"
            );
        }
        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    async fn read_setting(
        &self,
        setting: Setting,
    ) -> Result<Decimal, RepositoryError> {
        let row = sqlx::query(setting.select_sql())
            .bind(SETTINGS_ROW_ID)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepositoryError::Database(e.to_string()))?
            .ok_or(RepositoryError::NotFound)?;

        let value = get_optional_decimal(&row, setting.column())?
            .unwrap_or_else(|| setting.default_value());
        tracing::debug!(column = setting.column(), %value, "read setting");
        Ok(value)
    }

    async fn write_setting(
        &self,
        setting: Setting,
        amount: Decimal,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(setting.update_sql())
            .bind(decimal_to_f64(amount))
            .bind(SETTINGS_ROW_ID)
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::Database(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        tracing::debug!(column = setting.column(), %amount, "updated setting");
        Ok(())
    }
}

#[async_trait]
impl ConfigStore for SqliteConfigStore {
    async fn get_personal_allowance(&self) -> Result<Decimal, RepositoryError> {
        self.read_setting(Setting::PersonalAllowance).await
    }

    async fn get_k_receipt_cap(&self) -> Result<Decimal, RepositoryError> {
        self.read_setting(Setting::KReceiptCap).await
    }

    async fn set_personal_allowance(
        &self,
        amount: Decimal,
    ) -> Result<(), RepositoryError> {
        self.write_setting(Setting::PersonalAllowance, amount).await
    }

    async fn set_k_receipt_cap(
        &self,
        amount: Decimal,
    ) -> Result<(), RepositoryError> {
        self.write_setting(Setting::KReceiptCap, amount).await
    }
}
