use std::path::Path;
use std::str::FromStr;

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::Row;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tax_core::{AdjustableDeduction, DeductionRepository, RepositoryError};
use tracing::{debug, info};

use crate::decimal::get_decimal;

pub struct SqliteRepository {
    pool: SqlitePool,
}

impl SqliteRepository {
    /// Connect to `database_url`, creating the database file when missing.
    ///
    /// Accepts sqlx URLs (`sqlite:tax.db`, `sqlite::memory:`) as well as bare
    /// paths and `:memory:`.
    pub async fn new(database_url: &str) -> Result<Self, RepositoryError> {
        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(|e| {
                RepositoryError::Configuration(format!(
                    "Invalid SQLite connection string '{}': {}",
                    database_url, e
                ))
            })?
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .connect_with(options)
            .await
            .map_err(|e| {
                RepositoryError::Connection(format!(
                    "Failed to connect to database '{}': {}",
                    database_url, e
                ))
            })?;

        debug!(database_url, "connected to sqlite");
        Ok(Self { pool })
    }

    pub async fn new_with_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn run_migrations(&self) -> Result<(), RepositoryError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| RepositoryError::Database(format!("Failed to run migrations: {}", e)))?;
        Ok(())
    }

    /// Load and execute all SQL seed files from the specified directory.
    /// Files are executed in alphabetical order by filename.
    pub async fn run_seeds(
        &self,
        seeds_dir: &Path,
    ) -> Result<(), RepositoryError> {
        let mut entries: Vec<_> = std::fs::read_dir(seeds_dir)
            .map_err(|e| {
                RepositoryError::Configuration(format!(
                    "Failed to read seeds directory '{}': {}",
                    seeds_dir.display(),
                    e
                ))
            })?
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().extension().is_some_and(|ext| ext == "sql"))
            .collect();

        entries.sort_by_key(|entry| entry.file_name());

        for entry in entries {
            let path = entry.path();
            let sql = std::fs::read_to_string(&path).map_err(|e| {
                RepositoryError::Configuration(format!(
                    "Failed to read seed file '{}': {}",
                    path.display(),
                    e
                ))
            })?;

            sqlx::raw_sql(&sql)
                .execute(&self.pool)
                .await
                .map_err(|e| {
                    RepositoryError::Database(format!(
                        "Failed to execute seed file '{}': {}",
                        path.display(),
                        e
                    ))
                })?;
            debug!(seed = %path.display(), "applied seed file");
        }

        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl DeductionRepository for SqliteRepository {
    async fn get_allowance_default(
        &self,
        kind: AdjustableDeduction,
    ) -> Result<Decimal, RepositoryError> {
        let row = sqlx::query("SELECT amount FROM allowances WHERE allowance_type = ?")
            .bind(kind.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepositoryError::Database(e.to_string()))?
            .ok_or(RepositoryError::NotFound)?;

        get_decimal(&row, "amount")
    }

    async fn set_allowance_default(
        &self,
        kind: AdjustableDeduction,
        amount: Decimal,
    ) -> Result<(), RepositoryError> {
        let updated_at = Utc::now().format("%Y-%m-%d %H:%M:%S").to_string();

        sqlx::query(
            "INSERT INTO allowances (allowance_type, amount, updated_at)
             VALUES (?, ?, ?)
             ON CONFLICT(allowance_type) DO UPDATE SET
                 amount = excluded.amount,
                 updated_at = excluded.updated_at",
        )
        .bind(kind.as_str())
        .bind(amount.to_string())
        .bind(&updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::Database(e.to_string()))?;

        info!(kind = kind.as_str(), %amount, "stored allowance default");
        Ok(())
    }

    async fn list_allowance_defaults(
        &self,
    ) -> Result<Vec<(AdjustableDeduction, Decimal)>, RepositoryError> {
        let rows = sqlx::query("SELECT allowance_type, amount FROM allowances ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepositoryError::Database(e.to_string()))?;

        rows.iter()
            .map(|row| {
                let name: String = row
                    .try_get("allowance_type")
                    .map_err(|e| RepositoryError::Database(e.to_string()))?;
                let kind = AdjustableDeduction::parse(&name).ok_or_else(|| {
                    RepositoryError::Database(format!("Unknown allowance type '{}'", name))
                })?;
                Ok((kind, get_decimal(row, "amount")?))
            })
            .collect()
    }
}
