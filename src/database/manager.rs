use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use thiserror::Error;
use tokio::sync::OnceCell;
use tracing::info;

use crate::config;

/// Errors from DatabaseManager and the query layer
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Invalid database URL: {0}")]
    InvalidDatabaseUrl(String),

    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Query error: {0}")]
    QueryError(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Process-wide connection pool for the league database
pub struct DatabaseManager;

impl DatabaseManager {
    fn cell() -> &'static OnceCell<SqlitePool> {
        static POOL: OnceCell<SqlitePool> = OnceCell::const_new();
        &POOL
    }

    /// Get the main pool, connecting on first use
    pub async fn main_pool() -> Result<SqlitePool, DatabaseError> {
        let pool = Self::cell()
            .get_or_try_init(|| async {
                let settings = &config::config().database;
                let pool = Self::connect(&settings.url, settings.max_connections, settings.connection_timeout).await?;
                info!("Created database pool for: {}", settings.url);
                Ok::<_, DatabaseError>(pool)
            })
            .await?;
        Ok(pool.clone())
    }

    /// Open a pool against an explicit URL
    pub async fn connect(url: &str, max_connections: u32, timeout_secs: u64) -> Result<SqlitePool, DatabaseError> {
        let options = SqliteConnectOptions::from_str(url)
            .map_err(|_| DatabaseError::InvalidDatabaseUrl(url.to_string()))?
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_secs(timeout_secs))
            .connect_with(options)
            .await?;
        Ok(pool)
    }

    /// Single-connection in-memory pool. The connection is never recycled
    /// so the database lives as long as the pool.
    pub async fn memory_pool() -> Result<SqlitePool, DatabaseError> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .map_err(|_| DatabaseError::InvalidDatabaseUrl("sqlite::memory:".to_string()))?;

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;
        Ok(pool)
    }

    /// Pings the pool to ensure connectivity
    pub async fn health_check(pool: &SqlitePool) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(pool).await?;
        Ok(())
    }

    /// Whether a table with this exact name exists
    pub async fn table_exists(pool: &SqlitePool, table: &str) -> Result<bool, DatabaseError> {
        let row: Option<(String,)> =
            sqlx::query_as("SELECT name FROM sqlite_master WHERE type = 'table' AND name = ?")
                .bind(table)
                .fetch_optional(pool)
                .await?;
        Ok(row.is_some())
    }

    /// Whether `table` has a column named `column`
    pub async fn column_exists(pool: &SqlitePool, table: &str, column: &str) -> Result<bool, DatabaseError> {
        if !Self::is_valid_identifier(table) {
            return Err(DatabaseError::InvalidIdentifier(table.to_string()));
        }
        let query = format!("SELECT name FROM pragma_table_info({})", Self::quote_literal(table));
        let names: Vec<(String,)> = sqlx::query_as(&query).fetch_all(pool).await?;
        Ok(names.iter().any(|(name,)| name.eq_ignore_ascii_case(column)))
    }

    /// Quote SQL identifier to prevent injection
    pub fn quote_identifier(name: &str) -> String {
        format!("\"{}\"", name.replace('"', "\"\""))
    }

    fn quote_literal(value: &str) -> String {
        format!("'{}'", value.replace('\'', "''"))
    }

    /// Table and column names must be plain `[A-Za-z_][A-Za-z0-9_]*`
    pub fn is_valid_identifier(name: &str) -> bool {
        let mut chars = name.chars();
        match chars.next() {
            Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
            _ => return false,
        }
        chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
    }
}
