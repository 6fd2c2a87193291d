//! `SQLite` connection settings and startup.

use std::str::FromStr;

use sqlx::sqlite::SqliteConnectOptions;

use crate::error::StorageError;
use crate::executor::SqliteStatementExecutor;

/// Configuration for the `SQLite` storage adapter.
pub struct Config {
    /// `SQLite` connection URL (e.g. `sqlite:incidesk.db`).
    pub database_url: String,
    /// Create missing tables and views before serving.
    pub bootstrap_schema: bool,
}

impl Config {
    /// Build a [`SqliteStatementExecutor`] from this configuration.
    ///
    /// Creates the database file if missing and, when enabled, bootstraps
    /// the schema through one short-lived connection.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the URL is invalid or the bootstrap fails.
    pub async fn build(self) -> Result<SqliteStatementExecutor, StorageError> {
        let options = SqliteConnectOptions::from_str(&self.database_url)?.create_if_missing(true);
        let executor = SqliteStatementExecutor::new(options);

        if self.bootstrap_schema {
            executor.bootstrap_schema().await?;
        }

        Ok(executor)
    }
}
