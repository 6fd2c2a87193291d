//! # incidesk-adapter-storage-sqlite-sqlx
//!
//! `SQLite` persistence adapter using [sqlx](https://docs.rs/sqlx).
//!
//! ## Responsibilities
//! - Implement the `StatementExecutor` port defined in `incidesk-app::ports`
//! - Open and release one connection per statement (no pool)
//! - Decode arbitrary result rows into domain [`Row`](incidesk_domain::value::Row)s
//! - Bootstrap the schema on startup when asked to
//!
//! ## Dependency rule
//! Depends on `incidesk-app` (for the port trait) and `incidesk-domain` (for values).
//! The `app` and `domain` crates must never reference this adapter.

pub mod config;
pub mod error;
pub mod executor;

pub use config::Config;
pub use executor::SqliteStatementExecutor;
