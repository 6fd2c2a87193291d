//! # incidesk-app
//!
//! Application layer: use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define the **driven port** adapters must implement:
//!   - `StatementExecutor`: run one parameterized statement, return its rows
//! - Define the **use-cases** as service structs, one per entity:
//!   - `UserService`: list, get, idempotent create, update, delete
//!   - `IncidentService`: list (optionally by reporter), get, create with
//!     initial comment, update
//!   - `CommentService`: list (optionally by incident), by creator, create,
//!     update by creator
//!   - `ViewService`: incident-with-latest-status listing and detail
//! - Build every statement from allow-listed column names only
//!
//! ## Dependency rule
//! Depends on `incidesk-domain` only.
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod ports;
pub mod services;
pub mod statement;
