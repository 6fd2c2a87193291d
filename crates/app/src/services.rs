//! Application services: use-case implementations.
//!
//! Each service struct accepts a [`StatementExecutor`](crate::ports::StatementExecutor)
//! via a generic parameter (constructor injection), keeping this layer
//! decoupled from the concrete store.

pub mod comment_service;
pub mod incident_service;
pub mod user_service;
pub mod view_service;

#[cfg(test)]
pub(crate) mod testing;
