//! # incidesk-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Own the **route table**: per-method, ordered, anchored path patterns
//!   mapped to a [`Handler`](route::Handler) tag
//! - Resolve each request to exactly one handler (first match wins), extract
//!   positional path captures and query parameters, read the body for
//!   `POST`/`PUT`
//! - Map application results into HTTP responses: JSON payloads with
//!   `Content-Type: Application/JSON`, bodyless errors
//!
//! axum is used for the connection handling only. It registers no paths of
//! its own; a single fallback runs the table dispatch for every request.
//!
//! ## Dependency rule
//! Depends on `incidesk-app` (for port traits and services) and
//! `incidesk-domain` (for values and request types). Never leaks axum types
//! into the domain.

pub mod api;
pub mod body;
pub mod dispatch;
pub mod error;
pub mod query;
pub mod response;
pub mod route;
pub mod router;
pub mod state;

#[cfg(test)]
pub(crate) mod testing;
