//! JSON REST handlers, one module per entity.
//!
//! Every handler takes the shared state and the request's [`Invocation`]
//! and answers with a [`Reply`] or an [`ApiError`].
//!
//! [`Invocation`]: crate::dispatch::Invocation
//! [`Reply`]: crate::response::Reply
//! [`ApiError`]: crate::error::ApiError

pub mod comments;
pub mod incidents;
pub mod users;
pub mod views;
