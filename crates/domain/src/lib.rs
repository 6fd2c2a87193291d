//! # incidesk-domain
//!
//! Pure domain model for the incidesk incident tracker.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps
//! - Define the **wire values** (`Value`, `Row`) that flow from the store to
//!   HTTP clients, including the fixed timestamp encoding
//! - Define the **request types** for users, incidents and comments, with the
//!   required/optional split declared in the type
//! - Define the **column allow-lists** that updates are built from
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod request;
pub mod time;
pub mod value;

pub mod comment;
pub mod incident;
pub mod user;
