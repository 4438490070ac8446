//! Shared types for the sitework API.
//!
//! These types represent the JSON shapes accepted and returned by the
//! sitework HTTP service and can be used by any client that talks to it.
//!
//! # Features
//!
//! - `sqlx`: Enables `sqlx::FromRow` derive for database integration.

pub mod import;
pub mod project;
pub mod task;
pub mod user;

pub use import::*;
pub use project::*;
pub use task::*;
pub use user::*;
