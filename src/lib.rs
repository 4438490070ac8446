//! sitework - task and dependency tracking for construction projects.
//!
//! A SQLite-backed HTTP service covering per-project task CRUD, directed
//! dependency edges between tasks, a derived project progress percentage,
//! an all-or-nothing publication gate, and bulk import of external plan
//! items.

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod services;

pub use error::{Result, SiteworkError};
