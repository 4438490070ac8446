pub mod event;

// Re-export the shared domain types
pub use sitework_types::*;
