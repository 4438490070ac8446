pub mod billing;
pub mod dependency_service;
pub mod import_service;
pub mod progress;
pub mod project_service;
pub mod publication;
pub mod task_service;

pub use billing::*;
pub use dependency_service::*;
pub use import_service::*;
pub use project_service::*;
pub use publication::*;
pub use task_service::*;
