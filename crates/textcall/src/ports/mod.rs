//! Ports (Interfaces)
//!
//! Abstract interfaces that define how the domain layer interacts with the
//! external collaborators (document store, summarization service).
//!
//! Implementations of these traits live in the infrastructure layer.

pub mod repositories;
pub mod services;
pub mod subscription;

// Re-exports
pub use repositories::*;
pub use services::*;
pub use subscription::*;
