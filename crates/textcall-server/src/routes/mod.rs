//! TextCall API Routes
//!
//! - /summary - transcript summarization facade
//! - /health - liveness (wired in main)

pub mod summary;
pub mod swagger;
