//! Service Ports
//!
//! Abstract interfaces for external services.

mod summarizer;

pub use summarizer::*;
