//! Infrastructure Adapters
//!
//! Concrete implementations of the domain ports:
//! - `memory`: in-process realtime document store
//! - `openai`: chat-completion summarizer

pub mod memory;
pub mod openai;

pub use memory::{MemoryCallStore, MemoryMessageLog, MemoryStore, MemoryUserDirectory};
pub use openai::OpenAiSummarizer;
