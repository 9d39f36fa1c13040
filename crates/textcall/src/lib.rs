//! TextCall Domain Library
//!
//! Core domain types and interfaces for the TextCall signaling system:
//! two users exchange text messages in a lightweight "call" session, and
//! the finished transcript is summarized automatically.
//!
//! # Architecture
//!
//! This crate follows Clean Architecture / Hexagonal Architecture
//! principles:
//!
//! - **Domain Layer** (`domain/`): Pure business entities and logic
//!   - `entities/`: Core domain models (Call, Message, User)
//!   - `value_objects/`: Immutable value types (Username, SessionId,
//!     CallStatus)
//!   - `errors`: Domain-specific error types
//!
//! - **Ports** (`ports/`): Abstract interfaces (traits)
//!   - `repositories/`: Document-store collaborator interfaces
//!   - `services/`: Summarization collaborator interface
//!   - `subscription`: The realtime change-notification handle

pub mod domain;
pub mod ports;

// Re-export commonly used types
pub use domain::{
    render_transcript, Call, CallStatus, DomainError, Message, SessionId, SessionSummary, User,
    Username,
};
pub use ports::{
    CallStore, CallTransition, Disposer, MessageLog, Subscription, Summarizer, SummaryError,
    UserDirectory,
};
