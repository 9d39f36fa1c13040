//! Domain Entities
//!
//! Pure domain models without infrastructure dependencies.
//! - Call: session lifecycle record and its state machine
//! - Message: one line of a session's chat log
//! - User: account identity with its claimed username

mod call;
mod message;
mod user;

pub use call::*;
pub use message::*;
pub use user::*;
