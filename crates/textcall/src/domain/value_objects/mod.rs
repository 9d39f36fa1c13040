//! Value Objects
//!
//! Immutable objects defined by their attributes rather than identity.

mod call_status;
mod session_id;
mod username;

pub use call_status::*;
pub use session_id::*;
pub use username::*;
