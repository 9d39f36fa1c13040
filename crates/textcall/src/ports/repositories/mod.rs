//! Repository Ports
//!
//! Abstract interfaces over the document-store collaborator's collections.

mod call_store;
mod message_log;
mod user_directory;

pub use call_store::*;
pub use message_log::*;
pub use user_directory::*;
