//! Application Services (Use Cases)
//!
//! Orchestrate domain operations over the collaborator ports. The store
//! adapters hold the truth; these services hold the rules.

mod identity;
mod relay;
mod signaling;

pub use identity::*;
pub use relay::*;
pub use signaling::*;
