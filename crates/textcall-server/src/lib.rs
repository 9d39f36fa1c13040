//! TextCall Server
//!
//! Infrastructure for the TextCall signaling core: the in-process realtime
//! store, the OpenAI summarizer, the application services driving the call
//! state machine, the edge-triggered summary pipeline, and the HTTP
//! facade.

pub mod adapters;
pub mod application;
pub mod models;
pub mod routes;
pub mod services;

use std::sync::Arc;

use textcall::Summarizer;

use adapters::memory::{MemoryCallStore, MemoryMessageLog, MemoryUserDirectory};
use application::{IdentityService, RelayService, SignalingService};

/// Type aliases for application services bound to the in-process store
pub type AppIdentityService = IdentityService<MemoryUserDirectory>;
pub type AppSignalingService = SignalingService<MemoryCallStore, MemoryUserDirectory>;
pub type AppRelayService = RelayService<MemoryMessageLog>;

/// Shared application state passed to all API handlers.
#[derive(Clone)]
pub struct AppState {
    pub identity: Arc<AppIdentityService>,
    pub signaling: Arc<AppSignalingService>,
    pub relay: Arc<AppRelayService>,
    pub summarizer: Option<Arc<dyn Summarizer>>,
}
