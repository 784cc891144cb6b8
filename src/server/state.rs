//! Application state shared across all request handlers.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::guide::engine::context::AssistantContext;
use crate::guide::session::machine::SessionMachine;
use crate::guide::session::state::SessionState;

/// Shared application state.
pub struct AppState {
    /// Configuration, providers and corpus index.
    pub context: AssistantContext,
    /// Session machine over the context services.
    pub machine: SessionMachine,
    /// The single interactive session served by this process.
    pub session: Mutex<SessionState>,
}

impl AppState {
    /// Create the application state around a ready context.
    #[must_use]
    pub fn new(context: AssistantContext) -> Arc<Self> {
        let machine = context.machine();
        let session = Mutex::new(context.new_session());
        Arc::new(Self {
            context,
            machine,
            session,
        })
    }
}
