//! Application state shared across handlers.

use std::sync::Arc;

use orchestrator::{ConversationState, MappingProvider, Orchestrator};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Turn orchestrator driving every chat connection.
    pub orchestrator: Arc<Orchestrator>,
}

impl AppState {
    /// Create new application state.
    pub fn new(orchestrator: Orchestrator) -> Self {
        Self {
            orchestrator: Arc::new(orchestrator),
        }
    }

    /// Process-wide conversation state.
    pub fn conversation(&self) -> &Arc<ConversationState> {
        self.orchestrator.state()
    }

    /// Mapping provider, for pass-through endpoints.
    pub fn mapping(&self) -> &Arc<dyn MappingProvider> {
        self.orchestrator.mapping()
    }
}
