//! Application state for the web layer.

use std::sync::Arc;

use crate::planner::Planner;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Route planner, with its network and graph cache
    pub planner: Arc<Planner>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(planner: Planner) -> Self {
        Self {
            planner: Arc::new(planner),
        }
    }
}
