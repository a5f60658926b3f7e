//! Application state and composition.

use std::sync::Arc;

use crate::infrastructure::ports::QueryExecutor;
use crate::persistence::EntityService;

/// Main application state.
///
/// Holds the entity service over whichever store backs the process.
/// Passed to HTTP handlers via Axum state.
pub struct App {
    pub service: EntityService,
}

impl App {
    pub fn new(store: Arc<dyn QueryExecutor>) -> Self {
        Self {
            service: EntityService::new(store),
        }
    }
}
