//! Application state management
//!
//! Contains shared state accessible across all handlers.

use std::sync::Arc;

use crate::db::DogStore;

/// Application state shared across all handlers
pub struct AppState<S> {
    /// Persistence client for dog records
    pub dogs: S,
}

impl<S: DogStore> AppState<S> {
    pub fn new(dogs: S) -> Self {
        Self { dogs }
    }
}

/// Type alias for shared state
pub type SharedState<S> = Arc<AppState<S>>;
