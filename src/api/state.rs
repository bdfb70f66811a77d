//! State shared by the API handlers.

use std::sync::Arc;

use crate::storage::JsonStore;

/// Shared application state.
///
/// Holds the data store. The store only keeps paths, so handlers can use
/// it concurrently; the statistics themselves are recomputed per request.
#[derive(Clone)]
pub struct AppState {
    store: Arc<JsonStore>,
}

impl AppState {
    /// Creates a new application state over the given store.
    pub fn new(store: JsonStore) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    /// Returns a reference to the data store.
    pub fn store(&self) -> &JsonStore {
        &self.store
    }
}
