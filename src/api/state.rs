//! Application state for the Timesheet Engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use mockable::Clock;

use crate::config::ConfigLoader;
use crate::store::MemoryStore;
use crate::tracking::TimeTracker;

/// Shared application state.
///
/// Holds the loaded configuration, the store every handler reads from, and
/// the tracker that mutates it.
#[derive(Clone)]
pub struct AppState {
    config: Arc<ConfigLoader>,
    store: Arc<MemoryStore>,
    tracker: TimeTracker<MemoryStore>,
}

impl AppState {
    /// Creates the state, configuring the tracker from `config`.
    pub fn new(config: ConfigLoader, store: Arc<MemoryStore>, clock: Arc<dyn Clock>) -> Self {
        let tracker = TimeTracker::from_config(Arc::clone(&store), clock, &config);
        Self {
            config: Arc::new(config),
            store,
            tracker,
        }
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Returns the shared store.
    pub fn store(&self) -> &MemoryStore {
        &self.store
    }

    /// Returns the time tracker.
    pub fn tracker(&self) -> &TimeTracker<MemoryStore> {
        &self.tracker
    }
}
