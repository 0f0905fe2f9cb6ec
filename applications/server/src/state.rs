/// Shared application state
use sciplayer_storage::DeviceStore;
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DeviceStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn DeviceStore>) -> Self {
        Self { store }
    }
}
