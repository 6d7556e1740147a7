//! Application state for the web layer.

use std::sync::Arc;

use crate::upstream::UpstreamClient;

/// Shared application state.
///
/// Read-only after startup; handlers never mutate it.
#[derive(Clone)]
pub struct AppState {
    /// Departures API client
    pub upstream: Arc<UpstreamClient>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(upstream: UpstreamClient) -> Self {
        Self {
            upstream: Arc::new(upstream),
        }
    }
}
