//! Application state for the web layer.

use std::sync::Arc;

use crate::board::DepartureBoard;
use crate::upstream::UpstreamClient;

/// Shared application state.
///
/// Read-only: every request runs its own upstream query.
#[derive(Clone)]
pub struct AppState {
    /// Departure board backed by the live API
    pub board: Arc<DepartureBoard<UpstreamClient>>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(board: DepartureBoard<UpstreamClient>) -> Self {
        Self {
            board: Arc::new(board),
        }
    }
}
