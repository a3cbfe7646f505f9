//! Application state for the web layer.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::aggregate::LiveAggregator;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Feed aggregator
    pub aggregator: Arc<LiveAggregator>,

    /// Poll interval advertised to clients
    pub poll_interval_secs: u64,

    /// Cancelled on shutdown; each request works under a child token.
    pub shutdown: CancellationToken,
}

impl AppState {
    /// Create a new app state.
    pub fn new(
        aggregator: LiveAggregator,
        poll_interval_secs: u64,
        shutdown: CancellationToken,
    ) -> Self {
        Self {
            aggregator: Arc::new(aggregator),
            poll_interval_secs,
            shutdown,
        }
    }
}
