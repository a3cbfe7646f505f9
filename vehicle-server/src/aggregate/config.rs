//! Aggregator configuration.

use std::time::Duration;

/// Default per-feed deadline in seconds.
pub const DEFAULT_FEED_TIMEOUT_SECS: u64 = 10;

/// Configuration for an [`Aggregator`](super::Aggregator).
#[derive(Debug, Clone)]
pub struct AggregatorConfig {
    /// Deadline for a single feed fetch.
    /// A feed that misses it contributes no vehicles.
    pub feed_timeout: Duration,
}

impl AggregatorConfig {
    pub fn new(feed_timeout: Duration) -> Self {
        Self { feed_timeout }
    }

    /// Set the per-feed deadline.
    pub fn with_feed_timeout(mut self, feed_timeout: Duration) -> Self {
        self.feed_timeout = feed_timeout;
        self
    }
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            feed_timeout: Duration::from_secs(DEFAULT_FEED_TIMEOUT_SECS),
        }
    }
}
