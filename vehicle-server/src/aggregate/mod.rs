//! Vehicle aggregation across feeds.
//!
//! Given a list of route tokens, the aggregator works out which feeds are
//! needed, fetches each of them once and concurrently, and normalizes the
//! results into one list. Partial upstream failure is the normal case and
//! never fails the request.

mod aggregator;
mod config;


pub use aggregator::{AggregateError, Aggregator, LiveAggregator};
pub use config::{AggregatorConfig, DEFAULT_FEED_TIMEOUT_SECS};
