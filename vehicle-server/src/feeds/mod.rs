//! Upstream feed clients.
//!
//! Three independent upstreams, each with its own contract:
//!
//! - the bulk transit feed (buses and trolleys, grouped by route key)
//! - the rail feed (all regional rail trains, one flat list)
//! - the subway text dump (pretty-printed realtime protocol)
//!
//! Every fetch is a single request for the whole feed, so the number of
//! upstream calls per request is bounded by the number of feeds, not by the
//! number of routes asked for. Clients never retry.

mod bulk;
mod client;
mod error;
mod fixture;
mod lenient;
mod rail;
mod subway;

pub use bulk::{BulkTransitClient, BulkTransitPayload, BulkVehicleRecord, DEFAULT_BULK_TRANSIT_URL};
pub use client::{FeedClient, FeedConfig, FeedPayload, HttpFeedClient};
pub use error::FeedError;
pub use fixture::{FeedBackend, FixtureFeed, fixture_file_name};
pub use lenient::LenientVec;
pub use rail::{DEFAULT_RAIL_FEED_URL, RailClient, RailPayload, RailRecord};
pub use subway::{DEFAULT_SUBWAY_FEED_URL, SubwayDump, SubwayTextClient};
