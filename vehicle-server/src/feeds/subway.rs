//! Subway feed: a human-readable dump of the realtime vehicle protocol.
//!
//! The body is a text or HTML page; parsing it is the job of
//! [`textfeed`](crate::textfeed). Upstream does not yet publish subway
//! vehicles in this dump, so in practice it parses to no entities.

use crate::domain::FeedGroup;

use super::client::{FeedPayload, HttpFeedClient};
use super::error::FeedError;

/// Default endpoint for the subway dump.
pub const DEFAULT_SUBWAY_FEED_URL: &str =
    "https://www3.septa.org/gtfsrt/septa-pa-us/Vehicle/print.php";

/// Client for the subway text feed.
pub type SubwayTextClient = HttpFeedClient<SubwayDump>;

/// Raw subway dump, undecoded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubwayDump(pub String);

impl SubwayDump {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FeedPayload for SubwayDump {
    const GROUP: FeedGroup = FeedGroup::Subway;

    fn decode(body: String) -> Result<Self, FeedError> {
        Ok(Self(body))
    }
}
