//! Regional rail feed: every train in one flat list.
//!
//! Records are loosely typed. Most fields are optional, several have more
//! than one spelling, and numbers may come as strings. The feed is not
//! keyed by line, so callers filter it themselves.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::domain::FeedGroup;

use super::client::{FeedPayload, HttpFeedClient};
use super::error::FeedError;
use super::lenient::{LenientVec, scalar_text};

/// Default endpoint for the rail feed.
pub const DEFAULT_RAIL_FEED_URL: &str = "https://www3.septa.org/api/TrainView/index.php";

/// Client for the rail feed.
pub type RailClient = HttpFeedClient<RailPayload>;

/// Decoded rail feed: all trains, malformed entries already dropped.
pub type RailPayload = LenientVec<RailRecord>;

impl FeedPayload for RailPayload {
    const GROUP: FeedGroup = FeedGroup::Rail;

    fn decode(body: String) -> Result<Self, FeedError> {
        serde_json::from_str(&body).map_err(|e| FeedError::decode(e, &body))
    }
}

/// One train as the rail feed reports it.
///
/// Where a field has several spellings the first one listed with a usable
/// value wins, so a record carrying both `lat` and `latitude` still reads.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(from = "Map<String, Value>")]
pub struct RailRecord {
    pub lat: Option<String>,
    pub lon: Option<String>,

    /// Upstream line name, e.g. "Manayunk/Norristown".
    pub line: Option<String>,

    pub trainno: Option<String>,

    /// Car numbers making up the train.
    pub consist: Option<String>,

    pub direction: Option<String>,

    /// Compass heading, used when no direction is given.
    pub heading: Option<String>,

    pub dest: Option<String>,
    pub nextstop: Option<String>,

    /// Minutes late.
    pub late: Option<String>,

    pub track: Option<String>,
    pub service: Option<String>,
}

impl From<Map<String, Value>> for RailRecord {
    fn from(fields: Map<String, Value>) -> Self {
        Self {
            lat: first_spelling(&fields, &["lat", "latitude"]),
            lon: first_spelling(&fields, &["lon", "lng", "longitude"]),
            line: first_spelling(&fields, &["line", "Line", "line_name"]),
            trainno: first_spelling(&fields, &["trainno", "trainNo", "train_number"]),
            consist: first_spelling(&fields, &["consist"]),
            direction: first_spelling(&fields, &["direction"]),
            heading: first_spelling(&fields, &["heading"]),
            dest: first_spelling(&fields, &["dest", "destination"]),
            nextstop: first_spelling(&fields, &["nextstop", "next_stop", "nextStop"]),
            late: first_spelling(&fields, &["late"]),
            track: first_spelling(&fields, &["track", "TRACK"]),
            service: first_spelling(&fields, &["service", "SERVICE"]),
        }
    }
}

fn first_spelling(fields: &Map<String, Value>, spellings: &[&str]) -> Option<String> {
    spellings
        .iter()
        .find_map(|name| fields.get(*name).and_then(scalar_text))
}
