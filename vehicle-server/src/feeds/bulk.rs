//! Bulk transit feed: every bus and trolley position in one response.
//!
//! The response is a JSON object whose `routes` array holds a single map
//! from route key to the vehicles currently on that route:
//!
//! ```json
//! { "routes": [ { "17": [ { "lat": "39.95", "lng": "-75.16", "VehicleID": "8501",
//!                           "Direction": "NorthBound", "destination": "Broad-Erie",
//!                           "late": "3" } ] } ] }
//! ```
//!
//! Coordinates and delay arrive as strings.

use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::domain::FeedGroup;

use super::client::{FeedPayload, HttpFeedClient};
use super::error::FeedError;
use super::lenient::{LenientVec, lenient_string};

/// Default endpoint for the bulk transit feed.
pub const DEFAULT_BULK_TRANSIT_URL: &str = "https://www3.septa.org/api/TransitViewAll/index.php";

/// Client for the bulk transit feed.
pub type BulkTransitClient = HttpFeedClient<BulkTransitPayload>;

/// Decoded bulk transit response.
///
/// Only the first element of `routes` carries vehicles; the rest are
/// ignored whatever their shape. A route whose value is not a list has no
/// vehicles.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(from = "RawBulkPayload")]
pub struct BulkTransitPayload {
    pub routes: HashMap<String, LenientVec<BulkVehicleRecord>>,
}

#[derive(Deserialize)]
struct RawBulkPayload {
    #[serde(default)]
    routes: Option<Vec<Value>>,
}

impl From<RawBulkPayload> for BulkTransitPayload {
    fn from(raw: RawBulkPayload) -> Self {
        let first = raw.routes.and_then(|routes| routes.into_iter().next());
        let routes = match first {
            Some(Value::Object(map)) => map
                .into_iter()
                .map(|(key, vehicles)| (key, LenientVec::from_any(vehicles)))
                .collect(),
            Some(other) => {
                debug!(found = %other, "route map is not an object");
                HashMap::new()
            }
            None => HashMap::new(),
        };

        Self { routes }
    }
}

impl BulkTransitPayload {
    /// Vehicles filed under a route key.
    ///
    /// An exact key match wins; otherwise keys are compared ignoring ASCII
    /// case. Unknown keys have no vehicles.
    pub fn vehicles_for(&self, route_key: &str) -> &[BulkVehicleRecord] {
        self.routes
            .get(route_key)
            .or_else(|| {
                self.routes
                    .iter()
                    .find(|(key, _)| key.eq_ignore_ascii_case(route_key))
                    .map(|(_, vehicles)| vehicles)
            })
            .map(LenientVec::as_slice)
            .unwrap_or(&[])
    }

    /// Number of route keys in the payload.
    pub fn route_count(&self) -> usize {
        self.routes.len()
    }
}

impl FeedPayload for BulkTransitPayload {
    const GROUP: FeedGroup = FeedGroup::BulkTransit;

    fn decode(body: String) -> Result<Self, FeedError> {
        serde_json::from_str(&body).map_err(|e| FeedError::decode(e, &body))
    }
}

/// One bus or trolley as the bulk feed reports it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BulkVehicleRecord {
    #[serde(default, deserialize_with = "lenient_string")]
    pub lat: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub lng: Option<String>,

    /// Fleet number painted on the vehicle.
    #[serde(default, deserialize_with = "lenient_string")]
    pub label: Option<String>,

    #[serde(default, rename = "VehicleID", deserialize_with = "lenient_string")]
    pub vehicle_id: Option<String>,

    #[serde(default, rename = "Direction", deserialize_with = "lenient_string")]
    pub direction: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub destination: Option<String>,

    /// Minutes late, as a string.
    #[serde(default, deserialize_with = "lenient_string")]
    pub late: Option<String>,
}
