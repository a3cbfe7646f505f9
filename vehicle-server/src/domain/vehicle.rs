//! The canonical vehicle record.

use serde::Serialize;

use super::RouteToken;

/// Error returned when a coordinate pair cannot be a vehicle fix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("invalid position: {reason}")]
pub struct InvalidPosition {
    reason: &'static str,
}

/// A latitude/longitude pair that is a usable vehicle fix.
///
/// Both values are finite and within WGS84 range, and the pair is never
/// exactly (0, 0): upstream feeds report "no fix" as null island.
///
/// # Examples
///
/// ```
/// use vehicle_server::domain::Position;
///
/// assert!(Position::new(39.95, -75.16).is_ok());
/// assert!(Position::new(0.0, 0.0).is_err());
/// assert!(Position::new(f64::NAN, -75.16).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Position {
    lat: f64,
    lng: f64,
}

impl Position {
    /// Validate a coordinate pair.
    pub fn new(lat: f64, lng: f64) -> Result<Self, InvalidPosition> {
        if !lat.is_finite() || !lng.is_finite() {
            return Err(InvalidPosition {
                reason: "coordinates must be finite",
            });
        }
        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lng) {
            return Err(InvalidPosition {
                reason: "coordinates out of range",
            });
        }
        if lat == 0.0 && lng == 0.0 {
            return Err(InvalidPosition {
                reason: "null island is not a fix",
            });
        }
        Ok(Self { lat, lng })
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn lng(&self) -> f64 {
        self.lng
    }
}

/// One vehicle in the merged output, whatever feed it came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedVehicle {
    /// Current fix.
    pub position: Position,

    /// The requested token this vehicle was matched against.
    pub route_label: RouteToken,

    /// Identifier of the physical vehicle.
    pub vehicle_id: String,

    /// Heading or direction of travel, as reported.
    pub direction: String,

    /// Next stop or terminal, as reported.
    pub destination: String,

    /// Minutes late; 0 when on time or unknown.
    pub delay_minutes: u32,

    /// Service class (e.g. "EXPRESS").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,

    /// Track identifier, rail only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub track: Option<String>,
}
