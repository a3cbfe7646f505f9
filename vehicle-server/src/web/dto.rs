//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{NormalizedVehicle, RouteToken};

/// Query for the vehicles endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct VehiclesRequest {
    /// Comma-separated route tokens, e.g. `17,T10,Airport Line`
    pub routes: Option<String>,
}

impl VehiclesRequest {
    /// The requested tokens, trimmed, with blanks removed.
    pub fn tokens(&self) -> Vec<RouteToken> {
        self.routes
            .as_deref()
            .map(RouteToken::parse_list)
            .unwrap_or_default()
    }
}

/// Merged vehicles for the requested routes.
#[derive(Debug, Serialize)]
pub struct VehiclesResponse {
    pub vehicles: Vec<NormalizedVehicle>,
}

/// Client settings.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigResponse {
    /// How often a client should poll for vehicles
    pub poll_interval_secs: u64,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
