//! Typed entities extracted from a parsed dump.

use chrono::{DateTime, Utc};

use super::parser::Block;

/// One top-level `entity` record.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    pub id: String,
    pub trip: Option<TripInfo>,
    pub vehicle: Option<VehicleInfo>,
    pub position: Option<EntityPosition>,
    /// Stop the vehicle is at or heading to.
    pub stop_id: Option<String>,
    pub timestamp: Option<DateTime<Utc>>,
}

/// The trip a vehicle is serving.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TripInfo {
    pub trip_id: Option<String>,
    pub route_id: Option<String>,
    /// 0 or 1; other values are discarded.
    pub direction_id: Option<u8>,
}

/// The physical vehicle.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VehicleInfo {
    pub id: Option<String>,
    pub label: Option<String>,
}

/// Reported position; only built when both coordinates parse.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntityPosition {
    pub latitude: f64,
    pub longitude: f64,
    pub bearing: Option<f64>,
}

impl Entity {
    /// Extract an entity from an `entity { ... }` block.
    ///
    /// Returns `None` when the block has no id. Vehicle data is read from
    /// the `vehicle` block (a vehicle position); trip and vehicle identity
    /// fall back to a `trip_update` block when the position block lacks
    /// them.
    pub fn from_block(block: &Block) -> Option<Self> {
        let id = non_empty(block.scalar("id"))?;

        let position_report = block.block("vehicle");
        let trip_update = block.block("trip_update");

        // Nested blocks first: `vehicle` names both the position report and,
        // one level down, the vehicle descriptor inside it.
        let trip = position_report
            .and_then(|v| v.block("trip"))
            .or_else(|| trip_update.and_then(|t| t.block("trip")))
            .map(TripInfo::from_block);
        let vehicle = position_report
            .and_then(|v| v.block("vehicle"))
            .or_else(|| trip_update.and_then(|t| t.block("vehicle")))
            .map(VehicleInfo::from_block);
        let position = position_report
            .and_then(|v| v.block("position"))
            .and_then(EntityPosition::from_block);

        let stop_id = position_report.and_then(|v| non_empty(v.scalar("stop_id")));
        let timestamp = position_report
            .and_then(|v| v.scalar("timestamp"))
            .and_then(|s| s.trim().parse::<i64>().ok())
            .and_then(|secs| DateTime::from_timestamp(secs, 0));

        Some(Self {
            id,
            trip,
            vehicle,
            position,
            stop_id,
            timestamp,
        })
    }
}

impl TripInfo {
    fn from_block(block: &Block) -> Self {
        Self {
            trip_id: non_empty(block.scalar("trip_id")),
            route_id: non_empty(block.scalar("route_id")),
            direction_id: block
                .scalar("direction_id")
                .and_then(|s| s.trim().parse::<u8>().ok())
                .filter(|d| *d <= 1),
        }
    }
}

impl VehicleInfo {
    fn from_block(block: &Block) -> Self {
        Self {
            id: non_empty(block.scalar("id")),
            label: non_empty(block.scalar("label")),
        }
    }
}

impl EntityPosition {
    fn from_block(block: &Block) -> Option<Self> {
        Some(Self {
            latitude: parse_float(block.scalar("latitude"))?,
            longitude: parse_float(block.scalar("longitude"))?,
            bearing: parse_float(block.scalar("bearing")),
        })
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn parse_float(value: Option<&str>) -> Option<f64> {
    value?.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}
