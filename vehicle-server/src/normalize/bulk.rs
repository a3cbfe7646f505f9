//! Buses and trolleys from the bulk transit feed.

use tracing::debug;

use crate::domain::{NormalizedVehicle, RouteToken};
use crate::feeds::{BulkTransitPayload, BulkVehicleRecord};
use crate::lines::LineTable;

use super::coords::{parse_delay, parse_position};

/// Vehicles on one requested bus or trolley route.
///
/// Trolley tokens lose their prefix before the route lookup; the emitted
/// `route_label` is always the token as requested.
pub fn normalize_bulk(
    payload: &BulkTransitPayload,
    token: &RouteToken,
    lines: &LineTable,
) -> Vec<NormalizedVehicle> {
    let key = lines.bulk_route_key(token);
    payload
        .vehicles_for(key)
        .iter()
        .filter_map(|record| normalize_bulk_record(record, token))
        .collect()
}

/// Convert one bulk record, or `None` if it has no usable fix or identity.
pub fn normalize_bulk_record(
    record: &BulkVehicleRecord,
    token: &RouteToken,
) -> Option<NormalizedVehicle> {
    let Some(position) = parse_position(record.lat.as_deref(), record.lng.as_deref()) else {
        debug!(route = %token, lat = ?record.lat, lng = ?record.lng, "dropping bus without a fix");
        return None;
    };

    let Some(vehicle_id) = record.vehicle_id.as_ref().or(record.label.as_ref()) else {
        debug!(route = %token, "dropping bus without an id");
        return None;
    };

    Some(NormalizedVehicle {
        position,
        route_label: token.clone(),
        vehicle_id: vehicle_id.clone(),
        direction: record.direction.clone().unwrap_or_default(),
        destination: record.destination.clone().unwrap_or_default(),
        delay_minutes: parse_delay(record.late.as_deref()),
        service: None,
        track: None,
    })
}
