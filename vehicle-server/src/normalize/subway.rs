//! Subway vehicles from parsed dump entities.

use tracing::debug;

use crate::domain::{NormalizedVehicle, Position, RouteToken};
use crate::textfeed::Entity;

/// Direction reported for `direction_id: 0`.
pub const DIRECTION_OUTBOUND: &str = "Outbound";

/// Direction reported for `direction_id: 1`.
pub const DIRECTION_INBOUND: &str = "Inbound";

/// Vehicles serving one requested subway line.
pub fn normalize_subway(entities: &[Entity], token: &RouteToken) -> Vec<NormalizedVehicle> {
    let line = token.as_str().trim();
    entities
        .iter()
        .filter(|entity| {
            entity
                .trip
                .as_ref()
                .and_then(|trip| trip.route_id.as_deref())
                .is_some_and(|route| route.trim().eq_ignore_ascii_case(line))
        })
        .filter_map(|entity| normalize_subway_entity(entity, token))
        .collect()
}

/// Convert one entity, or `None` if it carries no usable position.
///
/// Identity falls back from the vehicle id to its label to the entity id,
/// so any entity that got this far has one.
pub fn normalize_subway_entity(entity: &Entity, token: &RouteToken) -> Option<NormalizedVehicle> {
    let Some(position) = entity
        .position
        .and_then(|p| Position::new(p.latitude, p.longitude).ok())
    else {
        debug!(line = %token, entity = %entity.id, "dropping subway entity without a fix");
        return None;
    };

    let vehicle = entity.vehicle.as_ref();
    let vehicle_id = vehicle
        .and_then(|v| v.id.clone())
        .or_else(|| vehicle.and_then(|v| v.label.clone()))
        .unwrap_or_else(|| entity.id.clone());

    let direction = match entity.trip.as_ref().and_then(|t| t.direction_id) {
        Some(0) => DIRECTION_OUTBOUND,
        Some(1) => DIRECTION_INBOUND,
        _ => "",
    };

    Some(NormalizedVehicle {
        position,
        route_label: token.clone(),
        vehicle_id,
        direction: direction.to_string(),
        destination: entity.stop_id.clone().unwrap_or_default(),
        delay_minutes: 0,
        service: None,
        track: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::textfeed::{EntityPosition, TripInfo, VehicleInfo};

    fn entity(id: &str, route: &str) -> Entity {
        Entity {
            id: id.to_string(),
            trip: Some(TripInfo {
                trip_id: None,
                route_id: Some(route.to_string()),
                direction_id: Some(0),
            }),
            vehicle: Some(VehicleInfo {
                id: Some(format!("car-{id}")),
                label: Some(format!("label-{id}")),
            }),
            position: Some(EntityPosition {
                latitude: 39.95,
                longitude: -75.16,
                bearing: None,
            }),
            stop_id: Some("20845".to_string()),
            timestamp: None,
        }
    }

    #[test]
    fn matching_line_only() {
        let entities = vec![entity("1", "MFL"), entity("2", "BSL"), entity("3", "mfl")];
        let vehicles = normalize_subway(&entities, &RouteToken::new("MFL"));

        let ids: Vec<_> = vehicles.iter().map(|v| v.vehicle_id.as_str()).collect();
        assert_eq!(ids, vec!["car-1", "car-3"]);
        assert!(vehicles.iter().all(|v| v.route_label.as_str() == "MFL"));
        assert_eq!(vehicles[0].direction, DIRECTION_OUTBOUND);
        assert_eq!(vehicles[0].destination, "20845");
    }

    #[test]
    fn identity_fallbacks() {
        let mut by_label = entity("1", "MFL");
        by_label.vehicle.as_mut().unwrap().id = None;
        let mut by_entity = entity("2", "MFL");
        by_entity.vehicle = None;

        let vehicles = normalize_subway(&[by_label, by_entity], &RouteToken::new("MFL"));
        assert_eq!(vehicles[0].vehicle_id, "label-1");
        assert_eq!(vehicles[1].vehicle_id, "2");
    }

    #[test]
    fn direction_mapping() {
        let mut inbound = entity("1", "BSL");
        inbound.trip.as_mut().unwrap().direction_id = Some(1);
        let mut unknown = entity("2", "BSL");
        unknown.trip.as_mut().unwrap().direction_id = None;

        let vehicles = normalize_subway(&[inbound, unknown], &RouteToken::new("BSL"));
        assert_eq!(vehicles[0].direction, DIRECTION_INBOUND);
        assert_eq!(vehicles[1].direction, "");
    }

    #[test]
    fn position_is_required() {
        let mut no_fix = entity("1", "MFL");
        no_fix.position = None;
        let mut null_island = entity("2", "MFL");
        null_island.position = Some(EntityPosition {
            latitude: 0.0,
            longitude: 0.0,
            bearing: None,
        });

        assert!(normalize_subway(&[no_fix, null_island], &RouteToken::new("MFL")).is_empty());
    }

    #[test]
    fn entity_without_trip_matches_nothing() {
        let mut e = entity("1", "MFL");
        e.trip = None;
        assert!(normalize_subway(&[e], &RouteToken::new("MFL")).is_empty());
    }

    #[test]
    fn parsed_dump_end_to_end() {
        let dump = r#"<pre>
entity {
  id: "9"
  vehicle {
    trip { route_id: "BSL" direction_id: 1 }
    position { latitude: 39.98 longitude: -75.155 }
    stop_id: "Erie"
  }
}
</pre>"#;
        let entities = crate::textfeed::parse(dump);
        let vehicles = normalize_subway(&entities, &RouteToken::new("BSL"));
        assert_eq!(vehicles.len(), 1);
        assert_eq!(vehicles[0].vehicle_id, "9");
        assert_eq!(vehicles[0].direction, DIRECTION_INBOUND);
        assert_eq!(vehicles[0].destination, "Erie");
    }
}
