//! Regional rail trains.

use tracing::debug;

use crate::domain::{NormalizedVehicle, RouteToken};
use crate::feeds::RailRecord;
use crate::lines::LineTable;

use super::coords::{parse_delay, parse_position};

/// Trains running on one requested rail line.
///
/// The rail feed is not keyed by line. A train belongs to the requested
/// line when its `line` field contains the line's upstream name, ignoring
/// case.
pub fn normalize_rail(
    trains: &[RailRecord],
    token: &RouteToken,
    lines: &LineTable,
) -> Vec<NormalizedVehicle> {
    let app_name = lines.rail_line(token.as_str()).unwrap_or(token.as_str().trim());
    let upstream = lines.rail_names().to_upstream_name(app_name).to_lowercase();

    trains
        .iter()
        .filter(|train| {
            train
                .line
                .as_deref()
                .is_some_and(|line| line.to_lowercase().contains(&upstream))
        })
        .filter_map(|train| normalize_rail_record(train, token))
        .collect()
}

/// Convert one train, or `None` if it has no usable fix or identity.
///
/// Identity prefers the train number over the consist, direction prefers
/// an explicit direction over the compass heading, and destination prefers
/// the terminal over the next stop.
pub fn normalize_rail_record(train: &RailRecord, token: &RouteToken) -> Option<NormalizedVehicle> {
    let Some(position) = parse_position(train.lat.as_deref(), train.lon.as_deref()) else {
        debug!(line = %token, train = ?train.trainno, "dropping train without a fix");
        return None;
    };

    let Some(vehicle_id) = train.trainno.as_ref().or(train.consist.as_ref()) else {
        debug!(line = %token, "dropping train without a number or consist");
        return None;
    };

    Some(NormalizedVehicle {
        position,
        route_label: token.clone(),
        vehicle_id: vehicle_id.clone(),
        direction: train
            .direction
            .as_ref()
            .or(train.heading.as_ref())
            .cloned()
            .unwrap_or_default(),
        destination: train
            .dest
            .as_ref()
            .or(train.nextstop.as_ref())
            .cloned()
            .unwrap_or_default(),
        delay_minutes: parse_delay(train.late.as_deref()),
        service: train.service.clone(),
        track: train.track.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feeds::FeedPayload;
    use crate::feeds::RailPayload;

    fn trains(json: &str) -> Vec<RailRecord> {
        RailPayload::decode(json.to_string()).unwrap().into_inner()
    }

    fn lines() -> LineTable {
        LineTable::builtin().unwrap()
    }

    const FEED: &str = r#"[
        {"lat":"39.87","lon":"-75.24","line":"Airport","trainno":"476","consist":"701,702",
         "heading":"90","dest":"Airport Terminal E-F","nextstop":"Eastwick","late":"2",
         "TRACK":"3","service":"LOCAL"},
        {"lat":"40.05","lon":"-75.23","line":"Manayunk/Norristown","trainno":"2312",
         "direction":"Outbound","nextstop":"Conshohocken","late":"-1"},
        {"lat":"40.11","lon":"-75.35","line":"Paoli/Thorndale","consist":"501"},
        {"lat":"","lon":"-75.1","line":"Airport","trainno":"999"}
    ]"#;

    #[test]
    fn app_name_is_translated_to_upstream() {
        let vehicles = normalize_rail(&trains(FEED), &RouteToken::new("Airport Line"), &lines());
        assert_eq!(vehicles.len(), 1);

        let v = &vehicles[0];
        assert_eq!(v.route_label.as_str(), "Airport Line");
        assert_eq!(v.vehicle_id, "476");
        assert_eq!(v.direction, "90");
        assert_eq!(v.destination, "Airport Terminal E-F");
        assert_eq!(v.delay_minutes, 2);
        assert_eq!(v.track.as_deref(), Some("3"));
        assert_eq!(v.service.as_deref(), Some("LOCAL"));
    }

    #[test]
    fn explicit_direction_and_next_stop_fallback() {
        let vehicles = normalize_rail(&trains(FEED), &RouteToken::new("Norristown"), &lines());
        assert_eq!(vehicles.len(), 1);

        let v = &vehicles[0];
        assert_eq!(v.vehicle_id, "2312");
        assert_eq!(v.direction, "Outbound");
        assert_eq!(v.destination, "Conshohocken");
        assert_eq!(v.delay_minutes, 0);
        assert_eq!(v.track, None);
    }

    #[test]
    fn consist_stands_in_for_train_number() {
        let vehicles = normalize_rail(&trains(FEED), &RouteToken::new("Paoli/Thorndale"), &lines());
        assert_eq!(vehicles.len(), 1);
        assert_eq!(vehicles[0].vehicle_id, "501");
        assert_eq!(vehicles[0].direction, "");
    }

    #[test]
    fn line_match_ignores_case() {
        let vehicles = normalize_rail(&trains(FEED), &RouteToken::new("paoli/thorndale"), &lines());
        assert_eq!(vehicles.len(), 1);
        assert_eq!(vehicles[0].route_label.as_str(), "paoli/thorndale");
    }

    #[test]
    fn unparseable_coordinates_are_excluded() {
        let feed = trains(
            r#"[{"lat":"x","lon":"y","line":"Airport","trainno":"1"},
                {"lat":"0","lon":"0","line":"Airport","trainno":"2"}]"#,
        );
        assert!(normalize_rail(&feed, &RouteToken::new("Airport Line"), &lines()).is_empty());
    }

    #[test]
    fn train_without_identity_is_dropped() {
        let feed = trains(r#"[{"lat":"40.0","lon":"-75.0","line":"Airport"}]"#);
        assert!(normalize_rail(&feed, &RouteToken::new("Airport Line"), &lines()).is_empty());
    }

    #[test]
    fn train_without_line_matches_nothing() {
        let feed = trains(r#"[{"lat":"40.0","lon":"-75.0","trainno":"1"}]"#);
        assert!(normalize_rail(&feed, &RouteToken::new("Airport Line"), &lines()).is_empty());
    }
}
