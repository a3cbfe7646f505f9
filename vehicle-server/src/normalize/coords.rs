//! Parsing of the stringly-typed numbers upstream feeds send.

use crate::domain::Position;

/// Parse one coordinate. Blank, non-numeric and non-finite values are `None`.
pub fn parse_coordinate(raw: Option<&str>) -> Option<f64> {
    raw?.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Build a position from a pair of coordinate strings.
///
/// Both halves must parse, and the pair must be a valid fix.
pub fn parse_position(lat: Option<&str>, lng: Option<&str>) -> Option<Position> {
    let lat = parse_coordinate(lat)?;
    let lng = parse_coordinate(lng)?;
    Position::new(lat, lng).ok()
}

/// Parse a delay in minutes.
///
/// Unknown or unparseable delays are 0; early running (negative) is 0.
/// Fractional minutes are truncated.
pub fn parse_delay(raw: Option<&str>) -> u32 {
    let Some(raw) = raw.map(str::trim) else {
        return 0;
    };

    if let Ok(minutes) = raw.parse::<i64>() {
        return u32::try_from(minutes.max(0)).unwrap_or(u32::MAX);
    }

    match raw.parse::<f64>() {
        Ok(minutes) if minutes.is_finite() && minutes > 0.0 => minutes.min(u32::MAX as f64) as u32,
        _ => 0,
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// A position exists only when both coordinates parse
        #[test]
        fn no_position_without_both_coordinates(
            lat in proptest::option::of(".{0,12}"),
            lng in proptest::option::of(".{0,12}"),
        ) {
            let position = parse_position(lat.as_deref(), lng.as_deref());
            if position.is_some() {
                prop_assert!(parse_coordinate(lat.as_deref()).is_some());
                prop_assert!(parse_coordinate(lng.as_deref()).is_some());
            }
        }

        /// Parsed positions are never null island
        #[test]
        fn no_null_island(lat in -90.0f64..=90.0, lng in -180.0f64..=180.0) {
            let pair = (lat.to_string(), lng.to_string());
            if let Some(p) = parse_position(Some(&pair.0), Some(&pair.1)) {
                prop_assert!(!(p.lat() == 0.0 && p.lng() == 0.0));
            }
            let zero = parse_position(Some("0"), Some("0"));
            prop_assert!(zero.is_none());
        }

        /// Any input yields some delay
        #[test]
        fn delay_is_total(s in ".*") {
            let _ = parse_delay(Some(&s));
        }
    }
}
