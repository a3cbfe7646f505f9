//! Conversion of raw feed records into [`NormalizedVehicle`]s.
//!
//! Each feed has its own normalizer. All of them drop, rather than fail
//! on, individual records that cannot be represented: no coordinate pair,
//! coordinates that do not parse, the (0, 0) "no fix" marker, or no way to
//! identify the vehicle. Dropped records are logged at debug level.
//!
//! [`NormalizedVehicle`]: crate::domain::NormalizedVehicle

mod bulk;
mod coords;
mod rail;
mod subway;

pub use bulk::{normalize_bulk, normalize_bulk_record};
pub use coords::{parse_coordinate, parse_delay, parse_position};
pub use rail::{normalize_rail, normalize_rail_record};
pub use subway::{DIRECTION_INBOUND, DIRECTION_OUTBOUND, normalize_subway, normalize_subway_entity};
