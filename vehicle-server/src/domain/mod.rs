//! Domain types for the vehicle aggregation server.
//!
//! Route tokens, transit modes and the canonical vehicle record. Values
//! that carry invariants (`Position`) enforce them at construction time,
//! so code that receives them can trust their validity.

mod route;
mod vehicle;

pub use route::{FeedGroup, RouteMode, RouteToken};
pub use vehicle::{InvalidPosition, NormalizedVehicle, Position};
