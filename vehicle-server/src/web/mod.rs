//! Web layer for the vehicle server.
//!
//! Serves the merged vehicle list and the settings a polling client needs.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
