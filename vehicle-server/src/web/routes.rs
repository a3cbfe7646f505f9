//! HTTP route handlers.

use std::any::Any;

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

use crate::aggregate::AggregateError;

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/vehicles", get(vehicles))
        .route("/api/config", get(client_config))
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Current vehicles on the requested routes.
///
/// Upstream failures never fail the request; they show up as missing
/// vehicles.
async fn vehicles(
    State(state): State<AppState>,
    Query(req): Query<VehiclesRequest>,
) -> Result<Json<VehiclesResponse>, AppError> {
    let tokens = req.tokens();
    let cancel = state.shutdown.child_token();

    let vehicles = state.aggregator.aggregate(&tokens, &cancel).await?;

    Ok(Json(VehiclesResponse { vehicles }))
}

/// Settings the client needs before it starts polling.
async fn client_config(State(state): State<AppState>) -> Json<ConfigResponse> {
    Json(ConfigResponse {
        poll_interval_secs: state.poll_interval_secs,
    })
}

fn panic_response(_panic: Box<dyn Any + Send + 'static>) -> Response {
    error!("request handler panicked");
    AppError::Internal {
        message: "internal error".to_string(),
    }
    .into_response()
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    Internal { message: String },
}

impl From<AggregateError> for AppError {
    fn from(e: AggregateError) -> Self {
        match e {
            AggregateError::Validation(message) => AppError::BadRequest { message },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        warn!(%status, %message, "request failed");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
