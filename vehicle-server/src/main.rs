use std::path::Path;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing_subscriber::EnvFilter;

use vehicle_server::aggregate::{Aggregator, LiveAggregator};
use vehicle_server::config::AppConfig;
use vehicle_server::feeds::{FeedBackend, FeedPayload, FixtureFeed, HttpFeedClient};
use vehicle_server::lines::LineTable;
use vehicle_server::web::{AppState, create_router};

/// Serve a feed from the fixture directory if one is configured,
/// otherwise from upstream.
fn backend<P: FeedPayload>(config: &AppConfig, fixture_dir: Option<&Path>) -> FeedBackend<P> {
    match fixture_dir {
        Some(dir) => FeedBackend::Fixture(FixtureFeed::in_dir(dir)),
        None => FeedBackend::Http(
            HttpFeedClient::new(config.feed_config(P::GROUP))
                .expect("Failed to create feed client"),
        ),
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env().expect("Invalid configuration");

    let lines = match &config.line_table_path {
        Some(path) => LineTable::from_path(path).expect("Failed to load line table"),
        None => LineTable::builtin().expect("Built-in line table is invalid"),
    };
    info!(
        rail_lines = lines.rail_names().len(),
        subway_lines = lines.subway_lines().len(),
        "Loaded line table"
    );

    let fixture_dir = config.fixture_dir.as_deref();
    if let Some(dir) = fixture_dir {
        info!(dir = %dir.display(), "Serving feeds from fixtures");
    }

    let aggregator: LiveAggregator = Aggregator::new(
        backend(&config, fixture_dir),
        backend(&config, fixture_dir),
        backend(&config, fixture_dir),
        Arc::new(lines),
        config.aggregator_config(),
    );

    let shutdown = CancellationToken::new();
    let state = AppState::new(aggregator, config.poll_interval_secs, shutdown.clone());
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .expect("Failed to bind");
    info!(addr = %config.bind_addr, "Vehicle server listening");
    info!("  GET /health");
    info!("  GET /api/vehicles?routes=17,T10,Airport Line");
    info!("  GET /api/config");

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutting down");
            shutdown.cancel();
        })
        .await
        .expect("Server error");
}
