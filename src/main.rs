// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use anyhow::Context;
use axum::{
    Router,
    routing::{get, post},
};
use std::{net::SocketAddr, sync::Arc};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use crate::infrastructure::config::{load_station_config, load_widgets_config};
use crate::infrastructure::file_preference_store::FilePreferenceStore;
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    calibrate_sensor, get_catalog, get_charts, get_connection, get_dashboard, get_history,
    get_language, get_navigation, get_sensors, get_settings, get_telemetry, health_check, launch,
    navigate, put_language, put_settings, reset_settings, start_simulation, stop_simulation,
    stream_telemetry, toggle_connection,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing, RUST_LOG overrides the default level
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    // Load configuration
    let station_config = load_station_config()?;
    let widgets_config = load_widgets_config()?;

    // Persisted preferences (settings blob, language)
    let store = Arc::new(FilePreferenceStore::new(
        station_config.storage.preferences_path.clone(),
    ));
    tracing::info!("Using preference file {}", store.path().display());

    let state = Arc::new(AppState::new(&station_config, widgets_config, store).await?);

    // Start the telemetry simulation
    state.simulation.start(state.station.clone()).await;
    let simulation = state.simulation.clone();

    let router = Router::new()
        .route("/healthz", get(health_check))
        .route("/dashboard", get(get_dashboard))
        .route("/telemetry", get(get_telemetry))
        .route("/telemetry/history", get(get_history))
        .route("/telemetry/stream", get(stream_telemetry))
        .route("/launch", post(launch))
        .route("/simulation/start", post(start_simulation))
        .route("/simulation/stop", post(stop_simulation))
        .route("/charts", get(get_charts))
        .route("/sensors", get(get_sensors))
        .route("/sensors/:kind/calibrate", post(calibrate_sensor))
        .route("/connection", get(get_connection))
        .route("/connection/toggle", post(toggle_connection))
        .route("/settings", get(get_settings).put(put_settings))
        .route("/settings/reset", post(reset_settings))
        .route("/language", get(get_language).put(put_language))
        .route("/i18n/:lang", get(get_catalog))
        .route("/navigation", get(get_navigation))
        .route("/navigation/:panel", post(navigate))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr: SocketAddr = station_config
        .server
        .addr
        .parse()
        .with_context(|| format!("Invalid server address {}", station_config.server.addr))?;
    tracing::info!("Starting rocket-ground-station on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    simulation.stop().await;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    tracing::info!("Shutting down");
}
