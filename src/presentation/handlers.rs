// HTTP request handlers
use crate::domain::connection::ConnectionStatus;
use crate::domain::dashboard::Dashboard;
use crate::domain::error::StationError;
use crate::domain::i18n::{Language, Translations};
use crate::domain::navigation::{NavigationEntry, Panel};
use crate::domain::sensors::{SensorKind, SensorReadings};
use crate::domain::settings::Settings;
use crate::domain::telemetry::{FlightEvent, FlightState, TelemetrySample};
use crate::infrastructure::chunked_json::stream_from_receiver;
use crate::infrastructure::http_response::{accepts_brotli, json_response};
use crate::presentation::app_state::AppState;
use crate::presentation::error::ApiError;
use axum::{
    Json,
    extract::{Path, State},
    http::HeaderMap,
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Serialize)]
pub struct TelemetryView {
    pub sample: TelemetrySample,
    pub flight: FlightState,
}

#[derive(Debug, Serialize)]
pub struct CalibrationView {
    pub sensor: SensorKind,
    pub label: String,
    pub readings: SensorReadings,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LanguageBody {
    pub language: String,
}

#[derive(Debug, Serialize)]
pub struct LanguageView {
    pub language: Language,
    pub name: String,
    pub available: Vec<Language>,
}

#[derive(Debug, Serialize)]
pub struct NavigationView {
    pub panel: Panel,
    pub title: String,
}

#[derive(Debug, Serialize)]
pub struct SimulationView {
    pub running: bool,
    pub changed: bool,
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

pub async fn get_dashboard(State(state): State<Arc<AppState>>) -> Json<Dashboard> {
    Json(state.dashboard_service.get_dashboard().await)
}

pub async fn get_telemetry(State(state): State<Arc<AppState>>) -> Json<TelemetryView> {
    let station = state.station.lock().await;
    Json(TelemetryView {
        sample: station.current_sample(),
        flight: station.flight_state(),
    })
}

pub async fn get_history(
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let history = state.station.lock().await.history();
    match json_response(&history, accepts_brotli(&headers)).await {
        Ok(response) => response,
        Err(status) => status.into_response(),
    }
}

/// Live telemetry as a chunked stream
pub async fn stream_telemetry(
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    stream_from_receiver(state.telemetry.subscribe(), accepts_brotli(&headers))
}

pub async fn launch(State(state): State<Arc<AppState>>) -> Json<FlightEvent> {
    let now_ms = chrono::Utc::now().timestamp_millis();
    Json(state.station.lock().await.launch(now_ms))
}

pub async fn start_simulation(State(state): State<Arc<AppState>>) -> Json<SimulationView> {
    let changed = state.simulation.start(state.station.clone()).await;
    Json(SimulationView {
        running: state.simulation.is_running().await,
        changed,
    })
}

pub async fn stop_simulation(State(state): State<Arc<AppState>>) -> Json<SimulationView> {
    let changed = state.simulation.stop().await;
    Json(SimulationView {
        running: state.simulation.is_running().await,
        changed,
    })
}

pub async fn get_charts(
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let snapshot = state.charts.borrow().clone();
    let charts = state.dashboard_service.get_charts(&snapshot).await;
    match json_response(&charts, accepts_brotli(&headers)).await {
        Ok(response) => response,
        Err(status) => status.into_response(),
    }
}

pub async fn get_sensors(State(state): State<Arc<AppState>>) -> Json<SensorReadings> {
    Json(state.station.lock().await.sensors())
}

/// Calibrate a sensor; completes after the configured settling delay
pub async fn calibrate_sensor(
    Path(kind): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<CalibrationView>, ApiError> {
    let kind: SensorKind = kind.parse()?;
    if !kind.is_calibratable() {
        return Err(StationError::NotCalibratable(kind.id().to_string()).into());
    }

    tracing::info!(sensor = kind.id(), "Calibrating, keep the vehicle still");
    tokio::time::sleep(state.calibration_delay).await;

    let readings = state.station.lock().await.calibrate(kind)?;
    Ok(Json(CalibrationView {
        sensor: kind,
        label: state.localization_service.t(&kind.label_key()).await,
        readings,
    }))
}

pub async fn get_connection(State(state): State<Arc<AppState>>) -> Json<ConnectionStatus> {
    Json(state.dashboard_service.connection_status().await)
}

pub async fn toggle_connection(State(state): State<Arc<AppState>>) -> Json<ConnectionStatus> {
    state.connection_service.toggle().await;
    Json(state.dashboard_service.connection_status().await)
}

pub async fn get_settings(State(state): State<Arc<AppState>>) -> Json<Settings> {
    Json(state.settings_service.get().await)
}

pub async fn put_settings(
    State(state): State<Arc<AppState>>,
    Json(settings): Json<Settings>,
) -> Result<Json<Settings>, ApiError> {
    Ok(Json(state.settings_service.save(settings).await?))
}

pub async fn reset_settings(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Settings>, ApiError> {
    Ok(Json(state.settings_service.reset().await?))
}

pub async fn get_language(State(state): State<Arc<AppState>>) -> Json<LanguageView> {
    Json(language_view(&state).await)
}

pub async fn put_language(
    State(state): State<Arc<AppState>>,
    Json(body): Json<LanguageBody>,
) -> Result<Json<LanguageView>, ApiError> {
    let language: Language = body.language.parse()?;
    state.localization_service.set_language(language).await?;
    Ok(Json(language_view(&state).await))
}

pub async fn get_catalog(
    Path(code): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Translations>, ApiError> {
    let language: Language = code.parse()?;
    Ok(Json(state.localization_service.table(language)))
}

pub async fn get_navigation(State(state): State<Arc<AppState>>) -> Json<Vec<NavigationEntry>> {
    Json(state.dashboard_service.navigation().await)
}

pub async fn navigate(
    Path(panel): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<NavigationView>, ApiError> {
    let panel: Panel = panel.parse()?;
    let title = state.dashboard_service.navigate(panel).await;
    Ok(Json(NavigationView { panel, title }))
}

async fn language_view(state: &AppState) -> LanguageView {
    let language = state.localization_service.language().await;
    LanguageView {
        language,
        name: state
            .localization_service
            .t(&format!("language.{}", language.code()))
            .await,
        available: Language::ALL.to_vec(),
    }
}
