// Dashboard domain model
use super::connection::ConnectionStatus;
use super::navigation::Panel;
use super::telemetry::FlightState;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct TileData {
    pub id: String,
    pub title: String,
    pub unit: String,
    pub value: f64,
    pub precision: i32,
}

impl TileData {
    pub fn new(id: String, title: String, unit: String, value: f64, precision: i32) -> Self {
        Self {
            id,
            title,
            unit,
            value,
            precision,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub title: String,
    pub tiles: Vec<TileData>,
    pub flight: FlightState,
    pub connection: ConnectionStatus,
    pub active_panel: Panel,
}

#[derive(Debug, Clone, Serialize)]
pub struct SeriesView {
    pub channel: String,
    pub name: String,
    pub color: Option<String>,
    pub y_axis: u8,
    pub values: Vec<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChartView {
    pub id: String,
    pub title: String,
    pub unit: Option<String>,
    pub y_min: Option<f64>,
    pub y_max: Option<f64>,
    pub labels: Vec<String>,
    pub series: Vec<SeriesView>,
}
