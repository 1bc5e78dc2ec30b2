use crate::application::chart_buffer::DEFAULT_CHART_WINDOW;
use crate::application::flight_simulator::DEFAULT_HISTORY_CAPACITY;
use crate::domain::chart::Channel;
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Deserialize, Clone)]
pub struct StationConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub simulation: SimulationSettings,
    #[serde(default)]
    pub storage: StorageSettings,
    #[serde(default)]
    pub connection: ConnectionTiming,
    #[serde(default)]
    pub sensors: SensorSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    #[serde(default = "default_addr")]
    pub addr: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            addr: default_addr(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct SimulationSettings {
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
    #[serde(default = "default_history_capacity")]
    pub history_capacity: usize,
    #[serde(default = "default_chart_window")]
    pub chart_window: usize,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            tick_interval_ms: default_tick_interval_ms(),
            history_capacity: default_history_capacity(),
            chart_window: default_chart_window(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageSettings {
    #[serde(default = "default_preferences_path")]
    pub preferences_path: PathBuf,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            preferences_path: default_preferences_path(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ConnectionTiming {
    #[serde(default = "default_connect_delay_ms")]
    pub connect_delay_ms: u64,
    #[serde(default = "default_disconnect_delay_ms")]
    pub disconnect_delay_ms: u64,
    #[serde(default = "default_error_reset_ms")]
    pub error_reset_ms: u64,
    #[serde(default = "default_success_rate")]
    pub success_rate: f64,
}

impl Default for ConnectionTiming {
    fn default() -> Self {
        Self {
            connect_delay_ms: default_connect_delay_ms(),
            disconnect_delay_ms: default_disconnect_delay_ms(),
            error_reset_ms: default_error_reset_ms(),
            success_rate: default_success_rate(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct SensorSettings {
    #[serde(default = "default_calibration_delay_ms")]
    pub calibration_delay_ms: u64,
}

impl Default for SensorSettings {
    fn default() -> Self {
        Self {
            calibration_delay_ms: default_calibration_delay_ms(),
        }
    }
}

fn default_addr() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_tick_interval_ms() -> u64 {
    1000
}

fn default_history_capacity() -> usize {
    DEFAULT_HISTORY_CAPACITY
}

fn default_chart_window() -> usize {
    DEFAULT_CHART_WINDOW
}

fn default_preferences_path() -> PathBuf {
    PathBuf::from("data/preferences.json")
}

fn default_connect_delay_ms() -> u64 {
    2000
}

fn default_disconnect_delay_ms() -> u64 {
    1000
}

fn default_error_reset_ms() -> u64 {
    3000
}

fn default_success_rate() -> f64 {
    0.8
}

fn default_calibration_delay_ms() -> u64 {
    2000
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct WidgetsConfig {
    #[serde(default)]
    pub charts: Vec<ChartConfig>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ChartConfig {
    pub id: String,
    /// Catalog key of the chart title
    pub title: String,
    pub unit: Option<String>,
    pub y_min: Option<f64>,
    pub y_max: Option<f64>,
    #[serde(default)]
    pub series: Vec<SeriesConfig>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SeriesConfig {
    pub channel: Channel,
    /// Catalog key of the legend entry
    pub name: String,
    pub unit: Option<String>,
    pub color: Option<String>,
    #[serde(default)]
    pub y_axis: u8,
}

pub fn load_station_config() -> anyhow::Result<StationConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/station"))
        .add_source(config::Environment::with_prefix("STATION").separator("__"))
        .build()?;

    validate_station_config(settings.try_deserialize()?)
}

/// Reject values the simulation cannot run with; clamp the connection success rate.
fn validate_station_config(mut station: StationConfig) -> anyhow::Result<StationConfig> {
    if station.simulation.tick_interval_ms == 0 {
        anyhow::bail!("simulation.tick_interval_ms must be greater than zero");
    }
    if station.connection.success_rate.is_nan() {
        anyhow::bail!("connection.success_rate must be a number between 0 and 1");
    }
    station.connection.success_rate = station.connection.success_rate.clamp(0.0, 1.0);
    Ok(station)
}

pub fn load_widgets_config() -> anyhow::Result<WidgetsConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/widgets"))
        .build()?;

    Ok(settings.try_deserialize()?)
}
