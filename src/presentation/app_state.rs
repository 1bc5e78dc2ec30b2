// Application state for HTTP handlers
use crate::application::connection_service::ConnectionService;
use crate::application::dashboard_service::DashboardService;
use crate::application::ground_station::GroundStation;
use crate::application::localization_service::LocalizationService;
use crate::application::preference_store::PreferenceStore;
use crate::application::settings_service::SettingsService;
use crate::application::simulation_loop::SimulationLoop;
use crate::domain::chart::ChartSnapshot;
use crate::domain::i18n::Catalog;
use crate::domain::telemetry::TelemetryMessage;
use crate::infrastructure::chart_publisher::WatchChartRenderer;
use crate::infrastructure::config::{StationConfig, WidgetsConfig};
use crate::infrastructure::telemetry_broadcast::BroadcastObserver;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, broadcast, watch};

#[derive(Clone)]
pub struct AppState {
    pub station: Arc<Mutex<GroundStation>>,
    pub simulation: Arc<SimulationLoop>,
    pub charts: watch::Receiver<ChartSnapshot>,
    pub telemetry: broadcast::Sender<TelemetryMessage>,
    pub dashboard_service: DashboardService,
    pub connection_service: ConnectionService,
    pub settings_service: SettingsService,
    pub localization_service: LocalizationService,
    pub calibration_delay: Duration,
}

impl AppState {
    /// Wire the station, its observer and renderer, and every service.
    pub async fn new(
        config: &StationConfig,
        widgets_config: WidgetsConfig,
        store: Arc<dyn PreferenceStore>,
    ) -> anyhow::Result<Self> {
        let mut station = GroundStation::new(
            &config.simulation,
            chrono::Local::now(),
            StdRng::from_os_rng(),
        );

        let (observer, telemetry) = BroadcastObserver::channel();
        station.register_observer(Box::new(observer));

        let (renderer, charts) = WatchChartRenderer::channel();
        station.attach_renderer(Box::new(renderer));

        let station = Arc::new(Mutex::new(station));

        let localization_service =
            LocalizationService::load(Catalog::embedded()?, store.clone()).await?;
        let settings_service = SettingsService::load(store).await?;
        let connection_service = ConnectionService::new(config.connection.clone());
        let dashboard_service = DashboardService::new(
            station.clone(),
            connection_service.clone(),
            localization_service.clone(),
            widgets_config,
        );

        Ok(Self {
            station,
            simulation: Arc::new(SimulationLoop::new(Duration::from_millis(
                config.simulation.tick_interval_ms,
            ))),
            charts,
            telemetry,
            dashboard_service,
            connection_service,
            settings_service,
            localization_service,
            calibration_delay: Duration::from_millis(config.sensors.calibration_delay_ms),
        })
    }
}
