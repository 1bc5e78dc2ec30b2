// Dashboard service - Use case for building localized dashboard views
use crate::application::connection_service::ConnectionService;
use crate::application::ground_station::GroundStation;
use crate::application::localization_service::{LocalizationService, Translator};
use crate::domain::chart::ChartSnapshot;
use crate::domain::connection::{ConnectionState, ConnectionStatus};
use crate::domain::dashboard::{ChartView, Dashboard, SeriesView, TileData};
use crate::domain::navigation::{NavigationEntry, Panel};
use crate::domain::telemetry::TelemetrySample;
use crate::infrastructure::config::WidgetsConfig;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

const TILE_PRECISION: i32 = 1;

#[derive(Clone)]
pub struct DashboardService {
    station: Arc<Mutex<GroundStation>>,
    connection: ConnectionService,
    localization: LocalizationService,
    widgets_config: WidgetsConfig,
    active_panel: Arc<RwLock<Panel>>,
}

impl DashboardService {
    pub fn new(
        station: Arc<Mutex<GroundStation>>,
        connection: ConnectionService,
        localization: LocalizationService,
        widgets_config: WidgetsConfig,
    ) -> Self {
        Self {
            station,
            connection,
            localization,
            widgets_config,
            active_panel: Arc::new(RwLock::new(Panel::default())),
        }
    }

    pub async fn get_dashboard(&self) -> Dashboard {
        let (sample, flight) = {
            let station = self.station.lock().await;
            (station.current_sample(), station.flight_state())
        };
        let tr = self.localization.translator().await;
        let connection = connection_status(self.connection.state().await, &tr);

        Dashboard {
            title: format!("{} - {}", tr.t("page.home"), tr.t("home.status")),
            tiles: telemetry_tiles(&sample, &tr),
            flight,
            connection,
            active_panel: *self.active_panel.read().await,
        }
    }

    pub async fn connection_status(&self) -> ConnectionStatus {
        let tr = self.localization.translator().await;
        connection_status(self.connection.state().await, &tr)
    }

    /// Pair each configured chart with its series from `snapshot`.
    pub async fn get_charts(&self, snapshot: &ChartSnapshot) -> Vec<ChartView> {
        let tr = self.localization.translator().await;
        let mut charts = Vec::new();

        for chart_config in &self.widgets_config.charts {
            let series: Vec<SeriesView> = chart_config
                .series
                .iter()
                .filter_map(|series_config| {
                    let values = snapshot.channel(series_config.channel)?;
                    let name = match &series_config.unit {
                        Some(unit) => format!("{} ({})", tr.t(&series_config.name), unit),
                        None => tr.t(&series_config.name),
                    };
                    Some(SeriesView {
                        channel: series_config.channel.id().to_string(),
                        name,
                        color: series_config.color.clone(),
                        y_axis: series_config.y_axis,
                        values: values.to_vec(),
                    })
                })
                .collect();

            // Only add chart if at least one of its channels is being recorded
            if series.is_empty() {
                tracing::debug!("Skipping chart {} - no recorded channels", chart_config.id);
                continue;
            }

            charts.push(ChartView {
                id: chart_config.id.clone(),
                title: tr.t(&chart_config.title),
                unit: chart_config.unit.clone(),
                y_min: chart_config.y_min,
                y_max: chart_config.y_max,
                labels: snapshot.labels.clone(),
                series,
            });
        }

        charts
    }

    pub async fn navigation(&self) -> Vec<NavigationEntry> {
        let tr = self.localization.translator().await;
        let active = *self.active_panel.read().await;
        Panel::ALL
            .into_iter()
            .map(|panel| NavigationEntry {
                id: panel,
                label: tr.t(&panel.nav_key()),
                title: tr.t(&panel.title_key()),
                active: panel == active,
            })
            .collect()
    }

    /// Make `panel` active and return its localized title.
    pub async fn navigate(&self, panel: Panel) -> String {
        *self.active_panel.write().await = panel;
        tracing::debug!(panel = panel.id(), "Navigated");
        self.localization.t(&panel.title_key()).await
    }
}

fn telemetry_tiles(sample: &TelemetrySample, tr: &Translator) -> Vec<TileData> {
    [
        ("altitude", "home.altitude", "m", sample.altitude),
        ("velocity", "home.speed", "m/s", sample.velocity),
        ("acceleration", "home.acceleration", "m/s²", sample.acceleration),
        ("temperature", "home.temperature", "°C", sample.temperature),
    ]
    .into_iter()
    .map(|(id, key, unit, value)| {
        TileData::new(
            id.to_string(),
            tr.t(key),
            unit.to_string(),
            value,
            TILE_PRECISION,
        )
    })
    .collect()
}

fn connection_status(state: ConnectionState, tr: &Translator) -> ConnectionStatus {
    let indicator = state.indicator();
    ConnectionStatus {
        state,
        indicator: indicator.class,
        button: tr.t(indicator.button_key),
        status: tr.t(indicator.status_key),
    }
}
