// Ground station - Owns the simulators and chart buffer, composes one tick
use crate::application::chart_buffer::{ChartRenderer, RollingChartBuffer};
use crate::application::flight_simulator::{FlightSimulator, TelemetryObserver, TickOutcome};
use crate::application::sensor_simulator::SensorSimulator;
use crate::domain::chart::Channel;
use crate::domain::error::StationError;
use crate::domain::sensors::{SensorKind, SensorReadings};
use crate::domain::telemetry::{FlightEvent, FlightState, TelemetrySample};
use crate::infrastructure::config::SimulationSettings;
use chrono::{DateTime, TimeZone};
use rand::rngs::StdRng;
use std::fmt::Display;

pub struct GroundStation {
    flight: FlightSimulator,
    sensors: SensorSimulator,
    charts: RollingChartBuffer,
    rng: StdRng,
}

impl GroundStation {
    pub fn new<Tz>(settings: &SimulationSettings, now: DateTime<Tz>, mut rng: StdRng) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        let now_ms = now.timestamp_millis();
        let mut charts = RollingChartBuffer::new(settings.chart_window);
        charts.initialize(&Channel::ALL, now, &mut rng);

        Self {
            flight: FlightSimulator::new(now_ms, settings.history_capacity),
            sensors: SensorSimulator::new(now_ms),
            charts,
            rng,
        }
    }

    pub fn register_observer(&mut self, observer: Box<dyn TelemetryObserver>) {
        self.flight.register_observer(observer);
    }

    pub fn attach_renderer(&mut self, renderer: Box<dyn ChartRenderer>) {
        self.charts.attach(renderer);
        self.charts.render();
    }

    /// One simulation step: drift sensors, advance the flight model, and
    /// append the whole frame to the charts before anyone can observe them.
    pub fn tick<Tz>(&mut self, now: DateTime<Tz>) -> TickOutcome
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        let now_ms = now.timestamp_millis();
        let readings = self.sensors.tick(now_ms, &mut self.rng);
        let outcome = self.flight.tick(now_ms, &mut self.rng);

        let sample = outcome.sample;
        let mut frame = vec![
            (Channel::Altitude, sample.altitude),
            (Channel::Velocity, sample.velocity),
            (Channel::Acceleration, sample.acceleration),
            (Channel::Temperature, sample.temperature),
        ];
        frame.extend(readings.chart_values());

        if let Err(e) = self.charts.append_frame(now, &frame) {
            tracing::error!("Failed to append chart frame: {}", e);
        }

        tracing::debug!(
            altitude = sample.altitude,
            velocity = sample.velocity,
            "Simulation tick"
        );
        outcome
    }

    pub fn launch(&mut self, now_ms: i64) -> FlightEvent {
        self.flight.launch(now_ms)
    }

    pub fn calibrate(&mut self, kind: SensorKind) -> Result<SensorReadings, StationError> {
        self.sensors.calibrate(kind)
    }

    pub fn flight_state(&self) -> FlightState {
        self.flight.state()
    }

    pub fn current_sample(&self) -> TelemetrySample {
        self.flight.current_sample()
    }

    pub fn history(&self) -> Vec<TelemetrySample> {
        self.flight.history()
    }

    pub fn sensors(&self) -> SensorReadings {
        self.sensors.readings()
    }

    #[cfg(test)]
    pub fn charts(&self) -> crate::domain::chart::ChartSnapshot {
        self.charts.snapshot()
    }
}
