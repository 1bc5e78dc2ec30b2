// Flight simulator - Produces one telemetry sample per tick
use crate::domain::telemetry::{
    FlightEvent, FlightPhase, FlightState, GROUND_TEMPERATURE_C, IDLE_TEMPERATURE_NOISE_C,
    TelemetrySample, TelemetryUpdate, flight_profile, flight_temperature,
};
use rand::Rng;
use std::collections::VecDeque;

pub const DEFAULT_HISTORY_CAPACITY: usize = 100;

/// Receives every sample the simulator emits, plus launch and landing events.
pub trait TelemetryObserver: Send {
    fn on_sample(&mut self, sample: &TelemetrySample);

    fn on_event(&mut self, _event: &FlightEvent) {}
}

/// Result of one simulation step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickOutcome {
    pub sample: TelemetrySample,
    pub state: FlightState,
    pub event: Option<FlightEvent>,
}

pub struct FlightSimulator {
    current: TelemetrySample,
    history: VecDeque<TelemetrySample>,
    history_capacity: usize,
    state: FlightState,
    observer: Option<Box<dyn TelemetryObserver>>,
}

impl FlightSimulator {
    pub fn new(now_ms: i64, history_capacity: usize) -> Self {
        let current = TelemetrySample::at_rest(now_ms);
        let mut history = VecDeque::with_capacity(history_capacity + 1);
        history.push_back(current);

        Self {
            current,
            history,
            history_capacity: history_capacity.max(1),
            state: FlightState::Idle,
            observer: None,
        }
    }

    /// Install the observer, replacing any previous one.
    pub fn register_observer(&mut self, observer: Box<dyn TelemetryObserver>) {
        if self.observer.is_some() {
            tracing::debug!("Replacing registered telemetry observer");
        }
        self.observer = Some(observer);
    }

    /// Ignite. Calling this mid-flight restarts the profile from `now_ms`.
    pub fn launch(&mut self, now_ms: i64) -> FlightEvent {
        if self.state.is_launched() {
            tracing::warn!("Launch requested while already in flight, restarting profile");
        }
        self.state = FlightState::InFlight {
            launch_time_ms: now_ms,
        };
        tracing::info!(launch_time_ms = now_ms, "Rocket launched");

        let event = FlightEvent::Launched {
            launch_time_ms: now_ms,
        };
        if let Some(observer) = self.observer.as_mut() {
            observer.on_event(&event);
        }
        event
    }

    /// Advance the model to `now_ms` and emit the resulting sample.
    pub fn tick<R: Rng + ?Sized>(&mut self, now_ms: i64, rng: &mut R) -> TickOutcome {
        let (update, event) = match self.state {
            FlightState::Idle => (Self::idle_update(rng), None),
            FlightState::InFlight { launch_time_ms } => self.flight_update(now_ms, launch_time_ms),
        };

        // Timestamps must strictly increase even if the clock stalls or steps back
        let timestamp = now_ms.max(self.current.timestamp + 1);
        let sample = self.current.merge(update, timestamp);
        self.record(sample);

        if let Some(observer) = self.observer.as_mut() {
            observer.on_sample(&sample);
            if let Some(event) = event.as_ref() {
                observer.on_event(event);
            }
        }

        TickOutcome {
            sample,
            state: self.state,
            event,
        }
    }

    fn idle_update<R: Rng + ?Sized>(rng: &mut R) -> TelemetryUpdate {
        let noise = rng.random_range(-IDLE_TEMPERATURE_NOISE_C..IDLE_TEMPERATURE_NOISE_C);
        TelemetryUpdate {
            altitude: Some(0.0),
            velocity: Some(0.0),
            acceleration: Some(0.0),
            temperature: Some(GROUND_TEMPERATURE_C + noise),
        }
    }

    fn flight_update(
        &mut self,
        now_ms: i64,
        launch_time_ms: i64,
    ) -> (TelemetryUpdate, Option<FlightEvent>) {
        let elapsed = (now_ms - launch_time_ms) as f64 / 1000.0;
        let (phase, kinematics) = flight_profile(elapsed);

        let event = if phase == FlightPhase::Touchdown {
            self.state = FlightState::Idle;
            tracing::info!(flight_time_s = elapsed, "Touchdown detected, returning to idle");
            Some(FlightEvent::Landed {
                landed_at_ms: now_ms,
                flight_time_s: elapsed,
            })
        } else {
            None
        };

        let update = TelemetryUpdate {
            altitude: Some(kinematics.altitude.max(0.0)),
            velocity: Some(kinematics.velocity),
            acceleration: Some(kinematics.acceleration),
            temperature: Some(flight_temperature(elapsed)),
        };
        (update, event)
    }

    fn record(&mut self, sample: TelemetrySample) {
        self.current = sample;
        self.history.push_back(sample);
        while self.history.len() > self.history_capacity {
            self.history.pop_front();
        }
    }

    pub fn state(&self) -> FlightState {
        self.state
    }

    pub fn current_sample(&self) -> TelemetrySample {
        self.current
    }

    pub fn history(&self) -> Vec<TelemetrySample> {
        self.history.iter().copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::sync::{Arc, Mutex};

    const T0: i64 = 1_700_000_000_000;

    #[derive(Default)]
    struct Recorded {
        samples: Vec<TelemetrySample>,
        events: Vec<FlightEvent>,
    }

    struct RecordingObserver(Arc<Mutex<Recorded>>);

    impl TelemetryObserver for RecordingObserver {
        fn on_sample(&mut self, sample: &TelemetrySample) {
            self.0.lock().unwrap().samples.push(*sample);
        }

        fn on_event(&mut self, event: &FlightEvent) {
            self.0.lock().unwrap().events.push(*event);
        }
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    #[test]
    fn test_idle_ticks_hover_near_ground() {
        let mut sim = FlightSimulator::new(T0, DEFAULT_HISTORY_CAPACITY);
        let mut rng = rng();
        for i in 1..=20 {
            let outcome = sim.tick(T0 + i * 1000, &mut rng);
            assert_eq!(outcome.state, FlightState::Idle);
            assert_eq!(outcome.sample.altitude, 0.0);
            assert_eq!(outcome.sample.velocity, 0.0);
            assert_eq!(outcome.sample.acceleration, 0.0);
            assert!((outcome.sample.temperature - GROUND_TEMPERATURE_C).abs() <= 0.1);
        }
    }

    #[test]
    fn test_history_is_bounded() {
        let mut sim = FlightSimulator::new(T0, DEFAULT_HISTORY_CAPACITY);
        let mut rng = rng();
        for i in 1..=250 {
            sim.tick(T0 + i * 1000, &mut rng);
            assert!(sim.history().len() <= DEFAULT_HISTORY_CAPACITY);
        }
        let history = sim.history();
        assert_eq!(history.len(), DEFAULT_HISTORY_CAPACITY);
        assert_eq!(history.last().unwrap().timestamp, T0 + 250 * 1000);
        assert_eq!(history.first().unwrap().timestamp, T0 + 151 * 1000);
    }

    #[test]
    fn test_timestamps_strictly_increase() {
        let mut sim = FlightSimulator::new(T0, DEFAULT_HISTORY_CAPACITY);
        let mut rng = rng();
        // stalled and rewound clocks
        let first = sim.tick(T0, &mut rng).sample.timestamp;
        let second = sim.tick(T0, &mut rng).sample.timestamp;
        let third = sim.tick(T0 - 5_000, &mut rng).sample.timestamp;
        assert!(T0 < first && first < second && second < third);
    }

    #[test]
    fn test_first_tick_after_launch() {
        let mut sim = FlightSimulator::new(T0, DEFAULT_HISTORY_CAPACITY);
        let mut rng = rng();
        sim.tick(T0 + 1000, &mut rng);
        sim.launch(T0 + 1500);

        // same instant as launch: elapsed = 0
        let outcome = sim.tick(T0 + 1500, &mut rng);
        assert_eq!(outcome.sample.altitude, 0.0);
        assert_eq!(outcome.sample.velocity, 0.0);
        assert_eq!(outcome.sample.acceleration, 20.0);
        assert_eq!(outcome.state, FlightState::InFlight { launch_time_ms: T0 + 1500 });
    }

    #[test]
    fn test_full_flight_lands_and_resets() {
        let recorded = Arc::new(Mutex::new(Recorded::default()));
        let mut sim = FlightSimulator::new(T0, DEFAULT_HISTORY_CAPACITY);
        sim.register_observer(Box::new(RecordingObserver(recorded.clone())));
        let mut rng = rng();

        sim.launch(T0);
        let mut landed_at = None;
        for second in 1..=60 {
            let outcome = sim.tick(T0 + second * 1000, &mut rng);
            assert!(outcome.sample.altitude >= 0.0);
            if let Some(FlightEvent::Landed { .. }) = outcome.event {
                assert_eq!(outcome.sample.altitude, 0.0);
                assert_eq!(outcome.sample.velocity, 0.0);
                assert_eq!(outcome.sample.acceleration, 0.0);
                assert_eq!(outcome.state, FlightState::Idle);
                landed_at = Some(second);
                break;
            }
            assert!(outcome.state.is_launched());
        }
        assert_eq!(landed_at, Some(46));
        assert_eq!(sim.state(), FlightState::Idle);

        // back to idle noise on the following tick
        let after = sim.tick(T0 + 47_000, &mut rng);
        assert_eq!(after.event, None);
        assert!((after.sample.temperature - GROUND_TEMPERATURE_C).abs() <= 0.1);

        let recorded = recorded.lock().unwrap();
        assert_eq!(recorded.samples.len(), 47);
        assert_eq!(recorded.events.len(), 2);
        assert!(matches!(recorded.events[0], FlightEvent::Launched { .. }));
        assert!(matches!(recorded.events[1], FlightEvent::Landed { .. }));
    }

    #[test]
    fn test_apex_sample() {
        let mut sim = FlightSimulator::new(T0, DEFAULT_HISTORY_CAPACITY);
        let mut rng = rng();
        sim.launch(T0);
        let outcome = sim.tick(T0 + 10_000, &mut rng);
        assert!((outcome.sample.velocity - 150.0).abs() < 1e-9);
        assert!((outcome.sample.altitude - (1000.0 - 1000.0 / 6.0)).abs() < 1e-9);
        assert_eq!(outcome.sample.acceleration, -9.8);
        assert!((outcome.sample.temperature - 22.3).abs() < 1e-9);
    }

    #[test]
    fn test_accessors_return_copies() {
        let mut sim = FlightSimulator::new(T0, DEFAULT_HISTORY_CAPACITY);
        let mut rng = rng();
        let mut history = sim.history();
        history.clear();
        assert_eq!(sim.history().len(), 1);

        let before = sim.current_sample();
        sim.tick(T0 + 1000, &mut rng);
        assert_eq!(before.timestamp, T0);
        assert_eq!(sim.current_sample().timestamp, T0 + 1000);
    }
}
