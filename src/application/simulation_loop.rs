// Simulation loop - Drives ground station ticks from a fixed-rate timer
use crate::application::ground_station::GroundStation;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at};

const MIN_PERIOD: Duration = Duration::from_millis(1);

pub struct SimulationLoop {
    period: Duration,
    handle: Mutex<Option<JoinHandle<()>>>,
}

impl SimulationLoop {
    /// `period` is raised to at least one millisecond; tokio intervals reject zero.
    pub fn new(period: Duration) -> Self {
        Self {
            period: period.max(MIN_PERIOD),
            handle: Mutex::new(None),
        }
    }

    /// Start ticking `station` once per period. Returns `false` if already running.
    pub async fn start(&self, station: Arc<Mutex<GroundStation>>) -> bool {
        let mut handle = self.handle.lock().await;
        if handle.as_ref().is_some_and(|h| !h.is_finished()) {
            tracing::debug!("Simulation already running");
            return false;
        }

        let period = self.period;
        tracing::info!(period_ms = period.as_millis() as u64, "Starting telemetry simulation");

        *handle = Some(tokio::spawn(async move {
            // First tick lands one period after start, not immediately
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                ticker.tick().await;
                let now = chrono::Local::now();
                station.lock().await.tick(now);
            }
        }));
        true
    }

    /// Cancel the timer. Returns `false` if it was not running.
    pub async fn stop(&self) -> bool {
        match self.handle.lock().await.take() {
            Some(handle) => {
                handle.abort();
                tracing::info!("Stopped telemetry simulation");
                true
            }
            None => false,
        }
    }

    pub async fn is_running(&self) -> bool {
        self.handle
            .lock()
            .await
            .as_ref()
            .is_some_and(|h| !h.is_finished())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::config::SimulationSettings;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn station() -> Arc<Mutex<GroundStation>> {
        Arc::new(Mutex::new(GroundStation::new(
            &SimulationSettings::default(),
            chrono::Local::now(),
            StdRng::seed_from_u64(1),
        )))
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_is_idempotent() {
        let station = station();
        let sim = SimulationLoop::new(Duration::from_secs(1));

        assert!(sim.start(station.clone()).await);
        assert!(!sim.start(station.clone()).await);
        assert!(sim.is_running().await);

        tokio::time::sleep(Duration::from_millis(3_500)).await;

        // initial sample plus exactly three ticks from a single timer
        assert_eq!(station.lock().await.history().len(), 4);
        assert!(sim.stop().await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_halts_ticks() {
        let station = station();
        let sim = SimulationLoop::new(Duration::from_secs(1));

        assert!(!sim.stop().await);
        sim.start(station.clone()).await;
        tokio::time::sleep(Duration::from_millis(1_500)).await;
        assert!(sim.stop().await);
        assert!(!sim.is_running().await);

        let ticks = station.lock().await.history().len();
        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(station.lock().await.history().len(), ticks);

        // restart after stop is allowed
        assert!(sim.start(station.clone()).await);
        sim.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_period_still_ticks() {
        let station = station();
        let sim = SimulationLoop::new(Duration::ZERO);

        assert!(sim.start(station.clone()).await);
        tokio::time::sleep(Duration::from_millis(10)).await;

        assert!(sim.is_running().await);
        assert!(station.lock().await.history().len() > 1);
        sim.stop().await;
    }
}
