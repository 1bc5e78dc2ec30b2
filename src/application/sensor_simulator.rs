// Sensor simulator - Random-walk drift on the onboard sensors
use crate::domain::error::StationError;
use crate::domain::sensors::{SensorKind, SensorReadings};
use rand::Rng;

const ACCEL_DRIFT_G: f64 = 0.01;
const GYRO_DRIFT_DEG: f64 = 0.2;
const PRESSURE_DRIFT_KPA: f64 = 0.05;
const BARO_ALTITUDE_DRIFT_M: f64 = 0.1;

pub struct SensorSimulator {
    readings: SensorReadings,
}

impl SensorSimulator {
    pub fn new(now_ms: i64) -> Self {
        Self {
            readings: SensorReadings::power_on(now_ms),
        }
    }

    /// Drift every sensor except GPS and stamp `now_ms`.
    pub fn tick<R: Rng + ?Sized>(&mut self, now_ms: i64, rng: &mut R) -> SensorReadings {
        let r = &mut self.readings;

        r.accelerometer.x += jitter(rng, ACCEL_DRIFT_G);
        r.accelerometer.y += jitter(rng, ACCEL_DRIFT_G);
        r.accelerometer.z += jitter(rng, ACCEL_DRIFT_G);

        r.gyroscope.pitch += jitter(rng, GYRO_DRIFT_DEG);
        r.gyroscope.yaw += jitter(rng, GYRO_DRIFT_DEG);
        r.gyroscope.roll += jitter(rng, GYRO_DRIFT_DEG);

        r.barometer.pressure += jitter(rng, PRESSURE_DRIFT_KPA);
        r.barometer.altitude += jitter(rng, BARO_ALTITUDE_DRIFT_M);

        r.timestamp = now_ms;
        *r
    }

    pub fn calibrate(&mut self, kind: SensorKind) -> Result<SensorReadings, StationError> {
        self.readings.calibrate(kind)?;
        tracing::info!(sensor = kind.id(), "Sensor calibrated");
        Ok(self.readings)
    }

    pub fn readings(&self) -> SensorReadings {
        self.readings
    }
}

fn jitter<R: Rng + ?Sized>(rng: &mut R, half_width: f64) -> f64 {
    rng.random_range(-half_width..half_width)
}
