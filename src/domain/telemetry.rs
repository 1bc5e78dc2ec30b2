// Telemetry domain models and the closed-form flight profile
use serde::Serialize;

/// Pad temperature reported while the rocket sits on the rail.
pub const GROUND_TEMPERATURE_C: f64 = 21.3;
/// Half-width of the uniform thermal noise applied while idle.
pub const IDLE_TEMPERATURE_NOISE_C: f64 = 0.1;

const BURN_DURATION_S: f64 = 10.0;
const FLIGHT_WINDOW_S: f64 = 60.0;
const GRAVITY: f64 = 9.8;
const WARMING_RATE_C_PER_S: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TelemetrySample {
    pub altitude: f64,
    pub velocity: f64,
    pub acceleration: f64,
    pub temperature: f64,
    pub timestamp: i64,
}

impl TelemetrySample {
    pub fn at_rest(timestamp: i64) -> Self {
        Self {
            altitude: 0.0,
            velocity: 0.0,
            acceleration: 0.0,
            temperature: GROUND_TEMPERATURE_C,
            timestamp,
        }
    }

    /// Produce the next sample by overlaying `update` and stamping `timestamp`.
    pub fn merge(&self, update: TelemetryUpdate, timestamp: i64) -> Self {
        Self {
            altitude: update.altitude.unwrap_or(self.altitude),
            velocity: update.velocity.unwrap_or(self.velocity),
            acceleration: update.acceleration.unwrap_or(self.acceleration),
            temperature: update.temperature.unwrap_or(self.temperature),
            timestamp,
        }
    }
}

/// Partial sample; unset fields keep the previous value on merge.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TelemetryUpdate {
    pub altitude: Option<f64>,
    pub velocity: Option<f64>,
    pub acceleration: Option<f64>,
    pub temperature: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum FlightState {
    Idle,
    InFlight { launch_time_ms: i64 },
}

impl FlightState {
    pub fn is_launched(&self) -> bool {
        matches!(self, FlightState::InFlight { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum FlightEvent {
    Launched { launch_time_ms: i64 },
    Landed { landed_at_ms: i64, flight_time_s: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlightPhase {
    Ascent,
    Descent,
    Touchdown,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Kinematics {
    pub altitude: f64,
    pub velocity: f64,
    pub acceleration: f64,
}

impl Kinematics {
    pub const REST: Kinematics = Kinematics {
        altitude: 0.0,
        velocity: 0.0,
        acceleration: 0.0,
    };
}

/// Powered ascent, valid for `0 <= elapsed < 10`.
pub fn ascent(elapsed: f64) -> Kinematics {
    Kinematics {
        altitude: 10.0 * elapsed * elapsed - elapsed * elapsed * elapsed / 6.0,
        velocity: 20.0 * elapsed - 0.5 * elapsed * elapsed,
        acceleration: 20.0 - elapsed,
    }
}

/// State at burnout, seeding the ballistic descent.
pub fn apex() -> Kinematics {
    ascent(BURN_DURATION_S)
}

/// Ballistic coast after burnout; `fall_time` is measured from the apex.
pub fn descent(fall_time: f64) -> Kinematics {
    let apex = apex();
    Kinematics {
        altitude: apex.altitude + apex.velocity * fall_time - 0.5 * GRAVITY * fall_time * fall_time,
        velocity: apex.velocity - GRAVITY * fall_time,
        acceleration: -GRAVITY,
    }
}

/// Evaluate the piecewise flight model `elapsed` seconds after launch.
///
/// Ground impact during descent, or running past the flight window, yields
/// [`FlightPhase::Touchdown`] with all kinematics zeroed.
pub fn flight_profile(elapsed: f64) -> (FlightPhase, Kinematics) {
    let elapsed = elapsed.max(0.0);

    if elapsed < BURN_DURATION_S {
        return (FlightPhase::Ascent, ascent(elapsed));
    }

    if elapsed < FLIGHT_WINDOW_S {
        let kinematics = descent(elapsed - BURN_DURATION_S);
        if kinematics.altitude < 0.0 {
            return (FlightPhase::Touchdown, Kinematics::REST);
        }
        return (FlightPhase::Descent, kinematics);
    }

    (FlightPhase::Touchdown, Kinematics::REST)
}

/// Airframe warming approximation while in flight.
pub fn flight_temperature(elapsed: f64) -> f64 {
    GROUND_TEMPERATURE_C + elapsed.max(0.0) * WARMING_RATE_C_PER_S
}

/// Message fanned out to telemetry stream subscribers.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TelemetryMessage {
    Sample(TelemetrySample),
    Flight(FlightEvent),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_launch_instant() {
        let (phase, k) = flight_profile(0.0);
        assert_eq!(phase, FlightPhase::Ascent);
        assert_close(k.altitude, 0.0);
        assert_close(k.velocity, 0.0);
        assert_close(k.acceleration, 20.0);
    }

    #[test]
    fn test_apex_continuity() {
        let end_of_burn = ascent(10.0);
        let start_of_coast = descent(0.0);
        assert_close(end_of_burn.altitude, start_of_coast.altitude);
        assert_close(end_of_burn.velocity, start_of_coast.velocity);
        assert_close(apex().velocity, 150.0);
        assert_close(apex().altitude, 1000.0 - 1000.0 / 6.0);

        let (phase, k) = flight_profile(10.0);
        assert_eq!(phase, FlightPhase::Descent);
        assert_close(k.acceleration, -9.8);
    }

    #[test]
    fn test_touchdown_zeroes_kinematics() {
        // 833.3 + 150t - 4.9t^2 crosses zero near t = 35.4s after apex
        let (phase, _) = flight_profile(45.0);
        assert_eq!(phase, FlightPhase::Descent);

        let (phase, k) = flight_profile(46.0);
        assert_eq!(phase, FlightPhase::Touchdown);
        assert_eq!(k, Kinematics::REST);

        let (phase, k) = flight_profile(75.0);
        assert_eq!(phase, FlightPhase::Touchdown);
        assert_eq!(k, Kinematics::REST);
    }

    #[test]
    fn test_merge_keeps_unset_fields() {
        let base = TelemetrySample::at_rest(1_000);
        let next = base.merge(
            TelemetryUpdate {
                altitude: Some(12.5),
                ..Default::default()
            },
            2_000,
        );
        assert_eq!(next.altitude, 12.5);
        assert_eq!(next.temperature, GROUND_TEMPERATURE_C);
        assert_eq!(next.timestamp, 2_000);
    }

    #[test]
    fn test_flight_temperature() {
        assert_close(flight_temperature(0.0), 21.3);
        assert_close(flight_temperature(20.0), 23.3);
    }

    #[test]
    fn test_message_serialization() {
        let msg = TelemetryMessage::Flight(FlightEvent::Launched { launch_time_ms: 42 });
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["type"], "flight");
        assert_eq!(json["event"], "launched");
        assert_eq!(json["launch_time_ms"], 42);
    }
}
