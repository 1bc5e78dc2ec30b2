// Station settings domain model
use super::error::StationError;
use serde::{Deserialize, Serialize};

const DEFAULT_TELEMETRY_RATE: u32 = 10;
const DEFAULT_COUNTDOWN_S: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionType {
    Bluetooth,
    Wifi,
    Radio,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionSettings {
    pub device_id: String,
    pub connection_type: ConnectionType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TelemetrySettings {
    pub rate: u32,
    pub logging: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LaunchSettings {
    pub countdown_time: u32,
    pub safety_checks: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub connection: ConnectionSettings,
    pub telemetry: TelemetrySettings,
    pub launch: LaunchSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            connection: ConnectionSettings {
                device_id: "ROCKET-001".to_string(),
                connection_type: ConnectionType::Bluetooth,
            },
            telemetry: TelemetrySettings {
                rate: DEFAULT_TELEMETRY_RATE,
                logging: true,
            },
            launch: LaunchSettings {
                countdown_time: DEFAULT_COUNTDOWN_S,
                safety_checks: true,
            },
        }
    }
}

impl Settings {
    /// Validate a submitted form, substituting defaults for zero numeric fields.
    pub fn normalized(mut self) -> Result<Self, StationError> {
        let device_id = self.connection.device_id.trim();
        if device_id.is_empty() {
            return Err(StationError::InvalidSetting {
                field: "deviceId",
                reason: "must not be empty".to_string(),
            });
        }
        self.connection.device_id = device_id.to_string();

        if self.telemetry.rate == 0 {
            self.telemetry.rate = DEFAULT_TELEMETRY_RATE;
        }
        if self.launch.countdown_time == 0 {
            self.launch.countdown_time = DEFAULT_COUNTDOWN_S;
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_persisted_shape() {
        let json = serde_json::to_value(Settings::default()).unwrap();
        assert_eq!(json["connection"]["deviceId"], "ROCKET-001");
        assert_eq!(json["connection"]["connectionType"], "bluetooth");
        assert_eq!(json["launch"]["countdownTime"], 10);
        assert_eq!(json["launch"]["safetyChecks"], true);
        assert_eq!(json["telemetry"]["rate"], 10);
    }

    #[test]
    fn test_normalized_substitutes_zero_fields() {
        let mut settings = Settings::default();
        settings.telemetry.rate = 0;
        settings.launch.countdown_time = 0;
        settings.connection.device_id = "  PAD-7 ".to_string();

        let normalized = settings.normalized().unwrap();
        assert_eq!(normalized.telemetry.rate, 10);
        assert_eq!(normalized.launch.countdown_time, 10);
        assert_eq!(normalized.connection.device_id, "PAD-7");
    }

    #[test]
    fn test_normalized_rejects_blank_device() {
        let mut settings = Settings::default();
        settings.connection.device_id = "   ".to_string();
        assert!(matches!(
            settings.normalized(),
            Err(StationError::InvalidSetting { field: "deviceId", .. })
        ));
    }
}
