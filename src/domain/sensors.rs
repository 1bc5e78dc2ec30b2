// Sensor domain models
use super::chart::Channel;
use super::error::StationError;
use serde::Serialize;
use std::str::FromStr;

pub const SEA_LEVEL_PRESSURE_KPA: f64 = 101.3;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Accelerometer {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Gyroscope {
    pub pitch: f64,
    pub yaw: f64,
    pub roll: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Barometer {
    pub pressure: f64,
    pub altitude: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Gps {
    pub latitude: f64,
    pub longitude: f64,
    pub satellites: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SensorReadings {
    pub accelerometer: Accelerometer,
    pub gyroscope: Gyroscope,
    pub barometer: Barometer,
    pub gps: Gps,
    pub timestamp: i64,
}

impl SensorReadings {
    /// Readings of a freshly powered board sitting on the pad.
    pub fn power_on(timestamp: i64) -> Self {
        Self {
            accelerometer: Accelerometer {
                x: 0.02,
                y: 0.01,
                z: 1.00,
            },
            gyroscope: Gyroscope {
                pitch: 0.5,
                yaw: 1.2,
                roll: 0.3,
            },
            barometer: Barometer {
                pressure: SEA_LEVEL_PRESSURE_KPA,
                altitude: 0.0,
            },
            gps: Gps {
                latitude: 39.9042,
                longitude: 116.4074,
                satellites: 8,
            },
            timestamp,
        }
    }

    /// Reset the given sensor to its reference values.
    pub fn calibrate(&mut self, kind: SensorKind) -> Result<(), StationError> {
        match kind {
            SensorKind::Accelerometer => {
                self.accelerometer = Accelerometer {
                    x: 0.0,
                    y: 0.0,
                    z: 1.0,
                };
            }
            SensorKind::Gyroscope => {
                self.gyroscope = Gyroscope {
                    pitch: 0.0,
                    yaw: 0.0,
                    roll: 0.0,
                };
            }
            SensorKind::Barometer => {
                self.barometer = Barometer {
                    pressure: SEA_LEVEL_PRESSURE_KPA,
                    altitude: 0.0,
                };
            }
            SensorKind::Gps => {
                return Err(StationError::NotCalibratable(kind.id().to_string()));
            }
        }
        Ok(())
    }

    /// Raw axes plotted on the accelerometer and gyroscope charts.
    pub fn chart_values(&self) -> [(Channel, f64); 6] {
        [
            (Channel::AccelX, self.accelerometer.x),
            (Channel::AccelY, self.accelerometer.y),
            (Channel::AccelZ, self.accelerometer.z),
            (Channel::GyroPitch, self.gyroscope.pitch),
            (Channel::GyroYaw, self.gyroscope.yaw),
            (Channel::GyroRoll, self.gyroscope.roll),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SensorKind {
    Accelerometer,
    Gyroscope,
    Barometer,
    Gps,
}

impl SensorKind {
    pub fn id(&self) -> &'static str {
        match self {
            SensorKind::Accelerometer => "accelerometer",
            SensorKind::Gyroscope => "gyroscope",
            SensorKind::Barometer => "barometer",
            SensorKind::Gps => "gps",
        }
    }

    pub fn is_calibratable(&self) -> bool {
        !matches!(self, SensorKind::Gps)
    }

    /// Catalog key of the sensor's display name.
    pub fn label_key(&self) -> String {
        format!("sensors.{}", self.id())
    }
}

impl FromStr for SensorKind {
    type Err = StationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "accelerometer" => Ok(SensorKind::Accelerometer),
            "gyroscope" => Ok(SensorKind::Gyroscope),
            "barometer" => Ok(SensorKind::Barometer),
            "gps" => Ok(SensorKind::Gps),
            other => Err(StationError::UnknownSensor(other.to_string())),
        }
    }
}
