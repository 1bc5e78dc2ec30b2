// Chart domain models - channels, rolling windows and rendered snapshots
use super::error::StationError;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, VecDeque};
use std::fmt;
use std::str::FromStr;

/// Monitored chart channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    Altitude,
    Velocity,
    Acceleration,
    Temperature,
    AccelX,
    AccelY,
    AccelZ,
    GyroPitch,
    GyroYaw,
    GyroRoll,
}

impl Channel {
    pub const ALL: [Channel; 10] = [
        Channel::Altitude,
        Channel::Velocity,
        Channel::Acceleration,
        Channel::Temperature,
        Channel::AccelX,
        Channel::AccelY,
        Channel::AccelZ,
        Channel::GyroPitch,
        Channel::GyroYaw,
        Channel::GyroRoll,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Channel::Altitude => "altitude",
            Channel::Velocity => "velocity",
            Channel::Acceleration => "acceleration",
            Channel::Temperature => "temperature",
            Channel::AccelX => "accel_x",
            Channel::AccelY => "accel_y",
            Channel::AccelZ => "accel_z",
            Channel::GyroPitch => "gyro_pitch",
            Channel::GyroYaw => "gyro_yaw",
            Channel::GyroRoll => "gyro_roll",
        }
    }

    /// Seed value used to pre-fill a fresh window.
    ///
    /// The z accelerometer rests at 1 g and temperature gets jitter in `[20, 21)`.
    pub fn placeholder<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        match self {
            Channel::AccelZ => 1.0,
            Channel::Temperature => 20.0 + rng.random::<f64>(),
            _ => 0.0,
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Channel {
    type Err = StationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Channel::ALL
            .into_iter()
            .find(|c| c.id() == s)
            .ok_or_else(|| StationError::UnknownChannel(s.to_string()))
    }
}

/// Fixed-capacity ordered sequence with FIFO eviction.
#[derive(Debug, Clone)]
pub struct RollingSeries<T> {
    values: VecDeque<T>,
    capacity: usize,
}

impl<T: Clone> RollingSeries<T> {
    pub fn new(capacity: usize) -> Self {
        Self {
            values: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Append `value`, returning the evicted head when the window overflows.
    pub fn push(&mut self, value: T) -> Option<T> {
        self.values.push_back(value);
        if self.values.len() > self.capacity {
            self.values.pop_front()
        } else {
            None
        }
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn last(&self) -> Option<&T> {
        self.values.back()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.values.iter()
    }

    pub fn to_vec(&self) -> Vec<T> {
        self.iter().cloned().collect()
    }
}

/// Labels plus every channel series, as handed to chart renderers.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChartSnapshot {
    pub labels: Vec<String>,
    pub series: BTreeMap<Channel, Vec<f64>>,
}

impl ChartSnapshot {
    pub fn channel(&self, channel: Channel) -> Option<&[f64]> {
        self.series.get(&channel).map(Vec::as_slice)
    }
}
