// Domain errors surfaced to callers
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StationError {
    #[error("unknown language: {0}")]
    UnknownLanguage(String),

    #[error("unknown sensor: {0}")]
    UnknownSensor(String),

    #[error("sensor cannot be calibrated: {0}")]
    NotCalibratable(String),

    #[error("unknown panel: {0}")]
    UnknownPanel(String),

    #[error("unknown chart channel: {0}")]
    UnknownChannel(String),

    #[error("invalid setting {field}: {reason}")]
    InvalidSetting { field: &'static str, reason: String },
}
