// Domain layer - Plain data and rules, no I/O
pub mod chart;
pub mod connection;
pub mod dashboard;
pub mod error;
pub mod i18n;
pub mod navigation;
pub mod sensors;
pub mod settings;
pub mod telemetry;
