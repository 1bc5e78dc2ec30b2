// Presentation layer - HTTP surface consumed by the dashboard front-end
pub mod app_state;
pub mod error;
pub mod handlers;
