// Infrastructure layer - External dependencies and adapters
pub mod chart_publisher;
pub mod chunked_json;
pub mod config;
pub mod file_preference_store;
pub mod http_response;
#[cfg(test)]
pub mod memory_preference_store;
pub mod telemetry_broadcast;
