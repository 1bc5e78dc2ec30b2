// Application layer - Simulation, services and the seams they depend on
pub mod chart_buffer;
pub mod connection_service;
pub mod dashboard_service;
pub mod flight_simulator;
pub mod ground_station;
pub mod localization_service;
pub mod preference_store;
pub mod sensor_simulator;
pub mod settings_service;
pub mod simulation_loop;
