// Infrastructure layer - External dependencies and adapters
pub mod config;
pub mod csv_repository;
pub mod export_encoder;
pub mod http_response;
pub mod interactive_chart;
pub mod static_chart;
