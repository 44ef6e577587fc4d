// Domain layer - Availability metrics, catalog and chart models
pub mod catalog;
pub mod chart;
pub mod error;
pub mod metrics;
pub mod window;
