// Application layer - Pipeline stages and use cases
pub mod chart_reshaper;
pub mod dashboard_service;
pub mod export_service;
pub mod metric_repository;
pub mod metric_table_service;
pub mod region_classifier;
pub mod schema_normalizer;
pub mod series_resolver;
pub mod unit_normalizer;
pub mod window_filter;
