// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, sync::Arc};
use tracing_subscriber::EnvFilter;

use crate::application::chart_reshaper::ChartReshaper;
use crate::application::dashboard_service::DashboardService;
use crate::application::export_service::ExportService;
use crate::application::metric_table_service::MetricTableService;
use crate::application::region_classifier::RegionClassifier;
use crate::domain::catalog::default_region_labels;
use crate::infrastructure::config::load_dashboard_config;
use crate::infrastructure::csv_repository::CsvMetricRepository;
use crate::infrastructure::interactive_chart::bundle_available;
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::build_router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = load_dashboard_config()?;

    // Repository (infrastructure layer)
    let repository = Arc::new(CsvMetricRepository::new(config.source.path.clone()));

    // Services (application layer)
    let tables = MetricTableService::new(
        repository,
        config.source.renames.clone(),
        config.source.date_column.clone(),
    );
    let reshaper = ChartReshaper::new(
        RegionClassifier::new(default_region_labels()),
        config.charts.normalization,
    );
    let dashboard_service = DashboardService::new(tables.clone(), reshaper);
    let export_service = ExportService::new(tables);

    let state = Arc::new(AppState {
        dashboard_service,
        export_service,
        default_window: config.charts.default_window,
        backend: config.charts.backend,
        interactive_available: bundle_available(&config.charts.interactive_asset),
    });

    // Router (presentation layer)
    let router = build_router(state, &config.charts.interactive_asset);

    let addr: SocketAddr = config.server.bind.parse()?;
    tracing::info!(
        "Serving availability dashboard for {} on {}",
        config.source.path.display(),
        addr
    );

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
