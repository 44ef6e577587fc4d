// HTTP request handlers
use crate::application::export_service::ExportFormat;
use crate::domain::catalog::SeriesSelector;
use crate::domain::chart::{ChartBackend, ChartPanel, Dashboard};
use crate::domain::error::DashboardError;
use crate::domain::window::TimeWindow;
use crate::infrastructure::http_response::{
    accepts_brotli, download_response, error_response, json_response, log_error,
    status_for,
};
use crate::infrastructure::static_chart::render_svg;
use crate::presentation::app_state::AppState;
use crate::presentation::page::render_page;
use axum::{
    Router,
    extract::{Path, Query, State},
    http::{HeaderMap, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use serde::Deserialize;
use std::sync::Arc;
use tower_http::services::ServeFile;
use tower_http::trace::TraceLayer;

#[derive(Debug, Default, Deserialize)]
pub struct WindowQuery {
    pub window: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub window: Option<String>,
    /// `technology/program`, as submitted by the page's panel select.
    pub panel: Option<String>,
    pub technology: Option<String>,
    pub program: Option<String>,
    pub backend: Option<String>,
}

pub fn build_router(state: Arc<AppState>, interactive_asset: &std::path::Path) -> Router {
    Router::new()
        .route("/", get(dashboard_page))
        .route("/healthz", get(health_check))
        .route("/api/dashboard", get(dashboard_json))
        .route("/api/panels/:technology/:program", get(panel_json))
        .route("/charts/:technology/:chart", get(panel_svg))
        .route("/export/csv", get(export_csv))
        .route("/export/xlsx", get(export_xlsx))
        .route_service("/assets/plotly.min.js", ServeFile::new(interactive_asset))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn window_or_default(state: &AppState, raw: Option<&str>) -> Result<TimeWindow, DashboardError> {
    Ok(raw
        .map(str::parse::<TimeWindow>)
        .transpose()?
        .unwrap_or(state.default_window))
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Full HTML dashboard, or a single panel when `panel` (or `technology`
/// with `program`) names one.
pub async fn dashboard_page(
    Query(query): Query<PageQuery>,
    State(state): State<Arc<AppState>>,
) -> Response {
    match render_dashboard_page(&state, &query).await {
        Ok(html) => Html(html).into_response(),
        // Plain text: a fatal error must not render any chart.
        Err(e) => {
            log_error(&e);
            (status_for(&e), e.to_string()).into_response()
        }
    }
}

async fn render_dashboard_page(state: &AppState, query: &PageQuery) -> Result<String, DashboardError> {
    let window = window_or_default(state, query.window.as_deref())?;
    let requested = query
        .backend
        .as_deref()
        .map(str::parse::<ChartBackend>)
        .transpose()?;
    let (backend, notice) = state.effective_backend(requested);

    let selection = page_selection(query)?;

    let dashboard = match selection {
        Some(selector) => state.dashboard_service.get_panels(window, &[selector]).await?,
        None => state.dashboard_service.get_dashboard(window).await?,
    };
    render_page(&dashboard, backend, notice, selection)
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Single-choice selector from `panel` or `technology` + `program`; `None`
/// means the full grid.
fn page_selection(query: &PageQuery) -> Result<Option<SeriesSelector>, DashboardError> {
    if let Some(panel) = non_blank(query.panel.as_deref()) {
        let (technology, program) = panel
            .split_once('/')
            .ok_or_else(|| DashboardError::UnknownSelector(panel.to_string()))?;
        return SeriesSelector::parse(technology, program).map(Some);
    }

    match (non_blank(query.technology.as_deref()), non_blank(query.program.as_deref())) {
        (Some(technology), Some(program)) => SeriesSelector::parse(technology, program).map(Some),
        (None, None) => Ok(None),
        (technology, program) => Err(DashboardError::UnknownSelector(format!(
            "{} - {}",
            technology.unwrap_or("?"),
            program.unwrap_or("?")
        ))),
    }
}

/// All eight panels as JSON
pub async fn dashboard_json(
    Query(query): Query<WindowQuery>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Response {
    match load_dashboard(&state, query.window.as_deref()).await {
        Ok(dashboard) => json_response(&dashboard, accepts_brotli(&headers))
            .await
            .unwrap_or_else(IntoResponse::into_response),
        Err(e) => error_response(&e),
    }
}

async fn load_dashboard(state: &AppState, window: Option<&str>) -> Result<Dashboard, DashboardError> {
    let window = window_or_default(state, window)?;
    state.dashboard_service.get_dashboard(window).await
}

/// One panel as JSON
pub async fn panel_json(
    Path((technology, program)): Path<(String, String)>,
    Query(query): Query<WindowQuery>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Response {
    match load_panel(&state, &technology, &program, query.window.as_deref()).await {
        Ok(panel) => json_response(&panel, accepts_brotli(&headers))
            .await
            .unwrap_or_else(IntoResponse::into_response),
        Err(e) => error_response(&e),
    }
}

async fn load_panel(
    state: &AppState,
    technology: &str,
    program: &str,
    window: Option<&str>,
) -> Result<ChartPanel, DashboardError> {
    let selector = SeriesSelector::parse(technology, program)?;
    let window = window_or_default(state, window)?;
    state.dashboard_service.get_panel(selector, window).await
}

/// One panel rendered statically, e.g. `/charts/4g/75-sites.svg`
pub async fn panel_svg(
    Path((technology, chart)): Path<(String, String)>,
    Query(query): Query<WindowQuery>,
    State(state): State<Arc<AppState>>,
) -> Response {
    let program = chart.strip_suffix(".svg").unwrap_or(&chart);
    let svg = match load_panel(&state, &technology, program, query.window.as_deref()).await {
        Ok(panel) => render_svg(&panel),
        Err(e) => Err(e),
    };

    match svg {
        Ok(svg) => ([(header::CONTENT_TYPE, "image/svg+xml")], svg).into_response(),
        Err(e) => error_response(&e),
    }
}

pub async fn export_csv(
    Query(query): Query<WindowQuery>,
    State(state): State<Arc<AppState>>,
) -> Response {
    export(&state, ExportFormat::Csv, query.window.as_deref()).await
}

pub async fn export_xlsx(
    Query(query): Query<WindowQuery>,
    State(state): State<Arc<AppState>>,
) -> Response {
    export(&state, ExportFormat::Xlsx, query.window.as_deref()).await
}

async fn export(state: &AppState, format: ExportFormat, window: Option<&str>) -> Response {
    let file = match window_or_default(state, window) {
        Ok(window) => state.export_service.export(format, window).await,
        Err(e) => Err(e),
    };

    match file {
        Ok(file) => download_response(file.bytes, file.content_type, file.file_name)
            .unwrap_or_else(IntoResponse::into_response),
        Err(e) => error_response(&e),
    }
}
