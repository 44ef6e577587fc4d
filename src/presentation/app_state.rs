// Application state for HTTP handlers
use crate::application::dashboard_service::DashboardService;
use crate::application::export_service::ExportService;
use crate::domain::chart::ChartBackend;
use crate::domain::window::TimeWindow;

#[derive(Clone)]
pub struct AppState {
    pub dashboard_service: DashboardService,
    pub export_service: ExportService,
    pub default_window: TimeWindow,
    /// Backend used when a request does not pick one.
    pub backend: ChartBackend,
    /// Whether the Plotly bundle was found at startup.
    pub interactive_available: bool,
}

impl AppState {
    /// Backend for a request plus the notice to show when interactive
    /// rendering was asked for but is unavailable.
    pub fn effective_backend(
        &self,
        requested: Option<ChartBackend>,
    ) -> (ChartBackend, Option<&'static str>) {
        match requested.unwrap_or(self.backend) {
            ChartBackend::Interactive if !self.interactive_available => (
                ChartBackend::Static,
                Some(crate::infrastructure::interactive_chart::FALLBACK_NOTICE),
            ),
            backend => (backend, None),
        }
    }
}
