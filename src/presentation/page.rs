// HTML dashboard page
use crate::domain::catalog::{SERIES_CATALOG, SeriesSelector};
use crate::domain::chart::{ChartBackend, ChartPanel, Dashboard};
use crate::domain::error::DashboardError;
use crate::domain::window::TimeWindow;
use crate::infrastructure::interactive_chart::{figure_script_json, plotly_figure};
use crate::infrastructure::static_chart::render_svg;
use handlebars::Handlebars;
use serde_json::{Value, json};

const TEMPLATE: &str = include_str!("templates/dashboard.hbs");

fn render_error<E: std::fmt::Display>(e: E) -> DashboardError {
    DashboardError::Render(e.to_string())
}

fn panel_context(
    index: usize,
    panel: &ChartPanel,
    backend: ChartBackend,
) -> Result<Value, DashboardError> {
    if let Some(message) = panel.state.empty_message() {
        return Ok(json!({ "title": panel.title, "message": message }));
    }

    match (backend, plotly_figure(panel)) {
        (ChartBackend::Interactive, Some(figure)) => Ok(json!({
            "id": format!("panel-{index}"),
            "title": panel.title,
            "figure": figure_script_json(&figure).map_err(render_error)?,
        })),
        _ => Ok(json!({ "title": panel.title, "svg": render_svg(panel)? })),
    }
}

/// `panel` query value selecting one chart, e.g. `2G/75-sites`.
pub fn panel_value(selector: &SeriesSelector) -> String {
    format!("{}/{}", selector.technology, selector.program.slug())
}

/// Render the sidebar, the optional fallback notice and every panel.
pub fn render_page(
    dashboard: &Dashboard,
    backend: ChartBackend,
    notice: Option<&str>,
    selection: Option<SeriesSelector>,
) -> Result<String, DashboardError> {
    let panels = dashboard
        .panels
        .iter()
        .enumerate()
        .map(|(i, panel)| panel_context(i, panel, backend))
        .collect::<Result<Vec<_>, _>>()?;

    let windows: Vec<Value> = TimeWindow::ALL
        .iter()
        .map(|w| json!({ "days": w.days(), "label": w.label(), "selected": *w == dashboard.window }))
        .collect();

    let choices: Vec<Value> = SERIES_CATALOG
        .iter()
        .map(|entry| {
            json!({
                "value": panel_value(&entry.selector),
                "label": entry.selector.title(),
                "selected": selection == Some(entry.selector),
            })
        })
        .collect();

    let backends: Vec<Value> = [ChartBackend::Interactive, ChartBackend::Static]
        .into_iter()
        .map(|b| {
            json!({
                "value": b.to_string(),
                "label": match b {
                    ChartBackend::Interactive => "Interactive",
                    ChartBackend::Static => "Static",
                },
                "selected": b == backend,
            })
        })
        .collect();

    let handlebars = Handlebars::new();
    handlebars
        .render_template(
            TEMPLATE,
            &json!({
                "title": dashboard.title,
                "latest_date": dashboard.latest_date.map(|d| d.to_string()),
                "window_label": dashboard.window.label(),
                "window_days": dashboard.window.days(),
                "windows": windows,
                "interactive": backend == ChartBackend::Interactive,
                "notice": notice,
                "choices": choices,
                "backends": backends,
                "panels": panels,
            }),
        )
        .map_err(render_error)
}
