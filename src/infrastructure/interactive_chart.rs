// Plotly figure payloads for the interactive backend
use crate::domain::chart::{ChartPanel, PanelState};
use serde::Serialize;
use serde_json::{Value, json};
use std::path::Path;

pub const FALLBACK_NOTICE: &str =
    "Interactive charts are unavailable; showing static charts instead.";

/// Interactive rendering needs the Plotly bundle on disk. Checked once at
/// startup; a missing bundle is logged here and surfaced to users as
/// [`FALLBACK_NOTICE`].
pub fn bundle_available(asset: &Path) -> bool {
    let available = asset.is_file();
    if !available {
        tracing::warn!(
            "Plotly bundle {} not found, falling back to static charts",
            asset.display()
        );
    }
    available
}

#[derive(Debug, Serialize)]
pub struct PlotlyTrace {
    pub x: Vec<String>,
    /// `null` entries render as gaps.
    pub y: Vec<Option<f64>>,
    pub name: String,
    pub mode: &'static str,
    #[serde(rename = "type")]
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct PlotlyFigure {
    pub data: Vec<PlotlyTrace>,
    pub layout: Value,
}

/// One line trace per legend entry; `None` for empty panels.
pub fn plotly_figure(panel: &ChartPanel) -> Option<PlotlyFigure> {
    let PanelState::Ready { legend, points } = &panel.state else {
        return None;
    };

    let data = legend
        .iter()
        .map(|series| {
            let own = points.iter().filter(|p| p.series == series.name);
            PlotlyTrace {
                x: own
                    .clone()
                    .map(|p| p.date.format("%Y-%m-%d %H:%M:%S").to_string())
                    .collect(),
                y: own.map(|p| p.value).collect(),
                name: series.name.clone(),
                mode: "lines+markers",
                kind: "scatter",
                line: series.color.as_ref().map(|c| json!({ "color": c })),
            }
        })
        .collect();

    Some(PlotlyFigure {
        data,
        layout: json!({
            "title": { "text": panel.title },
            "xaxis": { "title": { "text": "DATE" } },
            "yaxis": { "title": { "text": "Availability (%)" }, "ticksuffix": "%" },
            "legend": { "font": { "size": 10 } },
            "margin": { "l": 50, "r": 20, "t": 40, "b": 40 },
            "height": 320,
        }),
    })
}

/// JSON safe to embed inside a `<script>` element.
pub fn figure_script_json(figure: &PlotlyFigure) -> serde_json::Result<String> {
    Ok(serde_json::to_string(figure)?.replace("</", "<\\/"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::{Program, SeriesSelector, Technology};
    use crate::domain::chart::{LongFormPoint, SeriesLegend};
    use chrono::NaiveDate;

    fn ready_panel() -> ChartPanel {
        let date = NaiveDate::from_ymd_opt(2025, 5, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let point = |series: &str, value| LongFormPoint {
            date,
            series: series.to_string(),
            region: "JAVA".to_string(),
            color: None,
            value,
        };
        ChartPanel::new(
            SeriesSelector::new(Technology::FourG, Program::Mw),
            PanelState::Ready {
                legend: vec![
                    SeriesLegend {
                        name: "4G JAVA MW".to_string(),
                        region: "JAVA".to_string(),
                        color: Some("#ff7f0e".to_string()),
                    },
                    SeriesLegend {
                        name: "4G PAPUA MW".to_string(),
                        region: "4G PAPUA MW".to_string(),
                        color: None,
                    },
                ],
                points: vec![point("4G JAVA MW", Some(99.1)), point("4G PAPUA MW", None)],
            },
        )
    }

    #[test]
    fn test_one_trace_per_series_with_gaps() {
        let figure = plotly_figure(&ready_panel()).unwrap();
        let json = serde_json::to_value(&figure).unwrap();

        assert_eq!(json["data"].as_array().unwrap().len(), 2);
        assert_eq!(json["data"][0]["line"]["color"], "#ff7f0e");
        assert_eq!(json["data"][0]["type"], "scatter");
        assert!(json["data"][1].get("line").is_none());
        assert_eq!(json["data"][1]["y"][0], Value::Null);
        assert_eq!(json["layout"]["title"]["text"], "4G - MW");
    }

    #[test]
    fn test_bundle_available_checks_file() {
        let dir = tempfile::tempdir().unwrap();
        let bundle = dir.path().join("plotly.min.js");
        assert!(!bundle_available(&bundle));
        assert!(!bundle_available(dir.path()));

        std::fs::write(&bundle, "/* plotly */").unwrap();
        assert!(bundle_available(&bundle));
    }

    #[test]
    fn test_empty_panel_has_no_figure() {
        let panel = ChartPanel::new(
            SeriesSelector::new(Technology::FourG, Program::Mw),
            PanelState::NoRows,
        );
        assert!(plotly_figure(&panel).is_none());
    }

    #[test]
    fn test_script_json_cannot_close_script_tag() {
        let mut panel = ready_panel();
        panel.title = "</script>".to_string();
        let script = figure_script_json(&plotly_figure(&panel).unwrap()).unwrap();
        assert!(!script.contains("</script>"));
    }
}
