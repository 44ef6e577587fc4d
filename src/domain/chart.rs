// Chart-ready models handed to the rendering layer
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::catalog::SeriesSelector;
use super::error::DashboardError;
use super::window::TimeWindow;

/// One (date, series, value) observation in long form.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LongFormPoint {
    pub date: NaiveDateTime,
    pub series: String,
    pub region: String,
    pub color: Option<String>,
    /// Percent after unit normalization; `None` is a gap, never zero.
    pub value: Option<f64>,
}

/// Legend entry for one plotted series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesLegend {
    pub name: String,
    pub region: String,
    pub color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum PanelState {
    Ready {
        legend: Vec<SeriesLegend>,
        points: Vec<LongFormPoint>,
    },
    /// The time window selected no rows.
    NoRows,
    /// None of the configured columns exist in the data file.
    NoColumns,
    /// Every selected value in the window is null.
    NoValues,
}

impl PanelState {
    pub fn empty_message(&self) -> Option<&'static str> {
        match self {
            PanelState::Ready { .. } => None,
            PanelState::NoRows => Some("No data in the selected time window"),
            PanelState::NoColumns => Some("No data for this combination"),
            PanelState::NoValues => Some("All values for this combination are empty"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPanel {
    pub selector: SeriesSelector,
    pub title: String,
    #[serde(flatten)]
    pub state: PanelState,
}

impl ChartPanel {
    pub fn new(selector: SeriesSelector, state: PanelState) -> Self {
        Self {
            title: selector.title(),
            selector,
            state,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub title: String,
    pub latest_date: Option<NaiveDate>,
    pub window: TimeWindow,
    pub panels: Vec<ChartPanel>,
}

impl Dashboard {
    pub fn new(latest_date: Option<NaiveDate>, window: TimeWindow, panels: Vec<ChartPanel>) -> Self {
        Self {
            title: "Dashboard Availability".to_string(),
            latest_date,
            window,
            panels,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartBackend {
    #[default]
    Interactive,
    Static,
}

impl fmt::Display for ChartBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChartBackend::Interactive => f.write_str("interactive"),
            ChartBackend::Static => f.write_str("static"),
        }
    }
}

impl FromStr for ChartBackend {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "interactive" => Ok(ChartBackend::Interactive),
            "static" => Ok(ChartBackend::Static),
            _ => Err(DashboardError::UnknownBackend(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::{Program, Technology};

    #[test]
    fn test_empty_panel_serializes_state_tag() {
        let panel = ChartPanel::new(
            SeriesSelector::new(Technology::TwoG, Program::Mw),
            PanelState::NoColumns,
        );
        let json = serde_json::to_value(&panel).unwrap();
        assert_eq!(json["state"], "no_columns");
        assert_eq!(json["title"], "2G - MW");
        assert_eq!(json["selector"]["technology"], "2G");
    }

    #[test]
    fn test_only_ready_panels_have_no_message() {
        let ready = PanelState::Ready {
            legend: vec![],
            points: vec![],
        };
        assert!(ready.empty_message().is_none());
        assert!(PanelState::NoRows.empty_message().is_some());
        assert!(PanelState::NoValues.empty_message().is_some());
    }
}
