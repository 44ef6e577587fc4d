// Dashboard service - Use case for building chart panels
use crate::application::chart_reshaper::ChartReshaper;
use crate::application::metric_table_service::MetricTableService;
use crate::application::series_resolver::resolve_selector;
use crate::domain::catalog::{DASHBOARD_PANELS, SeriesSelector};
use crate::domain::chart::{ChartPanel, Dashboard, PanelState, SeriesLegend};
use crate::domain::error::DashboardError;
use crate::domain::metrics::MetricTable;
use crate::domain::window::TimeWindow;

#[derive(Clone)]
pub struct DashboardService {
    tables: MetricTableService,
    reshaper: ChartReshaper,
}

impl DashboardService {
    pub fn new(tables: MetricTableService, reshaper: ChartReshaper) -> Self {
        Self { tables, reshaper }
    }

    /// The fixed eight-panel grid.
    pub async fn get_dashboard(&self, window: TimeWindow) -> Result<Dashboard, DashboardError> {
        self.get_panels(window, &DASHBOARD_PANELS).await
    }

    pub async fn get_panels(
        &self,
        window: TimeWindow,
        selectors: &[SeriesSelector],
    ) -> Result<Dashboard, DashboardError> {
        let (latest_date, filtered) = self.tables.windowed_table(window).await?;
        let panels = selectors
            .iter()
            .map(|selector| self.build_panel(*selector, &filtered))
            .collect();
        Ok(Dashboard::new(latest_date, window, panels))
    }

    pub async fn get_panel(
        &self,
        selector: SeriesSelector,
        window: TimeWindow,
    ) -> Result<ChartPanel, DashboardError> {
        let (_, filtered) = self.tables.windowed_table(window).await?;
        Ok(self.build_panel(selector, &filtered))
    }

    /// Each panel stands alone: an empty panel never affects its neighbours.
    pub fn build_panel(&self, selector: SeriesSelector, filtered: &MetricTable) -> ChartPanel {
        if filtered.is_empty() {
            return ChartPanel::new(selector, PanelState::NoRows);
        }

        let columns = resolve_selector(&selector, filtered);
        if columns.is_empty() {
            return ChartPanel::new(selector, PanelState::NoColumns);
        }

        let points = self.reshaper.reshape(filtered, &columns);
        if points.iter().all(|p| p.value.is_none()) {
            return ChartPanel::new(selector, PanelState::NoValues);
        }

        let legend = columns
            .into_iter()
            .map(|name| {
                let class = self.reshaper.classifier().classify(&name);
                SeriesLegend {
                    name,
                    region: class.label,
                    color: class.color,
                }
            })
            .collect();

        ChartPanel::new(selector, PanelState::Ready { legend, points })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::metric_table_service::tests::{StubRepository, daily_raw};
    use crate::application::region_classifier::RegionClassifier;
    use crate::application::unit_normalizer::NormalizationPolicy;
    use crate::domain::catalog::{Program, Technology, default_region_labels};
    use std::sync::Arc;

    fn service(repo: StubRepository) -> DashboardService {
        let tables = MetricTableService::new(Arc::new(repo), Vec::new(), "DATE".to_string());
        let reshaper = ChartReshaper::new(
            RegionClassifier::new(default_region_labels()),
            NormalizationPolicy::PerGroup,
        );
        DashboardService::new(tables, reshaper)
    }

    fn two_g_normal() -> SeriesSelector {
        SeriesSelector::new(Technology::TwoG, Program::Normal)
    }

    #[tokio::test]
    async fn test_ten_days_seven_day_window() {
        let raw = daily_raw(&["2G JAKARTA RAYA", "2G JAVA"], 10, |i| format!("0.9{i}"));
        let panel = service(StubRepository::new(Some(raw)))
            .get_panel(two_g_normal(), TimeWindow::Last7Days)
            .await
            .unwrap();

        let PanelState::Ready { legend, points } = panel.state else {
            panic!("expected a ready panel");
        };
        assert_eq!(legend.len(), 2);
        assert_eq!(points.len(), 14);

        // Rows 4..=10 survive, each value scaled from proportion to percent.
        let first = &points[0];
        assert_eq!(first.date.date().to_string(), "2025-01-04");
        assert!((first.value.unwrap() - 93.0).abs() < 1e-9);
        assert!(points.iter().all(|p| p.value.unwrap() > 90.0));
    }

    #[tokio::test]
    async fn test_missing_columns_only_empty_their_own_panel() {
        let raw = daily_raw(&["2G JAVA"], 3, |_| "0.99".into());
        let dashboard = service(StubRepository::new(Some(raw)))
            .get_dashboard(TimeWindow::Last7Days)
            .await
            .unwrap();

        assert_eq!(dashboard.panels.len(), 8);
        assert!(matches!(dashboard.panels[0].state, PanelState::Ready { .. }));
        assert!(
            dashboard.panels[1..]
                .iter()
                .all(|p| p.state == PanelState::NoColumns)
        );
        assert_eq!(dashboard.latest_date.unwrap().to_string(), "2025-01-03");
    }

    #[tokio::test]
    async fn test_all_null_values_report_empty_state() {
        let raw = daily_raw(&["2G JAVA"], 3, |_| String::new());
        let panel = service(StubRepository::new(Some(raw)))
            .get_panel(two_g_normal(), TimeWindow::Last7Days)
            .await
            .unwrap();
        assert_eq!(panel.state, PanelState::NoValues);
    }

    #[tokio::test]
    async fn test_undated_table_reports_no_rows() {
        let mut raw = daily_raw(&["2G JAVA"], 3, |_| "0.9".into());
        for record in &mut raw.records {
            record[0] = "??".to_string();
        }
        let panel = service(StubRepository::new(Some(raw)))
            .get_panel(two_g_normal(), TimeWindow::Last7Days)
            .await
            .unwrap();
        assert_eq!(panel.state, PanelState::NoRows);
    }

    #[tokio::test]
    async fn test_missing_source_fails_whole_dashboard() {
        let result = service(StubRepository::new(None))
            .get_dashboard(TimeWindow::Last7Days)
            .await;
        assert!(matches!(result, Err(DashboardError::SourceMissing(_))));
    }
}
