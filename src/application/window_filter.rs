// Time window filter - Trailing window ending at the latest date
use crate::domain::metrics::MetricTable;
use crate::domain::window::TimeWindow;
use chrono::Duration;

/// Keep rows with `date > max_date - window`. The boundary row is excluded
/// and rows without a date never match. An empty or date-less table yields
/// an empty table.
pub fn filter_window(table: &MetricTable, window: TimeWindow) -> MetricTable {
    let Some(max_date) = table.max_date() else {
        tracing::debug!("No dated rows, window {} selects nothing", window);
        return table.with_rows(Vec::new());
    };

    let cutoff = max_date - Duration::days(window.days());
    let rows = table
        .rows
        .iter()
        .filter(|row| row.date.is_some_and(|d| d > cutoff))
        .cloned()
        .collect::<Vec<_>>();

    tracing::debug!(
        "Window {} kept {} of {} rows (after {})",
        window,
        rows.len(),
        table.len(),
        cutoff
    );
    table.with_rows(rows)
}
