// Series resolver - Catalog columns that exist in the current table
use crate::domain::catalog::SeriesSelector;
use crate::domain::metrics::MetricTable;

/// Configured columns present in `table`, in configured order. Absent columns
/// are dropped silently; an empty result is the caller's "no data" case.
pub fn resolve_columns(configured: &[&str], table: &MetricTable) -> Vec<String> {
    configured
        .iter()
        .filter(|column| table.has_column(column))
        .map(|column| column.to_string())
        .collect()
}

pub fn resolve_selector(selector: &SeriesSelector, table: &MetricTable) -> Vec<String> {
    let configured = selector.configured_columns();
    let resolved = resolve_columns(configured, table);
    if resolved.len() < configured.len() {
        tracing::debug!(
            "{}: {} of {} configured columns present",
            selector,
            resolved.len(),
            configured.len()
        );
    }
    resolved
}
