// Unit normalizer - Proportion to percentage rescaling
use serde::Deserialize;

/// Whether the proportion check looks at a whole panel or at each series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NormalizationPolicy {
    /// One decision across every selected series of a chart.
    #[default]
    PerGroup,
    /// One decision per column.
    PerSeries,
}

/// Largest non-null value, or `None` when every value is null.
pub fn max_value(values: &[Option<f64>]) -> Option<f64> {
    values.iter().flatten().copied().reduce(f64::max)
}

/// Scale by 100 when the largest non-null value is at most 1.0.
///
/// Nulls pass through and are ignored by the check. All-null input is
/// returned unchanged. Already-percent input is left alone, so reapplying
/// the normalizer is a no-op.
pub fn normalize_units(values: &[Option<f64>]) -> Vec<Option<f64>> {
    match max_value(values) {
        Some(max) if max <= 1.0 => values.iter().map(|v| v.map(|x| x * 100.0)).collect(),
        _ => values.to_vec(),
    }
}
