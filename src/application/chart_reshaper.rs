// Chart data reshaper - Wide rows to long-form plotting points
use crate::application::region_classifier::RegionClassifier;
use crate::application::unit_normalizer::{NormalizationPolicy, normalize_units};
use crate::domain::chart::LongFormPoint;
use crate::domain::metrics::MetricTable;
use chrono::NaiveDateTime;
use std::collections::HashMap;

/// A melted observation before unit and region handling.
#[derive(Debug, Clone, PartialEq)]
pub struct MeltedPoint {
    pub date: NaiveDateTime,
    pub series: String,
    pub value: Option<f64>,
}

/// Melt `columns` of `table` into long form, column by column. Nulls are
/// kept. Rows without a date cannot be placed on a time axis and are
/// skipped; a window-filtered table has none.
pub fn melt(table: &MetricTable, columns: &[String]) -> Vec<MeltedPoint> {
    let mut points = Vec::with_capacity(table.len() * columns.len());
    for column in columns {
        let Some(idx) = table.column_index(column) else {
            continue;
        };
        for row in &table.rows {
            if let Some(date) = row.date {
                points.push(MeltedPoint {
                    date,
                    series: column.clone(),
                    value: row.values.get(idx).copied().flatten(),
                });
            }
        }
    }
    points
}

#[derive(Debug, Clone)]
pub struct ChartReshaper {
    classifier: RegionClassifier,
    policy: NormalizationPolicy,
}

impl ChartReshaper {
    pub fn new(classifier: RegionClassifier, policy: NormalizationPolicy) -> Self {
        Self { classifier, policy }
    }

    pub fn classifier(&self) -> &RegionClassifier {
        &self.classifier
    }

    /// Melt, normalize units and classify regions for one chart.
    pub fn reshape(&self, table: &MetricTable, columns: &[String]) -> Vec<LongFormPoint> {
        let melted = melt(table, columns);
        let values = self.normalized_values(&melted);

        melted
            .into_iter()
            .zip(values)
            .map(|(point, value)| {
                let class = self.classifier.classify(&point.series);
                LongFormPoint {
                    date: point.date,
                    series: point.series,
                    region: class.label,
                    color: class.color,
                    value,
                }
            })
            .collect()
    }

    fn normalized_values(&self, melted: &[MeltedPoint]) -> Vec<Option<f64>> {
        let values: Vec<Option<f64>> = melted.iter().map(|p| p.value).collect();
        match self.policy {
            NormalizationPolicy::PerGroup => normalize_units(&values),
            NormalizationPolicy::PerSeries => {
                let mut by_series: HashMap<&str, Vec<usize>> = HashMap::new();
                for (i, point) in melted.iter().enumerate() {
                    by_series.entry(point.series.as_str()).or_default().push(i);
                }

                let mut out = values.clone();
                for indices in by_series.values() {
                    let series: Vec<Option<f64>> = indices.iter().map(|&i| values[i]).collect();
                    for (&i, v) in indices.iter().zip(normalize_units(&series)) {
                        out[i] = v;
                    }
                }
                out
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::default_region_labels;
    use crate::domain::metrics::MetricRow;
    use chrono::{Duration, NaiveDate};

    fn day(offset: i64) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
            + Duration::days(offset)
    }

    fn table() -> MetricTable {
        MetricTable::new(
            "DATE".to_string(),
            0,
            vec!["2G JAVA".to_string(), "2G NATIONAL".to_string(), "2G SUMATERA".to_string()],
            vec![
                MetricRow::new(Some(day(0)), vec![Some(0.90), Some(95.0), None]),
                MetricRow::new(Some(day(1)), vec![None, Some(97.0), Some(0.5)]),
            ],
        )
    }

    fn reshaper(policy: NormalizationPolicy) -> ChartReshaper {
        ChartReshaper::new(RegionClassifier::new(default_region_labels()), policy)
    }

    #[test]
    fn test_melt_is_column_major_and_keeps_nulls() {
        let columns = vec!["2G JAVA".to_string(), "2G SUMATERA".to_string()];
        let melted = melt(&table(), &columns);
        let summary: Vec<_> = melted.iter().map(|p| (p.series.as_str(), p.value)).collect();
        assert_eq!(
            summary,
            vec![
                ("2G JAVA", Some(0.90)),
                ("2G JAVA", None),
                ("2G SUMATERA", None),
                ("2G SUMATERA", Some(0.5)),
            ]
        );
    }

    #[test]
    fn test_group_policy_uses_one_max_for_all_series() {
        let columns = vec!["2G JAVA".to_string(), "2G NATIONAL".to_string()];
        let points = reshaper(NormalizationPolicy::PerGroup).reshape(&table(), &columns);
        let values: Vec<_> = points.iter().map(|p| p.value).collect();
        // The 97.0 reading keeps the whole group unscaled.
        assert_eq!(values, vec![Some(0.90), None, Some(95.0), Some(97.0)]);
    }

    #[test]
    fn test_series_policy_scales_each_column_alone() {
        let columns = vec!["2G JAVA".to_string(), "2G NATIONAL".to_string()];
        let points = reshaper(NormalizationPolicy::PerSeries).reshape(&table(), &columns);
        let values: Vec<_> = points.iter().map(|p| p.value).collect();
        assert_eq!(values, vec![Some(90.0), None, Some(95.0), Some(97.0)]);
    }

    #[test]
    fn test_points_carry_region_and_color() {
        let columns = vec!["2G SUMATERA".to_string()];
        let points = reshaper(NormalizationPolicy::PerGroup).reshape(&table(), &columns);
        assert!(points.iter().all(|p| p.region == "SUMATERA" && p.color.is_some()));
        assert_eq!(points[1].value, Some(50.0));
    }

    #[test]
    fn test_undated_rows_are_skipped() {
        let mut t = table();
        t.rows.push(MetricRow::new(None, vec![Some(0.1), None, None]));
        assert_eq!(melt(&t, &["2G JAVA".to_string()]).len(), 2);
    }
}
