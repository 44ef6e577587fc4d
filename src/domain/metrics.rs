// Availability metric tables
use chrono::NaiveDateTime;

/// Column name the availability exports use for the row date.
pub const DEFAULT_DATE_COLUMN: &str = "DATE";

/// Untyped table exactly as read from the data file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub records: Vec<Vec<String>>,
}

impl RawTable {
    pub fn new(headers: Vec<String>, records: Vec<Vec<String>>) -> Self {
        Self { headers, records }
    }
}

/// One dated row. `values` is aligned with [`MetricTable::metric_columns`];
/// `None` means the reading was missing or unparseable.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricRow {
    pub date: Option<NaiveDateTime>,
    pub values: Vec<Option<f64>>,
}

impl MetricRow {
    pub fn new(date: Option<NaiveDateTime>, values: Vec<Option<f64>>) -> Self {
        Self { date, values }
    }
}

/// Typed table with a parsed date column and nullable numeric metrics.
///
/// The date column is stored apart from the metric columns, but its original
/// position is kept so exports reproduce the source column order.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricTable {
    pub date_column: String,
    pub date_position: usize,
    pub metric_columns: Vec<String>,
    pub rows: Vec<MetricRow>,
}

impl MetricTable {
    pub fn new(
        date_column: String,
        date_position: usize,
        metric_columns: Vec<String>,
        rows: Vec<MetricRow>,
    ) -> Self {
        Self {
            date_column,
            date_position,
            metric_columns,
            rows,
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.metric_columns.iter().position(|c| c == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Latest non-null date, compared by value rather than row position.
    pub fn max_date(&self) -> Option<NaiveDateTime> {
        self.rows.iter().filter_map(|r| r.date).max()
    }

    /// Full column order, date column included at its source position.
    pub fn column_order(&self) -> Vec<&str> {
        let mut order: Vec<&str> = self.metric_columns.iter().map(String::as_str).collect();
        let position = self.date_position.min(order.len());
        order.insert(position, self.date_column.as_str());
        order
    }

    /// Derive a table with the same schema and a different row set.
    pub fn with_rows(&self, rows: Vec<MetricRow>) -> Self {
        Self {
            date_column: self.date_column.clone(),
            date_position: self.date_position,
            metric_columns: self.metric_columns.clone(),
            rows,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn day(d: u32) -> Option<NaiveDateTime> {
        NaiveDate::from_ymd_opt(2025, 1, d).and_then(|d| d.and_hms_opt(0, 0, 0))
    }

    fn table() -> MetricTable {
        MetricTable::new(
            "DATE".to_string(),
            1,
            vec!["2G JAVA".to_string(), "4G JAVA".to_string()],
            vec![
                MetricRow::new(day(3), vec![Some(0.9), None]),
                MetricRow::new(None, vec![None, None]),
                MetricRow::new(day(5), vec![Some(0.8), Some(0.7)]),
                MetricRow::new(day(1), vec![None, Some(0.6)]),
            ],
        )
    }

    #[test]
    fn test_max_date_ignores_order_and_nulls() {
        assert_eq!(table().max_date(), day(5));
    }

    #[test]
    fn test_max_date_of_all_null_table() {
        let t = table().with_rows(vec![MetricRow::new(None, vec![None, None])]);
        assert_eq!(t.max_date(), None);
    }

    #[test]
    fn test_column_order_restores_date_position() {
        assert_eq!(table().column_order(), vec!["2G JAVA", "DATE", "4G JAVA"]);
    }

    #[test]
    fn test_column_lookup() {
        let t = table();
        assert_eq!(t.column_index("4G JAVA"), Some(1));
        assert!(!t.has_column("4G GHOST"));
    }
}
