// Schema normalizer - Column renames and lenient date/number parsing
use crate::domain::catalog::RenameRule;
use crate::domain::error::DashboardError;
use crate::domain::metrics::{MetricRow, MetricTable, RawTable};
use chrono::{DateTime, NaiveDate, NaiveDateTime};

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y/%m/%d %H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M:%S",
];

// Month-first wins over day-first when both would parse.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d/%m/%Y",
    "%d-%m-%Y",
    "%d-%b-%Y",
    "%d %b %Y",
];

/// Rename columns, locate the date column and type every cell.
///
/// Renames only touch headers that match `from` exactly. A missing date
/// column is fatal; an unparseable date or number in a single cell becomes
/// `None`.
pub fn normalize(
    raw: &RawTable,
    renames: &[RenameRule],
    date_column: &str,
) -> Result<MetricTable, DashboardError> {
    let headers: Vec<String> = raw
        .headers
        .iter()
        .map(|h| rename_header(h.trim(), renames))
        .collect();

    let date_position = headers
        .iter()
        .position(|h| h == date_column)
        .ok_or_else(|| DashboardError::MissingDateColumn(date_column.to_string()))?;

    let metric_columns: Vec<String> = headers
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != date_position)
        .map(|(_, h)| h.clone())
        .collect();

    let mut unparsed_dates = 0usize;
    let rows: Vec<MetricRow> = raw
        .records
        .iter()
        .map(|record| {
            let date = record.get(date_position).and_then(|cell| parse_date(cell));
            if date.is_none() {
                unparsed_dates += 1;
            }
            let values = (0..headers.len())
                .filter(|i| *i != date_position)
                .map(|i| record.get(i).and_then(|cell| parse_value(cell)))
                .collect();
            MetricRow::new(date, values)
        })
        .collect();

    if unparsed_dates > 0 {
        tracing::warn!("{} rows have an unparseable {} value", unparsed_dates, date_column);
    }
    tracing::debug!(
        "Normalized {} rows with {} metric columns",
        rows.len(),
        metric_columns.len()
    );

    Ok(MetricTable::new(
        date_column.to_string(),
        date_position,
        metric_columns,
        rows,
    ))
}

fn rename_header(header: &str, renames: &[RenameRule]) -> String {
    renames
        .iter()
        .find(|r| r.from == header)
        .map(|r| r.to.clone())
        .unwrap_or_else(|| header.to_string())
}

/// Lenient date parsing; anything unrecognised is `None`.
pub fn parse_date(cell: &str) -> Option<NaiveDateTime> {
    let cell = cell.trim();
    if cell.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(cell) {
        return Some(dt.naive_local());
    }
    DATETIME_FORMATS
        .iter()
        .find_map(|f| NaiveDateTime::parse_from_str(cell, f).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|f| NaiveDate::parse_from_str(cell, f).ok())
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

/// Lenient numeric parsing; empty, NaN and infinite readings are `None`.
pub fn parse_value(cell: &str) -> Option<f64> {
    cell.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}
