// Export encoders for the filtered table (CSV text and XLSX workbook)
use crate::domain::error::DashboardError;
use crate::domain::metrics::{MetricRow, MetricTable};
use chrono::{Datelike, NaiveDateTime, Timelike};
use rust_xlsxwriter::{ExcelDateTime, Format, Workbook};

pub const CSV_FILE_NAME: &str = "dashboard_filtered.csv";
pub const CSV_CONTENT_TYPE: &str = "text/csv";
pub const XLSX_FILE_NAME: &str = "dashboard_filtered.xlsx";
pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

const SHEET_NAME: &str = "dashboard_filtered";

/// One exported cell, in source column order.
enum Cell<'a> {
    Date(Option<&'a NaiveDateTime>),
    Value(Option<f64>),
}

fn cells<'a>(table: &MetricTable, row: &'a MetricRow) -> Vec<Cell<'a>> {
    let mut cells: Vec<Cell<'a>> = row.values.iter().map(|v| Cell::Value(*v)).collect();
    let position = table.date_position.min(cells.len());
    cells.insert(position, Cell::Date(row.date.as_ref()));
    cells
}

fn format_date(date: &NaiveDateTime) -> String {
    if date.time() == chrono::NaiveTime::MIN {
        date.format("%Y-%m-%d").to_string()
    } else {
        date.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}

/// Delimited text with a header line; nulls are empty fields.
pub fn encode_csv(table: &MetricTable) -> Result<Vec<u8>, DashboardError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(table.column_order())?;

    for row in &table.rows {
        let record: Vec<String> = cells(table, row)
            .into_iter()
            .map(|cell| match cell {
                Cell::Date(date) => date.map(format_date).unwrap_or_default(),
                Cell::Value(value) => value.map(|v| v.to_string()).unwrap_or_default(),
            })
            .collect();
        writer.write_record(&record)?;
    }

    writer
        .into_inner()
        .map_err(|e| DashboardError::Io(e.into_error()))
}

/// Single-sheet workbook: header in row 0, one row per table row. Nulls are
/// left blank.
pub fn encode_xlsx(table: &MetricTable) -> Result<Vec<u8>, DashboardError> {
    let mut workbook = Workbook::new();
    let date_format = Format::new().set_num_format("yyyy-mm-dd hh:mm:ss");
    let header_format = Format::new().set_bold();

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    for (col, name) in table.column_order().into_iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, name, &header_format)?;
    }

    for (i, row) in table.rows.iter().enumerate() {
        let excel_row = (i + 1) as u32;
        for (col, cell) in cells(table, row).into_iter().enumerate() {
            let col = col as u16;
            match cell {
                Cell::Date(Some(date)) => match to_excel_datetime(date) {
                    Some(datetime) => {
                        worksheet.write_datetime_with_format(excel_row, col, &datetime, &date_format)?;
                    }
                    None => {
                        worksheet.write_string(excel_row, col, format_date(date))?;
                    }
                },
                Cell::Value(Some(value)) => {
                    worksheet.write_number(excel_row, col, value)?;
                }
                Cell::Date(None) | Cell::Value(None) => {}
            }
        }
    }

    Ok(workbook.save_to_buffer()?)
}

/// `None` outside Excel's 1900-9999 date range; such dates are written as text.
fn to_excel_datetime(date: &NaiveDateTime) -> Option<ExcelDateTime> {
    let year = u16::try_from(date.year()).ok()?;
    ExcelDateTime::from_ymd(year, date.month() as u8, date.day() as u8)
        .and_then(|d| d.and_hms(date.hour() as u16, date.minute() as u8, date.second() as f64))
        .ok()
}
