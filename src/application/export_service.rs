// Export service - Use case for downloading the filtered table
use crate::application::metric_table_service::MetricTableService;
use crate::domain::error::DashboardError;
use crate::domain::window::TimeWindow;
use crate::infrastructure::export_encoder::{encode_csv, encode_xlsx};

/// Encoded download plus the fixed name and MIME type it is served with.
#[derive(Debug, Clone)]
pub struct ExportFile {
    pub bytes: Vec<u8>,
    pub file_name: &'static str,
    pub content_type: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Xlsx,
}

#[derive(Clone)]
pub struct ExportService {
    tables: MetricTableService,
}

impl ExportService {
    pub fn new(tables: MetricTableService) -> Self {
        Self { tables }
    }

    /// Encode the window-filtered table (not the reshaped chart data).
    pub async fn export(
        &self,
        format: ExportFormat,
        window: TimeWindow,
    ) -> Result<ExportFile, DashboardError> {
        use crate::infrastructure::export_encoder::{
            CSV_CONTENT_TYPE, CSV_FILE_NAME, XLSX_CONTENT_TYPE, XLSX_FILE_NAME,
        };

        let (_, filtered) = self.tables.windowed_table(window).await?;
        let file = match format {
            ExportFormat::Csv => ExportFile {
                bytes: encode_csv(&filtered)?,
                file_name: CSV_FILE_NAME,
                content_type: CSV_CONTENT_TYPE,
            },
            ExportFormat::Xlsx => ExportFile {
                bytes: encode_xlsx(&filtered)?,
                file_name: XLSX_FILE_NAME,
                content_type: XLSX_CONTENT_TYPE,
            },
        };

        tracing::info!(
            "Exported {} rows as {} ({} bytes)",
            filtered.len(),
            file.file_name,
            file.bytes.len()
        );
        Ok(file)
    }
}
