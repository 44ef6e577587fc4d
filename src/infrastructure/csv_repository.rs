// CSV file repository implementation
use crate::application::metric_repository::{MetricRepository, SourceFingerprint};
use crate::domain::error::DashboardError;
use crate::domain::metrics::RawTable;
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct CsvMetricRepository {
    path: PathBuf,
}

impl CsvMetricRepository {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    fn missing_or_io(&self, err: std::io::Error) -> DashboardError {
        if err.kind() == ErrorKind::NotFound {
            DashboardError::SourceMissing(self.path.clone())
        } else {
            DashboardError::Io(err)
        }
    }

    /// Parse CSV bytes. Short or long rows are tolerated; the normalizer
    /// treats missing cells as nulls.
    pub fn parse(bytes: &[u8]) -> Result<RawTable, DashboardError> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::Headers)
            .from_reader(bytes);

        let headers = reader
            .headers()?
            .iter()
            .map(|h| h.trim_start_matches('\u{feff}').to_string())
            .collect();

        let mut records = Vec::new();
        for result in reader.records() {
            let record = result?;
            records.push(record.iter().map(str::to_string).collect());
        }

        Ok(RawTable::new(headers, records))
    }
}

#[async_trait]
impl MetricRepository for CsvMetricRepository {
    async fn fingerprint(&self) -> Result<SourceFingerprint, DashboardError> {
        let metadata = tokio::fs::metadata(&self.path)
            .await
            .map_err(|e| self.missing_or_io(e))?;

        Ok(SourceFingerprint {
            path: self.path.clone(),
            modified: metadata.modified().ok(),
            len: metadata.len(),
        })
    }

    async fn load_raw(&self) -> Result<RawTable, DashboardError> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|e| self.missing_or_io(e))?;

        let raw = Self::parse(&bytes)?;
        tracing::debug!(
            "Read {} rows x {} columns from {}",
            raw.records.len(),
            raw.headers.len(),
            self.path.display()
        );
        Ok(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn test_reads_headers_and_rows() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "\u{feff}DATE, 2G JAVA ,4G JAVA\n2025-01-01,0.9,0.8\n2025-01-02,,0.7\n").unwrap();

        let repo = CsvMetricRepository::new(file.path().to_path_buf());
        let raw = repo.load_raw().await.unwrap();

        assert_eq!(raw.headers, vec!["DATE", "2G JAVA", "4G JAVA"]);
        assert_eq!(raw.records.len(), 2);
        assert_eq!(raw.records[1], vec!["2025-01-02", "", "0.7"]);

        let fingerprint = repo.fingerprint().await.unwrap();
        assert_eq!(fingerprint.len, file.as_file().metadata().unwrap().len());
    }

    #[tokio::test]
    async fn test_missing_file_is_source_missing() {
        let dir = tempfile::tempdir().unwrap();
        let repo = CsvMetricRepository::new(dir.path().join("Aggregate.csv"));

        assert!(matches!(
            repo.fingerprint().await,
            Err(DashboardError::SourceMissing(_))
        ));
        assert!(matches!(
            repo.load_raw().await,
            Err(DashboardError::SourceMissing(_))
        ));
    }

    #[test]
    fn test_ragged_rows_are_kept() {
        let raw = CsvMetricRepository::parse(b"DATE,2G JAVA,4G JAVA\n2025-01-01\n").unwrap();
        assert_eq!(raw.records, vec![vec!["2025-01-01".to_string()]]);
    }
}
