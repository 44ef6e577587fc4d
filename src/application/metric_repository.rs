// Repository trait for availability data access
use crate::domain::error::DashboardError;
use crate::domain::metrics::RawTable;
use async_trait::async_trait;
use std::path::PathBuf;
use std::time::SystemTime;

/// Identity of the data behind a repository; changes whenever the file does.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourceFingerprint {
    pub path: PathBuf,
    pub modified: Option<SystemTime>,
    pub len: u64,
}

#[async_trait]
pub trait MetricRepository: Send + Sync {
    /// Current identity of the source, without reading its contents.
    /// A missing source is reported as [`DashboardError::SourceMissing`].
    async fn fingerprint(&self) -> Result<SourceFingerprint, DashboardError>;

    /// Read the whole source as untyped rows.
    async fn load_raw(&self) -> Result<RawTable, DashboardError>;
}
