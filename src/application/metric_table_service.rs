// Metric table service - Load, normalize and cache the availability table
use crate::application::metric_repository::{MetricRepository, SourceFingerprint};
use crate::application::schema_normalizer::normalize;
use crate::application::window_filter::filter_window;
use crate::domain::catalog::RenameRule;
use crate::domain::error::DashboardError;
use crate::domain::metrics::MetricTable;
use crate::domain::window::TimeWindow;
use std::sync::Arc;
use tokio::sync::RwLock;

// Window and selector choices are deliberately absent: normalization does
// not depend on them.
#[derive(Debug, Clone, PartialEq)]
struct CacheKey {
    source: SourceFingerprint,
    renames: Vec<RenameRule>,
    date_column: String,
}

struct CachedTable {
    key: CacheKey,
    table: Arc<MetricTable>,
}

#[derive(Clone)]
pub struct MetricTableService {
    repository: Arc<dyn MetricRepository>,
    renames: Vec<RenameRule>,
    date_column: String,
    cache: Arc<RwLock<Option<CachedTable>>>,
}

impl MetricTableService {
    pub fn new(
        repository: Arc<dyn MetricRepository>,
        renames: Vec<RenameRule>,
        date_column: String,
    ) -> Self {
        Self {
            repository,
            renames,
            date_column,
            cache: Arc::new(RwLock::new(None)),
        }
    }

    /// Normalized table for the current source contents.
    pub async fn normalized_table(&self) -> Result<Arc<MetricTable>, DashboardError> {
        let key = CacheKey {
            source: self.repository.fingerprint().await?,
            renames: self.renames.clone(),
            date_column: self.date_column.clone(),
        };

        if let Some(cached) = self.cache.read().await.as_ref() {
            if cached.key == key {
                return Ok(cached.table.clone());
            }
        }

        tracing::info!("Loading {}", key.source.path.display());
        let raw = self.repository.load_raw().await?;
        let table = Arc::new(normalize(&raw, &self.renames, &self.date_column)?);

        *self.cache.write().await = Some(CachedTable {
            key,
            table: table.clone(),
        });
        Ok(table)
    }

    /// Normalized table restricted to `window`, plus the unfiltered latest date.
    pub async fn windowed_table(
        &self,
        window: TimeWindow,
    ) -> Result<(Option<chrono::NaiveDate>, MetricTable), DashboardError> {
        let table = self.normalized_table().await?;
        let latest = table.max_date().map(|d| d.date());
        Ok((latest, filter_window(&table, window)))
    }
}
