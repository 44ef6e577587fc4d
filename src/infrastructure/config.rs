use crate::application::unit_normalizer::NormalizationPolicy;
use crate::domain::catalog::{RenameRule, default_renames};
use crate::domain::chart::ChartBackend;
use crate::domain::metrics::DEFAULT_DATE_COLUMN;
use crate::domain::window::TimeWindow;
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct DashboardConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub source: SourceSettings,
    #[serde(default)]
    pub charts: ChartSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct SourceSettings {
    #[serde(default = "default_source_path")]
    pub path: PathBuf,
    #[serde(default = "default_date_column")]
    pub date_column: String,
    /// Ordered list rather than a table: config keys are case-folded, and
    /// column names are not.
    #[serde(default = "default_renames")]
    pub renames: Vec<RenameRule>,
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            path: default_source_path(),
            date_column: default_date_column(),
            renames: default_renames(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ChartSettings {
    #[serde(default)]
    pub default_window: TimeWindow,
    #[serde(default)]
    pub normalization: NormalizationPolicy,
    #[serde(default)]
    pub backend: ChartBackend,
    #[serde(default = "default_interactive_asset")]
    pub interactive_asset: PathBuf,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            default_window: TimeWindow::default(),
            normalization: NormalizationPolicy::default(),
            backend: ChartBackend::default(),
            interactive_asset: default_interactive_asset(),
        }
    }
}

fn default_bind() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_source_path() -> PathBuf {
    PathBuf::from("Aggregate.csv")
}

fn default_date_column() -> String {
    DEFAULT_DATE_COLUMN.to_string()
}

fn default_interactive_asset() -> PathBuf {
    PathBuf::from("assets/plotly.min.js")
}

/// `config/dashboard.*` (optional) overridden by `DASHBOARD__SECTION__KEY`
/// environment variables.
pub fn load_dashboard_config() -> anyhow::Result<DashboardConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/dashboard").required(false))
        .add_source(
            config::Environment::with_prefix("DASHBOARD")
                .prefix_separator("__")
                .separator("__"),
        )
        .build()?;

    Ok(settings.try_deserialize()?)
}
