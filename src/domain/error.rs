// Error taxonomy shared by every pipeline stage
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("data file {} not found", .0.display())]
    SourceMissing(PathBuf),
    #[error("column '{0}' is missing from the data file")]
    MissingDateColumn(String),
    #[error("failed to read data file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse data file: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to encode spreadsheet: {0}")]
    Export(#[from] rust_xlsxwriter::XlsxError),
    #[error("failed to render chart: {0}")]
    Render(String),
    #[error("unknown time window '{0}'")]
    UnknownWindow(String),
    #[error("no series configured for {0}")]
    UnknownSelector(String),
    #[error("unknown chart backend '{0}'")]
    UnknownBackend(String),
}

/// Coarse class of a [`DashboardError`], used by the presentation layer to
/// pick a status code and message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// The render cannot proceed at all (missing file, missing date column).
    FatalConfiguration,
    /// The request named something that does not exist.
    Client,
    Internal,
}

impl DashboardError {
    pub fn class(&self) -> ErrorClass {
        match self {
            DashboardError::SourceMissing(_) | DashboardError::MissingDateColumn(_) => {
                ErrorClass::FatalConfiguration
            }
            DashboardError::UnknownWindow(_)
            | DashboardError::UnknownSelector(_)
            | DashboardError::UnknownBackend(_) => ErrorClass::Client,
            DashboardError::Io(_)
            | DashboardError::Csv(_)
            | DashboardError::Export(_)
            | DashboardError::Render(_) => ErrorClass::Internal,
        }
    }
}
