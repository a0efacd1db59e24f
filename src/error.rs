use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashboardError {
    /// Backing dataset missing or unparsable. Cached for the process lifetime.
    #[error("Data unavailable: {0}")]
    DataUnavailable(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl DashboardError {
    pub fn is_data_unavailable(&self) -> bool {
        matches!(self, DashboardError::DataUnavailable(_))
    }
}

pub type Result<T> = std::result::Result<T, DashboardError>;
