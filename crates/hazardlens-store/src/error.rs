use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("dataset file not found: {0}")]
    DatasetNotFound(std::path::PathBuf),

    #[error("unknown cluster: {0}")]
    UnknownCluster(String),

    #[error("unknown report: {0}")]
    UnknownReport(String),

    #[error("duplicate report id {id} in {scope}")]
    DuplicateReport { scope: String, id: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid dataset: {0}")]
    Json(#[from] serde_json::Error),

    #[error("arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),
}
