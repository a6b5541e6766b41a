use thiserror::Error;

/// Failures at the file and request boundaries. The scheduler itself never fails.
#[derive(Debug, Error)]
pub enum PlannerError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    #[error("{0}")]
    Validation(String),
}

pub type Result<T> = std::result::Result<T, PlannerError>;
