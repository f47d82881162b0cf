use thiserror::Error;

/// Errors raised while building or evaluating a FEDVR basis.
#[derive(Debug, Error)]
pub enum FedvrError {
    /// Breakpoints, order or boundary tags do not describe a valid grid.
    #[error("configuration error: {0}")]
    Configuration(String),
    /// Sample sequence violates the evaluation preconditions.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Csv(#[from] csv::Error),
}
