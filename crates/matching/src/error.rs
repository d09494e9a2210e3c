use thiserror::Error;

pub type MatchingResult<T> = Result<T, MatchingError>;

/// Errors raised while loading the embedded matching data.
///
/// Matching itself never fails: missing data is reported as `None`.
#[derive(Error, Debug)]
pub enum MatchingError {
    #[error("Missing data file: {0}")]
    MissingData(String),

    #[error("Invalid taxonomy at {path}: {reason}")]
    InvalidTaxonomy { path: String, reason: String },

    #[error("Invalid shelf life table at {path}: {reason}")]
    InvalidShelfLife { path: String, reason: String },

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failure reported by a persistent store collaborator
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Store unavailable: {0}")]
    Unavailable(#[source] anyhow::Error),

    #[error("Invalid record: {0}")]
    InvalidRecord(String),
}

impl From<anyhow::Error> for StoreError {
    fn from(err: anyhow::Error) -> Self {
        StoreError::Unavailable(err)
    }
}
