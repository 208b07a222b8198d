use thiserror::Error;

/// Error type that captures common document-store failures.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("{doctype} `{name}` not found")]
    NotFound { doctype: &'static str, name: String },
    #[error("Cheque number `{0}` already exists")]
    Duplicate(String),
    #[error("Missing required field: {0}")]
    Required(&'static str),
}
