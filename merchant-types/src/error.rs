//! Error types for the merchant overview service.

/// Why a stored fee config could not be used.
///
/// Never surfaced to API callers: the pricing core logs it and treats the
/// config as absent.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Malformed JSON: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Expected a JSON object, found {found}")]
    NotAnObject { found: &'static str },
}

/// Repository-level errors (data access failures).
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Row decode error: {0}")]
    Decode(String),

    #[error("Entity not found")]
    NotFound,
}

/// Application-level errors (for HTTP responses).
///
/// Maps cleanly to HTTP status codes.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound => AppError::NotFound("Resource not found".into()),
            RepoError::Database(e) => AppError::Internal(e),
            RepoError::Decode(e) => AppError::Internal(e),
        }
    }
}
