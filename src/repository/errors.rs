use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Entity not found")]
    NotFound,

    #[error("Unknown resource path: {0}")]
    UnknownPath(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

impl From<crate::domain::types::TypeConstraintError> for RepositoryError {
    fn from(err: crate::domain::types::TypeConstraintError) -> Self {
        RepositoryError::ValidationError(err.to_string())
    }
}

impl<T> From<std::sync::PoisonError<T>> for RepositoryError {
    fn from(err: std::sync::PoisonError<T>) -> Self {
        RepositoryError::Unexpected(format!("Cache lock poisoned: {err}"))
    }
}
