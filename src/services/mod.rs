use thiserror::Error;

use crate::repository::errors::RepositoryError;

pub mod api;
pub mod dashboard;
pub mod users;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),

    #[error("internal error")]
    Internal,
}

pub type ServiceResult<T> = Result<T, ServiceError>;
