use thiserror::Error;

use todo_domain::DomainError;
use todo_storage::StorageError;

/// Failures surfaced by the application services.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AppError {
    #[error("todo item with id {0} not found")]
    ItemNotFound(u64),
    #[error("todo list with id {0} not found")]
    ListNotFound(u64),
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}
