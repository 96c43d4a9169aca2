use thiserror::Error;

use crate::item::TodoItemStatus;

/// Validation and state-transition failures raised by the domain entities.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("todo item must have a title")]
    MissingTitle,
    #[error("due date cannot be in the past")]
    DueDateInPast,
    #[error("critical priority items cannot have due dates more than 30 days out")]
    CriticalDueDateTooFar,
    #[error("extended due date must be later than the current due date")]
    DueDateNotExtended,
    #[error("description cannot exceed 1000 characters")]
    DescriptionTooLong,
    #[error("todo item is already completed")]
    AlreadyCompleted,
    #[error("todo item is not completed")]
    NotCompleted,
    #[error("todo item cannot move from {from} to {to}")]
    InvalidTransition {
        from: TodoItemStatus,
        to: TodoItemStatus,
    },
    #[error("todo list name cannot be empty")]
    MissingListName,
    #[error("todo list name cannot exceed 100 characters")]
    ListNameTooLong,
    #[error("cannot add items to an archived list")]
    ListArchived,
}
