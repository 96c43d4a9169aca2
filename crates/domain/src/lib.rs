pub mod description;
pub mod error;
pub mod event;
pub mod item;
pub mod list;

pub use description::Description;
pub use error::DomainError;
pub use event::DomainEvent;
pub use item::{Priority, TodoItem, TodoItemStatus};
pub use list::TodoList;
