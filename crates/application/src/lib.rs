pub mod error;
pub mod items;
pub mod lists;

use std::sync::Arc;

use chrono::{DateTime, Utc};

pub use error::AppError;
pub use items::{TodoItemCommands, TodoItemDraft, TodoItemQueries};
pub use lists::{TodoListCommands, TodoListDraft, TodoListQueries, TodoListSummary};

/// Clock seam shared by the services so tests can pin time.
pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// Returns the wall-clock implementation used in production.
pub fn system_clock() -> Clock {
    Arc::new(Utc::now)
}
