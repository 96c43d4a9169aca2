use chrono::{DateTime, Utc};
use metrics::counter;
use tracing::info;

use todo_domain::{Description, DomainError, Priority, TodoItem};
use todo_storage::{Database, TodoItemRepository};

use crate::error::AppError;
use crate::Clock;

/// Input for creating or rewriting a todo item.
#[derive(Debug, Clone, PartialEq)]
pub struct TodoItemDraft {
    pub title: String,
    pub description: Option<String>,
    pub priority: Priority,
    pub due_date: Option<DateTime<Utc>>,
}

/// Write side of the item use cases.
#[derive(Clone)]
pub struct TodoItemCommands {
    repository: TodoItemRepository,
    clock: Clock,
}

impl TodoItemCommands {
    pub fn new(database: &Database, clock: Clock) -> Self {
        Self {
            repository: database.todo_items(),
            clock,
        }
    }

    fn now(&self) -> DateTime<Utc> {
        (self.clock)()
    }

    /// Validates and stores a new item.
    pub async fn create(&self, draft: TodoItemDraft) -> Result<TodoItem, AppError> {
        let now = self.now();
        let description = Description::from_option(draft.description.as_deref())?;
        let item = TodoItem::new(draft.title, description, draft.priority, draft.due_date, now)?;
        let stored = self.repository.insert(item).await;

        counter!("todo_commands_total", "kind" => "item_create").increment(1);
        info!(stage = "application", item_id = stored.id(), "todo item created");
        Ok(stored)
    }

    /// Rewrites the editable fields of an existing item.
    pub async fn update(&self, id: u64, draft: TodoItemDraft) -> Result<TodoItem, AppError> {
        let now = self.now();
        let mut item = self
            .repository
            .get(id)
            .await
            .ok_or(AppError::ItemNotFound(id))?;
        let description = Description::from_option(draft.description.as_deref())?;
        item.update(draft.title, description, draft.priority, draft.due_date, now)?;
        self.repository.update(item.clone()).await?;

        counter!("todo_commands_total", "kind" => "item_update").increment(1);
        Ok(item)
    }

    /// Removes an item.
    pub async fn delete(&self, id: u64) -> Result<(), AppError> {
        self.repository
            .delete(id)
            .await
            .map_err(|_| AppError::ItemNotFound(id))?;

        counter!("todo_commands_total", "kind" => "item_delete").increment(1);
        info!(stage = "application", item_id = id, "todo item deleted");
        Ok(())
    }

    pub async fn start(&self, id: u64) -> Result<TodoItem, AppError> {
        self.modify(id, "item_start", TodoItem::start).await
    }

    pub async fn complete(&self, id: u64) -> Result<TodoItem, AppError> {
        self.modify(id, "item_complete", TodoItem::complete).await
    }

    pub async fn cancel(&self, id: u64) -> Result<TodoItem, AppError> {
        self.modify(id, "item_cancel", TodoItem::cancel).await
    }

    pub async fn reopen(&self, id: u64) -> Result<TodoItem, AppError> {
        self.modify(id, "item_reopen", TodoItem::reopen).await
    }

    pub async fn set_priority(&self, id: u64, priority: Priority) -> Result<TodoItem, AppError> {
        self.modify(id, "item_priority", move |item, now| {
            item.set_priority(priority, now)
        })
        .await
    }

    pub async fn extend_due_date(
        &self,
        id: u64,
        new_due_date: DateTime<Utc>,
    ) -> Result<TodoItem, AppError> {
        self.modify(id, "item_due_date", move |item, now| {
            item.extend_due_date(new_due_date, now)
        })
        .await
    }

    async fn modify<F>(&self, id: u64, kind: &'static str, apply: F) -> Result<TodoItem, AppError>
    where
        F: FnOnce(&mut TodoItem, DateTime<Utc>) -> Result<(), DomainError>,
    {
        let now = self.now();
        let mut item = self
            .repository
            .get(id)
            .await
            .ok_or(AppError::ItemNotFound(id))?;
        apply(&mut item, now)?;
        self.repository.update(item.clone()).await?;

        counter!("todo_commands_total", "kind" => kind).increment(1);
        Ok(item)
    }
}

/// Read side of the item use cases.
#[derive(Clone)]
pub struct TodoItemQueries {
    repository: TodoItemRepository,
}

impl TodoItemQueries {
    pub fn new(database: &Database) -> Self {
        Self {
            repository: database.todo_items(),
        }
    }

    pub async fn get(&self, id: u64) -> Option<TodoItem> {
        self.repository.get(id).await
    }

    pub async fn list(&self) -> Vec<TodoItem> {
        self.repository.list().await
    }
}
