use chrono::{DateTime, Utc};
use metrics::counter;
use tracing::info;

use todo_domain::{Description, TodoItem, TodoList};
use todo_storage::{Database, TodoListRepository};

use crate::error::AppError;
use crate::items::TodoItemDraft;
use crate::Clock;

/// Input for creating or rewriting a todo list.
#[derive(Debug, Clone, PartialEq)]
pub struct TodoListDraft {
    pub name: String,
    pub description: Option<String>,
}

/// Derived per-list statistics exposed by the read side.
#[derive(Debug, Clone, PartialEq)]
pub struct TodoListSummary {
    pub id: u64,
    pub name: String,
    pub archived: bool,
    pub total_items: usize,
    pub completed_items: usize,
    pub pending_items: usize,
    pub overdue_items: usize,
    pub completion_percentage: f64,
}

/// Write side of the list use cases.
#[derive(Clone)]
pub struct TodoListCommands {
    database: Database,
    clock: Clock,
}

impl TodoListCommands {
    pub fn new(database: Database, clock: Clock) -> Self {
        Self { database, clock }
    }

    fn now(&self) -> DateTime<Utc> {
        (self.clock)()
    }

    fn repository(&self) -> TodoListRepository {
        self.database.todo_lists()
    }

    pub async fn create(&self, draft: TodoListDraft) -> Result<TodoList, AppError> {
        let now = self.now();
        let description = Description::from_option(draft.description.as_deref())?;
        let list = TodoList::new(draft.name, description, now)?;
        let stored = self.repository().insert(list).await;

        counter!("todo_commands_total", "kind" => "list_create").increment(1);
        info!(stage = "application", list_id = stored.id(), "todo list created");
        Ok(stored)
    }

    pub async fn update(&self, id: u64, draft: TodoListDraft) -> Result<TodoList, AppError> {
        let now = self.now();
        let mut list = self.fetch(id).await?;
        let description = Description::from_option(draft.description.as_deref())?;
        list.update(draft.name, description, now)?;
        self.repository().update(list.clone()).await?;

        counter!("todo_commands_total", "kind" => "list_update").increment(1);
        Ok(list)
    }

    pub async fn delete(&self, id: u64) -> Result<(), AppError> {
        self.repository()
            .delete(id)
            .await
            .map_err(|_| AppError::ListNotFound(id))?;

        counter!("todo_commands_total", "kind" => "list_delete").increment(1);
        info!(stage = "application", list_id = id, "todo list deleted");
        Ok(())
    }

    pub async fn archive(&self, id: u64) -> Result<TodoList, AppError> {
        let now = self.now();
        let mut list = self.fetch(id).await?;
        list.archive(now);
        self.repository().update(list.clone()).await?;

        counter!("todo_commands_total", "kind" => "list_archive").increment(1);
        Ok(list)
    }

    pub async fn restore(&self, id: u64) -> Result<TodoList, AppError> {
        let now = self.now();
        let mut list = self.fetch(id).await?;
        list.restore(now);
        self.repository().update(list.clone()).await?;

        counter!("todo_commands_total", "kind" => "list_restore").increment(1);
        Ok(list)
    }

    /// Creates an item inside the list. The item draws its identifier from
    /// the shared item counter so ids stay unique across the store.
    pub async fn add_item(
        &self,
        list_id: u64,
        draft: TodoItemDraft,
    ) -> Result<TodoItem, AppError> {
        let uow = self.database.unit_of_work();
        uow.begin().await;
        match self.add_item_inner(list_id, draft).await {
            Ok(item) => {
                uow.commit().await;
                counter!("todo_commands_total", "kind" => "list_add_item").increment(1);
                Ok(item)
            }
            Err(err) => {
                uow.rollback().await;
                Err(err)
            }
        }
    }

    async fn add_item_inner(
        &self,
        list_id: u64,
        draft: TodoItemDraft,
    ) -> Result<TodoItem, AppError> {
        let now = self.now();
        let mut list = self.fetch(list_id).await?;
        let description = Description::from_option(draft.description.as_deref())?;
        let mut item = TodoItem::new(draft.title, description, draft.priority, draft.due_date, now)?;
        item.assign_id(self.database.todo_items().allocate_id().await);
        list.add_item(item.clone(), now)?;
        self.repository().update(list).await?;
        Ok(item)
    }

    /// Drops an item from the list.
    pub async fn remove_item(&self, list_id: u64, item_id: u64) -> Result<(), AppError> {
        let now = self.now();
        let mut list = self.fetch(list_id).await?;
        list.remove_item(item_id, now)
            .ok_or(AppError::ItemNotFound(item_id))?;
        self.repository().update(list).await?;

        counter!("todo_commands_total", "kind" => "list_remove_item").increment(1);
        Ok(())
    }

    async fn fetch(&self, id: u64) -> Result<TodoList, AppError> {
        self.repository()
            .get(id)
            .await
            .ok_or(AppError::ListNotFound(id))
    }
}

/// Read side of the list use cases.
#[derive(Clone)]
pub struct TodoListQueries {
    repository: TodoListRepository,
    clock: Clock,
}

impl TodoListQueries {
    pub fn new(database: &Database, clock: Clock) -> Self {
        Self {
            repository: database.todo_lists(),
            clock,
        }
    }

    pub async fn get(&self, id: u64) -> Option<TodoList> {
        self.repository.get(id).await
    }

    pub async fn list(&self) -> Vec<TodoList> {
        self.repository.list().await
    }

    /// Derived statistics for every list, computed against the current time.
    pub async fn summaries(&self) -> Vec<TodoListSummary> {
        let now = (self.clock)();
        self.repository
            .list()
            .await
            .iter()
            .map(|list| TodoListSummary {
                id: list.id(),
                name: list.name().to_string(),
                archived: list.is_archived(),
                total_items: list.total_items(),
                completed_items: list.completed_items(),
                pending_items: list.pending_items(),
                overdue_items: list.overdue_items(now),
                completion_percentage: list.completion_percentage(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use todo_domain::{DomainError, Priority};

    fn fixed_now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2024-06-01T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    fn fixed_clock() -> Clock {
        Arc::new(fixed_now)
    }

    fn list_draft(name: &str) -> TodoListDraft {
        TodoListDraft {
            name: name.to_string(),
            description: None,
        }
    }

    fn item_draft(title: &str) -> TodoItemDraft {
        TodoItemDraft {
            title: title.to_string(),
            description: None,
            priority: Priority::Medium,
            due_date: None,
        }
    }

    fn services() -> (TodoListCommands, TodoListQueries) {
        let database = Database::new();
        (
            TodoListCommands::new(database.clone(), fixed_clock()),
            TodoListQueries::new(&database, fixed_clock()),
        )
    }

    #[tokio::test]
    async fn create_and_fetch_round_trip() {
        let (commands, queries) = services();
        let list = commands.create(list_draft("Groceries")).await.unwrap();

        assert_eq!(list.id(), 1);
        assert_eq!(queries.get(1).await.unwrap().name(), "Groceries");
    }

    #[tokio::test]
    async fn create_rejects_invalid_names() {
        let (commands, _) = services();
        let err = commands.create(list_draft(" ")).await.unwrap_err();
        assert_eq!(err, AppError::Domain(DomainError::MissingListName));
    }

    #[tokio::test]
    async fn update_missing_list_is_not_found() {
        let (commands, _) = services();
        let err = commands.update(9, list_draft("anything")).await.unwrap_err();
        assert_eq!(err, AppError::ListNotFound(9));
    }

    #[tokio::test]
    async fn archive_blocks_new_items_until_restored() {
        let (commands, _) = services();
        let list = commands.create(list_draft("Chores")).await.unwrap();

        commands.archive(list.id()).await.unwrap();
        let err = commands
            .add_item(list.id(), item_draft("mow lawn"))
            .await
            .unwrap_err();
        assert_eq!(err, AppError::Domain(DomainError::ListArchived));

        commands.restore(list.id()).await.unwrap();
        commands
            .add_item(list.id(), item_draft("mow lawn"))
            .await
            .expect("restored list accepts items");
    }

    #[tokio::test]
    async fn added_items_get_unique_ids() {
        let (commands, queries) = services();
        let list = commands.create(list_draft("Chores")).await.unwrap();

        let first = commands
            .add_item(list.id(), item_draft("one"))
            .await
            .unwrap();
        let second = commands
            .add_item(list.id(), item_draft("two"))
            .await
            .unwrap();

        assert_ne!(first.id(), second.id());
        assert_eq!(queries.get(list.id()).await.unwrap().total_items(), 2);
    }

    #[tokio::test]
    async fn remove_item_reports_missing_entries() {
        let (commands, queries) = services();
        let list = commands.create(list_draft("Chores")).await.unwrap();
        let item = commands
            .add_item(list.id(), item_draft("one"))
            .await
            .unwrap();

        let err = commands.remove_item(list.id(), 999).await.unwrap_err();
        assert_eq!(err, AppError::ItemNotFound(999));

        commands
            .remove_item(list.id(), item.id())
            .await
            .expect("item exists");
        assert_eq!(queries.get(list.id()).await.unwrap().total_items(), 0);
    }

    #[tokio::test]
    async fn summaries_expose_derived_stats() {
        let (commands, queries) = services();
        let list = commands.create(list_draft("Stats")).await.unwrap();
        commands
            .add_item(list.id(), item_draft("open"))
            .await
            .unwrap();

        let summaries = queries.summaries().await;
        assert_eq!(summaries.len(), 1);
        let summary = &summaries[0];
        assert_eq!(summary.name, "Stats");
        assert_eq!(summary.total_items, 1);
        assert_eq!(summary.pending_items, 1);
        assert_eq!(summary.completed_items, 0);
        assert_eq!(summary.completion_percentage, 0.0);
    }

    #[tokio::test]
    async fn delete_removes_the_list() {
        let (commands, queries) = services();
        let list = commands.create(list_draft("Doomed")).await.unwrap();

        commands.delete(list.id()).await.expect("list exists");
        assert!(queries.get(list.id()).await.is_none());

        let err = commands.delete(list.id()).await.unwrap_err();
        assert_eq!(err, AppError::ListNotFound(list.id()));
    }
}
