use std::sync::Arc;

use chrono::{DateTime, Utc};
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::debug;

use todo_domain::{Description, DomainError, TodoItem, TodoList};

/// Top-level database handle that owns the shared in-memory state.
///
/// Persistence is a pair of plain entity lists behind one lock; identifiers
/// are assigned from owned counters when an entity is inserted.
#[derive(Clone, Default)]
pub struct Database {
    inner: Arc<RwLock<Store>>,
}

#[derive(Default)]
struct Store {
    items: Vec<TodoItem>,
    lists: Vec<TodoList>,
    next_item_id: u64,
    next_list_id: u64,
}

impl Store {
    fn allocate_item_id(&mut self) -> u64 {
        self.next_item_id += 1;
        self.next_item_id
    }

    fn allocate_list_id(&mut self) -> u64 {
        self.next_list_id += 1;
        self.next_list_id
    }
}

impl Database {
    /// Creates an empty database.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a handle to operate on todo items.
    pub fn todo_items(&self) -> TodoItemRepository {
        TodoItemRepository {
            inner: self.inner.clone(),
        }
    }

    /// Returns a handle to operate on todo lists.
    pub fn todo_lists(&self) -> TodoListRepository {
        TodoListRepository {
            inner: self.inner.clone(),
        }
    }

    /// Returns the transaction boundary wrapper.
    pub fn unit_of_work(&self) -> UnitOfWork {
        UnitOfWork
    }

    /// Inserts the starter lists shipped with the demo environment.
    pub async fn seed_demo_data(&self, now: DateTime<Utc>) -> Result<(), DomainError> {
        let lists = self.todo_lists();
        lists
            .insert(TodoList::new(
                "Personal Tasks",
                Description::new("My personal todo items")?,
                now,
            )?)
            .await;
        lists
            .insert(TodoList::new(
                "Work Tasks",
                Description::new("Work-related todo items")?,
                now,
            )?)
            .await;
        Ok(())
    }
}

/// Errors surfaced by the repositories.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: u64 },
}

impl StorageError {
    fn missing_item(id: u64) -> Self {
        Self::NotFound {
            entity: "todo item",
            id,
        }
    }

    fn missing_list(id: u64) -> Self {
        Self::NotFound {
            entity: "todo list",
            id,
        }
    }
}

/// Repository for standalone todo items.
#[derive(Clone)]
pub struct TodoItemRepository {
    inner: Arc<RwLock<Store>>,
}

impl TodoItemRepository {
    /// Fetches an item by id.
    pub async fn get(&self, id: u64) -> Option<TodoItem> {
        let store = self.inner.read().await;
        store.items.iter().find(|item| item.id() == id).cloned()
    }

    /// Lists every stored item.
    pub async fn list(&self) -> Vec<TodoItem> {
        self.inner.read().await.items.clone()
    }

    /// Inserts an item, assigning the next identifier.
    pub async fn insert(&self, mut item: TodoItem) -> TodoItem {
        let mut store = self.inner.write().await;
        let id = store.allocate_item_id();
        item.assign_id(id);
        store.items.push(item.clone());
        item
    }

    /// Replaces the stored item with the same id.
    pub async fn update(&self, item: TodoItem) -> Result<(), StorageError> {
        let mut store = self.inner.write().await;
        let slot = store
            .items
            .iter_mut()
            .find(|stored| stored.id() == item.id())
            .ok_or_else(|| StorageError::missing_item(item.id()))?;
        *slot = item;
        Ok(())
    }

    /// Removes and returns the item with the given id.
    pub async fn delete(&self, id: u64) -> Result<TodoItem, StorageError> {
        let mut store = self.inner.write().await;
        let position = store
            .items
            .iter()
            .position(|item| item.id() == id)
            .ok_or_else(|| StorageError::missing_item(id))?;
        Ok(store.items.remove(position))
    }

    /// Hands out an identifier without storing anything. Used for items
    /// that live inside a list aggregate rather than the item table.
    pub async fn allocate_id(&self) -> u64 {
        self.inner.write().await.allocate_item_id()
    }
}

/// Repository for todo lists.
#[derive(Clone)]
pub struct TodoListRepository {
    inner: Arc<RwLock<Store>>,
}

impl TodoListRepository {
    pub async fn get(&self, id: u64) -> Option<TodoList> {
        let store = self.inner.read().await;
        store.lists.iter().find(|list| list.id() == id).cloned()
    }

    pub async fn list(&self) -> Vec<TodoList> {
        self.inner.read().await.lists.clone()
    }

    pub async fn insert(&self, mut list: TodoList) -> TodoList {
        let mut store = self.inner.write().await;
        let id = store.allocate_list_id();
        list.assign_id(id);
        store.lists.push(list.clone());
        list
    }

    pub async fn update(&self, list: TodoList) -> Result<(), StorageError> {
        let mut store = self.inner.write().await;
        let slot = store
            .lists
            .iter_mut()
            .find(|stored| stored.id() == list.id())
            .ok_or_else(|| StorageError::missing_list(list.id()))?;
        *slot = list;
        Ok(())
    }

    pub async fn delete(&self, id: u64) -> Result<TodoList, StorageError> {
        let mut store = self.inner.write().await;
        let position = store
            .lists
            .iter()
            .position(|list| list.id() == id)
            .ok_or_else(|| StorageError::missing_list(id))?;
        Ok(store.lists.remove(position))
    }
}

/// Transaction boundary over the in-memory store.
///
/// In-memory mutations are applied immediately, so every method is a
/// logged pass-through. The type exists to keep the call sites honest for
/// a later durable backend.
#[derive(Debug, Clone, Copy)]
pub struct UnitOfWork;

impl UnitOfWork {
    pub async fn begin(&self) {
        debug!(stage = "storage", "begin unit of work");
    }

    pub async fn commit(&self) {
        debug!(stage = "storage", "commit unit of work");
    }

    pub async fn rollback(&self) {
        debug!(stage = "storage", "rollback unit of work");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use todo_domain::Priority;

    fn fixed_now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2024-06-01T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    fn item(title: &str) -> TodoItem {
        TodoItem::new(
            title,
            Description::default(),
            Priority::Medium,
            None,
            fixed_now(),
        )
        .expect("valid item")
    }

    #[tokio::test]
    async fn insert_assigns_sequential_ids() {
        let db = Database::new();
        let repo = db.todo_items();

        let first = repo.insert(item("first")).await;
        let second = repo.insert(item("second")).await;

        assert_eq!(first.id(), 1);
        assert_eq!(second.id(), 2);
        assert_eq!(repo.list().await.len(), 2);
    }

    #[tokio::test]
    async fn get_returns_stored_copy() {
        let db = Database::new();
        let repo = db.todo_items();
        let stored = repo.insert(item("fetch me")).await;

        let fetched = repo.get(stored.id()).await.expect("item exists");
        assert_eq!(fetched, stored);
        assert!(repo.get(999).await.is_none());
    }

    #[tokio::test]
    async fn update_replaces_by_id() {
        let db = Database::new();
        let repo = db.todo_items();
        let mut stored = repo.insert(item("before")).await;

        stored
            .update(
                "after",
                Description::default(),
                Priority::High,
                None,
                fixed_now(),
            )
            .unwrap();
        repo.update(stored.clone()).await.expect("item exists");

        let fetched = repo.get(stored.id()).await.unwrap();
        assert_eq!(fetched.title(), "after");
    }

    #[tokio::test]
    async fn update_missing_item_errors() {
        let db = Database::new();
        let repo = db.todo_items();
        let mut ghost = item("ghost");
        ghost.assign_id(42);

        let err = repo.update(ghost).await.unwrap_err();
        assert_eq!(err, StorageError::missing_item(42));
    }

    #[tokio::test]
    async fn delete_removes_and_returns() {
        let db = Database::new();
        let repo = db.todo_items();
        let stored = repo.insert(item("to delete")).await;

        let removed = repo.delete(stored.id()).await.expect("item exists");
        assert_eq!(removed.id(), stored.id());
        assert!(repo.list().await.is_empty());

        let err = repo.delete(stored.id()).await.unwrap_err();
        assert!(matches!(err, StorageError::NotFound { .. }));
    }

    #[tokio::test]
    async fn deleted_ids_are_not_reused() {
        let db = Database::new();
        let repo = db.todo_items();
        let first = repo.insert(item("one")).await;
        repo.delete(first.id()).await.unwrap();

        let second = repo.insert(item("two")).await;
        assert_eq!(second.id(), 2);
    }

    #[tokio::test]
    async fn list_repository_round_trip() {
        let db = Database::new();
        let repo = db.todo_lists();

        let list = TodoList::new("Groceries", Description::default(), fixed_now()).unwrap();
        let stored = repo.insert(list).await;
        assert_eq!(stored.id(), 1);

        let mut fetched = repo.get(stored.id()).await.expect("list exists");
        fetched.archive(fixed_now());
        repo.update(fetched).await.unwrap();

        assert!(repo.get(stored.id()).await.unwrap().is_archived());

        repo.delete(stored.id()).await.unwrap();
        assert!(repo.list().await.is_empty());
    }

    #[tokio::test]
    async fn item_and_list_counters_are_independent() {
        let db = Database::new();
        db.todo_items().insert(item("solo")).await;
        let list = TodoList::new("Lists", Description::default(), fixed_now()).unwrap();
        let stored = db.todo_lists().insert(list).await;
        assert_eq!(stored.id(), 1);
    }

    #[tokio::test]
    async fn seed_demo_data_creates_starter_lists() {
        let db = Database::new();
        db.seed_demo_data(fixed_now()).await.expect("seed succeeds");

        let lists = db.todo_lists().list().await;
        let names: Vec<_> = lists.iter().map(|list| list.name()).collect();
        assert_eq!(names, ["Personal Tasks", "Work Tasks"]);
    }
}
