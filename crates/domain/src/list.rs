use chrono::{DateTime, Utc};

use crate::description::Description;
use crate::error::DomainError;
use crate::event::DomainEvent;
use crate::item::TodoItem;

/// Maximum length accepted for a list name, in characters.
pub const MAX_LIST_NAME_CHARS: usize = 100;

/// A named collection of todo items. The aggregate owns its items.
#[derive(Debug, Clone, PartialEq)]
pub struct TodoList {
    id: u64,
    name: String,
    description: Description,
    archived: bool,
    items: Vec<TodoItem>,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
    events: Vec<DomainEvent>,
}

impl TodoList {
    pub fn new(
        name: impl Into<String>,
        description: Description,
        now: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        let name = name.into();
        validate_name(&name)?;

        let mut list = Self {
            id: 0,
            name: name.clone(),
            description,
            archived: false,
            items: Vec::new(),
            created_at: now,
            updated_at: None,
            events: Vec::new(),
        };
        list.record(DomainEvent::ListCreated {
            list_id: list.id,
            name,
            occurred_at: now,
        });
        Ok(list)
    }

    pub fn update(
        &mut self,
        name: impl Into<String>,
        description: Description,
        now: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        let name = name.into();
        validate_name(&name)?;

        self.name = name.clone();
        self.description = description;
        self.touch(now);
        self.record(DomainEvent::ListUpdated {
            list_id: self.id,
            name,
            occurred_at: now,
        });
        Ok(())
    }

    pub fn archive(&mut self, now: DateTime<Utc>) {
        self.archived = true;
        self.touch(now);
        self.record(DomainEvent::ListArchived {
            list_id: self.id,
            name: self.name.clone(),
            occurred_at: now,
        });
    }

    pub fn restore(&mut self, now: DateTime<Utc>) {
        self.archived = false;
        self.touch(now);
        self.record(DomainEvent::ListRestored {
            list_id: self.id,
            name: self.name.clone(),
            occurred_at: now,
        });
    }

    /// Adds an item to the list. Archived lists are read-only.
    pub fn add_item(&mut self, item: TodoItem, now: DateTime<Utc>) -> Result<(), DomainError> {
        if self.archived {
            return Err(DomainError::ListArchived);
        }
        self.items.push(item);
        self.touch(now);
        Ok(())
    }

    /// Removes and returns the item with the given id, if present.
    pub fn remove_item(&mut self, item_id: u64, now: DateTime<Utc>) -> Option<TodoItem> {
        let position = self.items.iter().position(|item| item.id() == item_id)?;
        let removed = self.items.remove(position);
        self.touch(now);
        Some(removed)
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    /// Identifier assignment is owned by the persistence layer.
    pub fn assign_id(&mut self, id: u64) {
        self.id = id;
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &Description {
        &self.description
    }

    pub fn is_archived(&self) -> bool {
        self.archived
    }

    pub fn items(&self) -> &[TodoItem] {
        &self.items
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    pub fn total_items(&self) -> usize {
        self.items.len()
    }

    pub fn completed_items(&self) -> usize {
        self.items.iter().filter(|item| item.is_completed()).count()
    }

    /// Items that are neither completed nor cancelled.
    pub fn pending_items(&self) -> usize {
        self.items
            .iter()
            .filter(|item| !item.is_completed() && !item.is_cancelled())
            .count()
    }

    pub fn overdue_items(&self, now: DateTime<Utc>) -> usize {
        self.items.iter().filter(|item| item.is_overdue(now)).count()
    }

    /// Completed share in percent; empty lists report zero.
    pub fn completion_percentage(&self) -> f64 {
        if self.items.is_empty() {
            return 0.0;
        }
        self.completed_items() as f64 / self.items.len() as f64 * 100.0
    }

    /// Events recorded since the last drain.
    pub fn events(&self) -> &[DomainEvent] {
        &self.events
    }

    /// Drains the recorded events.
    pub fn take_events(&mut self) -> Vec<DomainEvent> {
        std::mem::take(&mut self.events)
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = Some(now);
    }

    fn record(&mut self, event: DomainEvent) {
        self.events.push(event);
    }
}

fn validate_name(name: &str) -> Result<(), DomainError> {
    if name.trim().is_empty() {
        return Err(DomainError::MissingListName);
    }
    if name.chars().count() > MAX_LIST_NAME_CHARS {
        return Err(DomainError::ListNameTooLong);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::Priority;
    use chrono::Duration;

    fn fixed_now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2024-06-01T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    fn list(name: &str) -> TodoList {
        TodoList::new(name, Description::default(), fixed_now()).expect("valid list")
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

    #[test]
    fn creation_records_an_event() {
        let list = list("Personal Tasks");
        assert_eq!(list.name(), "Personal Tasks");
        assert!(!list.is_archived());
        assert_eq!(list.events().len(), 1);
        assert_eq!(list.events()[0].event_type(), "list.created");
    }

    #[test]
    fn rejects_blank_names() {
        let err = TodoList::new("   ", Description::default(), fixed_now()).unwrap_err();
        assert_eq!(err, DomainError::MissingListName);
    }

    #[test]
    fn rejects_overlong_names() {
        let name = "x".repeat(MAX_LIST_NAME_CHARS + 1);
        let err = TodoList::new(name, Description::default(), fixed_now()).unwrap_err();
        assert_eq!(err, DomainError::ListNameTooLong);
    }

    #[test]
    fn update_validates_and_records() {
        let mut list = list("Before");
        list.update("After", Description::new("notes").unwrap(), fixed_now())
            .expect("valid update");
        assert_eq!(list.name(), "After");
        assert_eq!(list.updated_at(), Some(fixed_now()));
        assert_eq!(list.events().last().unwrap().event_type(), "list.updated");

        let err = list
            .update("", Description::default(), fixed_now())
            .unwrap_err();
        assert_eq!(err, DomainError::MissingListName);
    }

    #[test]
    fn archive_and_restore_toggle_the_flag() {
        let mut list = list("Work Tasks");
        list.archive(fixed_now());
        assert!(list.is_archived());
        list.restore(fixed_now());
        assert!(!list.is_archived());

        let types: Vec<_> = list.events().iter().map(|e| e.event_type()).collect();
        assert_eq!(types, ["list.created", "list.archived", "list.restored"]);
    }

    #[test]
    fn archived_lists_reject_new_items() {
        let mut list = list("Work Tasks");
        list.archive(fixed_now());
        let err = list.add_item(item("task"), fixed_now()).unwrap_err();
        assert_eq!(err, DomainError::ListArchived);
    }

    #[test]
    fn remove_item_returns_the_entity() {
        let mut list = list("Work Tasks");
        let mut task = item("task");
        task.assign_id(7);
        list.add_item(task, fixed_now()).unwrap();

        assert!(list.remove_item(99, fixed_now()).is_none());
        let removed = list.remove_item(7, fixed_now()).expect("item exists");
        assert_eq!(removed.id(), 7);
        assert_eq!(list.total_items(), 0);
    }

    #[test]
    fn stats_track_item_states() {
        let now = fixed_now();
        let mut list = list("Stats");
        let mut done = item("done");
        done.complete(now).unwrap();
        let mut dropped = item("dropped");
        dropped.cancel(now).unwrap();
        let late = TodoItem::new(
            "late",
            Description::default(),
            Priority::Medium,
            Some(now + Duration::hours(1)),
            now,
        )
        .unwrap();

        list.add_item(done, now).unwrap();
        list.add_item(dropped, now).unwrap();
        list.add_item(late, now).unwrap();
        list.add_item(item("open"), now).unwrap();

        assert_eq!(list.total_items(), 4);
        assert_eq!(list.completed_items(), 1);
        assert_eq!(list.pending_items(), 2);
        assert_eq!(list.overdue_items(now + Duration::days(1)), 1);
        assert!((list.completion_percentage() - 25.0).abs() < f64::EPSILON);
    }

    #[test]
    fn empty_list_reports_zero_completion() {
        let list = list("Empty");
        assert_eq!(list.completion_percentage(), 0.0);
    }
}
