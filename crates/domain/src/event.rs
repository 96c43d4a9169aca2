use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::item::{Priority, TodoItemStatus};

/// Facts recorded by entities when something notable happens.
///
/// Events accumulate on the entity that raised them and are drained with
/// `take_events`; nothing dispatches them to handlers yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DomainEvent {
    #[serde(rename_all = "snake_case")]
    ItemCreated {
        item_id: u64,
        title: String,
        priority: Priority,
        occurred_at: DateTime<Utc>,
    },
    #[serde(rename_all = "snake_case")]
    ItemCompleted {
        item_id: u64,
        title: String,
        occurred_at: DateTime<Utc>,
    },
    #[serde(rename_all = "snake_case")]
    ItemReopened {
        item_id: u64,
        title: String,
        occurred_at: DateTime<Utc>,
    },
    #[serde(rename_all = "snake_case")]
    ItemCancelled {
        item_id: u64,
        title: String,
        occurred_at: DateTime<Utc>,
    },
    #[serde(rename_all = "snake_case")]
    ItemStatusChanged {
        item_id: u64,
        title: String,
        new_status: TodoItemStatus,
        occurred_at: DateTime<Utc>,
    },
    #[serde(rename_all = "snake_case")]
    ItemPriorityChanged {
        item_id: u64,
        title: String,
        new_priority: Priority,
        occurred_at: DateTime<Utc>,
    },
    #[serde(rename_all = "snake_case")]
    ItemDueDateExtended {
        item_id: u64,
        title: String,
        new_due_date: DateTime<Utc>,
        occurred_at: DateTime<Utc>,
    },
    #[serde(rename_all = "snake_case")]
    ListCreated {
        list_id: u64,
        name: String,
        occurred_at: DateTime<Utc>,
    },
    #[serde(rename_all = "snake_case")]
    ListUpdated {
        list_id: u64,
        name: String,
        occurred_at: DateTime<Utc>,
    },
    #[serde(rename_all = "snake_case")]
    ListArchived {
        list_id: u64,
        name: String,
        occurred_at: DateTime<Utc>,
    },
    #[serde(rename_all = "snake_case")]
    ListRestored {
        list_id: u64,
        name: String,
        occurred_at: DateTime<Utc>,
    },
}

impl DomainEvent {
    /// Returns the canonical event type string used across logging.
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::ItemCreated { .. } => "item.created",
            Self::ItemCompleted { .. } => "item.completed",
            Self::ItemReopened { .. } => "item.reopened",
            Self::ItemCancelled { .. } => "item.cancelled",
            Self::ItemStatusChanged { .. } => "item.status_changed",
            Self::ItemPriorityChanged { .. } => "item.priority_changed",
            Self::ItemDueDateExtended { .. } => "item.due_date_extended",
            Self::ListCreated { .. } => "list.created",
            Self::ListUpdated { .. } => "list.updated",
            Self::ListArchived { .. } => "list.archived",
            Self::ListRestored { .. } => "list.restored",
        }
    }

    /// Returns the occurrence timestamp of the event.
    pub fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            Self::ItemCreated { occurred_at, .. }
            | Self::ItemCompleted { occurred_at, .. }
            | Self::ItemReopened { occurred_at, .. }
            | Self::ItemCancelled { occurred_at, .. }
            | Self::ItemStatusChanged { occurred_at, .. }
            | Self::ItemPriorityChanged { occurred_at, .. }
            | Self::ItemDueDateExtended { occurred_at, .. }
            | Self::ListCreated { occurred_at, .. }
            | Self::ListUpdated { occurred_at, .. }
            | Self::ListArchived { occurred_at, .. }
            | Self::ListRestored { occurred_at, .. } => *occurred_at,
        }
    }
}
