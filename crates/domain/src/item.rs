use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::description::Description;
use crate::error::DomainError;
use crate::event::DomainEvent;

/// How urgent an item is. Critical items carry an extra due-date rule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

impl Priority {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle state of an item.
///
/// Legal transitions: Pending -> InProgress, Pending/InProgress ->
/// Completed or Cancelled, Completed/Cancelled -> Pending (reopen).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TodoItemStatus {
    Pending,
    InProgress,
    Completed,
    Cancelled,
}

impl TodoItemStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Returns `true` for the two terminal states.
    pub fn is_closed(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }
}

impl fmt::Display for TodoItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Longest horizon allowed for critical-priority due dates.
const CRITICAL_DUE_DATE_HORIZON_DAYS: i64 = 30;

/// A single todo item with its validation and lifecycle rules.
///
/// All rule checks take `now` explicitly; the entity never reads the wall
/// clock itself. The identifier stays `0` until the persistence layer
/// assigns one.
#[derive(Debug, Clone, PartialEq)]
pub struct TodoItem {
    id: u64,
    title: String,
    description: Description,
    priority: Priority,
    status: TodoItemStatus,
    due_date: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
    events: Vec<DomainEvent>,
}

impl TodoItem {
    /// Creates a new pending item after running the business rules.
    pub fn new(
        title: impl Into<String>,
        description: Description,
        priority: Priority,
        due_date: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        let title = title.into();
        validate_rules(&title, priority, due_date, now)?;

        Ok(Self {
            id: 0,
            title,
            description,
            priority,
            status: TodoItemStatus::Pending,
            due_date,
            created_at: now,
            updated_at: None,
            events: Vec::new(),
        })
    }

    /// Rewrites the editable fields. The same rules as creation apply.
    pub fn update(
        &mut self,
        title: impl Into<String>,
        description: Description,
        priority: Priority,
        due_date: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        let title = title.into();
        validate_rules(&title, priority, due_date, now)?;

        self.title = title;
        self.description = description;
        self.priority = priority;
        self.due_date = due_date;
        self.touch(now);
        Ok(())
    }

    /// Moves a pending item into progress.
    pub fn start(&mut self, now: DateTime<Utc>) -> Result<(), DomainError> {
        if self.status != TodoItemStatus::Pending {
            return Err(DomainError::InvalidTransition {
                from: self.status,
                to: TodoItemStatus::InProgress,
            });
        }
        self.status = TodoItemStatus::InProgress;
        self.touch(now);
        self.record(DomainEvent::ItemStatusChanged {
            item_id: self.id,
            title: self.title.clone(),
            new_status: self.status,
            occurred_at: now,
        });
        Ok(())
    }

    /// Marks the item completed. Open items only.
    pub fn complete(&mut self, now: DateTime<Utc>) -> Result<(), DomainError> {
        match self.status {
            TodoItemStatus::Completed => return Err(DomainError::AlreadyCompleted),
            TodoItemStatus::Cancelled => {
                return Err(DomainError::InvalidTransition {
                    from: self.status,
                    to: TodoItemStatus::Completed,
                })
            }
            TodoItemStatus::Pending | TodoItemStatus::InProgress => {}
        }
        self.status = TodoItemStatus::Completed;
        self.touch(now);
        self.record(DomainEvent::ItemCompleted {
            item_id: self.id,
            title: self.title.clone(),
            occurred_at: now,
        });
        Ok(())
    }

    /// Cancels an open item.
    pub fn cancel(&mut self, now: DateTime<Utc>) -> Result<(), DomainError> {
        if self.status.is_closed() {
            return Err(DomainError::InvalidTransition {
                from: self.status,
                to: TodoItemStatus::Cancelled,
            });
        }
        self.status = TodoItemStatus::Cancelled;
        self.touch(now);
        self.record(DomainEvent::ItemCancelled {
            item_id: self.id,
            title: self.title.clone(),
            occurred_at: now,
        });
        Ok(())
    }

    /// Brings a closed item back to pending.
    pub fn reopen(&mut self, now: DateTime<Utc>) -> Result<(), DomainError> {
        if !self.status.is_closed() {
            return Err(DomainError::NotCompleted);
        }
        self.status = TodoItemStatus::Pending;
        self.touch(now);
        self.record(DomainEvent::ItemReopened {
            item_id: self.id,
            title: self.title.clone(),
            occurred_at: now,
        });
        Ok(())
    }

    /// Changes the priority, re-checking the critical due-date rule.
    pub fn set_priority(
        &mut self,
        priority: Priority,
        now: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        check_critical_horizon(priority, self.due_date, now)?;
        self.priority = priority;
        self.touch(now);
        self.record(DomainEvent::ItemPriorityChanged {
            item_id: self.id,
            title: self.title.clone(),
            new_priority: priority,
            occurred_at: now,
        });
        Ok(())
    }

    /// Pushes the due date further out. The new date must be later than the
    /// current one and still satisfy the creation rules.
    pub fn extend_due_date(
        &mut self,
        new_due_date: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        if let Some(current) = self.due_date {
            if new_due_date <= current {
                return Err(DomainError::DueDateNotExtended);
            }
        }
        if new_due_date.date_naive() < now.date_naive() {
            return Err(DomainError::DueDateInPast);
        }
        check_critical_horizon(self.priority, Some(new_due_date), now)?;

        self.due_date = Some(new_due_date);
        self.touch(now);
        self.record(DomainEvent::ItemDueDateExtended {
            item_id: self.id,
            title: self.title.clone(),
            new_due_date,
            occurred_at: now,
        });
        Ok(())
    }

    /// Returns `true` when the item has a past due date and is still open.
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        match self.due_date {
            Some(due) => due < now && !self.status.is_closed(),
            None => false,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status == TodoItemStatus::Completed
    }

    pub fn is_cancelled(&self) -> bool {
        self.status == TodoItemStatus::Cancelled
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    /// Identifier assignment is owned by the persistence layer.
    pub fn assign_id(&mut self, id: u64) {
        self.id = id;
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &Description {
        &self.description
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    pub fn status(&self) -> TodoItemStatus {
        self.status
    }

    pub fn due_date(&self) -> Option<DateTime<Utc>> {
        self.due_date
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
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

fn validate_rules(
    title: &str,
    priority: Priority,
    due_date: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> Result<(), DomainError> {
    if title.trim().is_empty() {
        return Err(DomainError::MissingTitle);
    }
    if let Some(due) = due_date {
        if due.date_naive() < now.date_naive() {
            return Err(DomainError::DueDateInPast);
        }
    }
    check_critical_horizon(priority, due_date, now)
}

fn check_critical_horizon(
    priority: Priority,
    due_date: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> Result<(), DomainError> {
    if priority == Priority::Critical {
        if let Some(due) = due_date {
            if due > now + Duration::days(CRITICAL_DUE_DATE_HORIZON_DAYS) {
                return Err(DomainError::CriticalDueDateTooFar);
            }
        }
    }
    Ok(())
}
