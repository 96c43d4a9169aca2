use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use todo_application::{TodoItemDraft, TodoListDraft, TodoListSummary};
use todo_domain::{Description, Priority, TodoItem, TodoItemStatus, TodoList};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoItemPayload {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub priority: Option<Priority>,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
}

impl TodoItemPayload {
    pub fn into_draft(self) -> TodoItemDraft {
        TodoItemDraft {
            title: self.title,
            description: self.description,
            priority: self.priority.unwrap_or_default(),
            due_date: self.due_date,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoListPayload {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl TodoListPayload {
    pub fn into_draft(self) -> TodoListDraft {
        TodoListDraft {
            name: self.name,
            description: self.description,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetPriorityPayload {
    pub priority: Priority,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtendDueDatePayload {
    pub due_date: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoItemResponse {
    pub id: u64,
    pub title: String,
    pub description: Option<String>,
    pub priority: Priority,
    pub status: TodoItemStatus,
    pub due_date: Option<DateTime<Utc>>,
    pub is_overdue: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl TodoItemResponse {
    pub fn from_domain(item: &TodoItem, now: DateTime<Utc>) -> Self {
        Self {
            id: item.id(),
            title: item.title().to_string(),
            description: description_field(item.description()),
            priority: item.priority(),
            status: item.status(),
            due_date: item.due_date(),
            is_overdue: item.is_overdue(now),
            created_at: item.created_at(),
            updated_at: item.updated_at(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoListResponse {
    pub id: u64,
    pub name: String,
    pub description: Option<String>,
    pub archived: bool,
    pub items: Vec<TodoItemResponse>,
    pub completion_percentage: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl TodoListResponse {
    pub fn from_domain(list: &TodoList, now: DateTime<Utc>) -> Self {
        Self {
            id: list.id(),
            name: list.name().to_string(),
            description: description_field(list.description()),
            archived: list.is_archived(),
            items: list
                .items()
                .iter()
                .map(|item| TodoItemResponse::from_domain(item, now))
                .collect(),
            completion_percentage: list.completion_percentage(),
            created_at: list.created_at(),
            updated_at: list.updated_at(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoListSummaryResponse {
    pub id: u64,
    pub name: String,
    pub archived: bool,
    pub total_items: usize,
    pub completed_items: usize,
    pub pending_items: usize,
    pub overdue_items: usize,
    pub completion_percentage: f64,
}

impl From<TodoListSummary> for TodoListSummaryResponse {
    fn from(summary: TodoListSummary) -> Self {
        Self {
            id: summary.id,
            name: summary.name,
            archived: summary.archived,
            total_items: summary.total_items,
            completed_items: summary.completed_items,
            pending_items: summary.pending_items,
            overdue_items: summary.overdue_items,
            completion_percentage: summary.completion_percentage,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileUploadResponse {
    pub file_name: String,
    pub url: String,
}

fn description_field(description: &Description) -> Option<String> {
    if description.is_empty() {
        None
    } else {
        Some(description.as_str().to_string())
    }
}
