use chrono::{DateTime, Utc};
use tracing::info;

use crate::email::EmailService;

/// Notification stub that announces item milestones.
///
/// Delivery is limited to log lines and the email stub; nothing reaches a
/// real channel yet.
#[derive(Debug, Clone, Default)]
pub struct NotificationService {
    email: EmailService,
}

impl NotificationService {
    pub fn new(email: EmailService) -> Self {
        Self { email }
    }

    pub async fn todo_item_created(&self, item_id: u64, title: &str) {
        info!(stage = "notify", item_id, %title, "todo item created");
    }

    pub async fn todo_item_completed(&self, item_id: u64, title: &str) {
        info!(stage = "notify", item_id, %title, "todo item completed");
    }

    pub async fn todo_item_overdue(&self, item_id: u64, title: &str, due_date: DateTime<Utc>) {
        info!(stage = "notify", item_id, %title, %due_date, "todo item overdue");
        // TODO: resolve the recipient from a user profile once accounts exist.
        self.email
            .send(
                "user@example.com",
                "Todo item overdue",
                &format!("Your todo item '{title}' was due {due_date}."),
            )
            .await;
    }
}
