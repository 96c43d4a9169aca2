use serde_json::Value;
use tracing::info;

/// Outbound email stub.
///
/// No transport is wired up; every send is logged and reported as
/// delivered so callers can already program against the final surface.
#[derive(Debug, Clone, Default)]
pub struct EmailService;

impl EmailService {
    pub fn new() -> Self {
        Self
    }

    /// Sends a single plain-text email.
    pub async fn send(&self, to: &str, subject: &str, body: &str) {
        info!(stage = "email", %to, %subject, "sending email");
        info!(stage = "email", %body, "email content");
    }

    /// Sends the same email to every recipient.
    pub async fn send_to_many(&self, recipients: &[String], subject: &str, body: &str) {
        for recipient in recipients {
            self.send(recipient, subject, body).await;
        }
    }

    /// Sends an email rendered from a named template.
    pub async fn send_templated(&self, to: &str, template_name: &str, model: &Value) {
        info!(
            stage = "email",
            %to,
            template = %template_name,
            model = %model,
            "sending templated email"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn sends_complete_without_transport() {
        let email = EmailService::new();
        email.send("user@example.com", "hello", "world").await;
        email
            .send_to_many(
                &["a@example.com".to_string(), "b@example.com".to_string()],
                "hello",
                "world",
            )
            .await;
        email
            .send_templated("user@example.com", "welcome", &json!({ "name": "user" }))
            .await;
    }
}
