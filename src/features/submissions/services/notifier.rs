use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::submissions::models::{Reminder, Submission, SubmissionKind};

/// Delivers a due reminder to its recipients
#[async_trait]
pub trait ReminderNotifier: Send + Sync {
    async fn notify(&self, submission: &Submission, reminder: &Reminder) -> Result<()>;
}

/// Body posted to the notification webhook
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ReminderNotification<'a> {
    submission_id: Uuid,
    kind: SubmissionKind,
    submission_title: &'a str,
    reminder_id: Uuid,
    title: &'a str,
    description: Option<&'a str>,
    scheduled_for: String,
    recipients: &'a [String],
}

impl<'a> ReminderNotification<'a> {
    fn new(submission: &'a Submission, reminder: &'a Reminder) -> Self {
        Self {
            submission_id: submission.id,
            kind: submission.kind(),
            submission_title: &submission.content.title,
            reminder_id: reminder.id,
            title: &reminder.title,
            description: reminder.description.as_deref(),
            scheduled_for: reminder.at().to_rfc3339(),
            recipients: &reminder.notify_emails,
        }
    }
}

/// Hands reminders to a mail gateway over HTTP
pub struct WebhookNotifier {
    client: reqwest::Client,
    url: String,
}

impl WebhookNotifier {
    const TIMEOUT: Duration = Duration::from_secs(10);

    pub fn new(url: String) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Self::TIMEOUT)
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, url })
    }
}

#[async_trait]
impl ReminderNotifier for WebhookNotifier {
    async fn notify(&self, submission: &Submission, reminder: &Reminder) -> Result<()> {
        let body = ReminderNotification::new(submission, reminder);

        let response = self
            .client
            .post(&self.url)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Reminder webhook request failed: {:?}", e);
                AppError::ExternalServiceError(format!("Reminder webhook failed: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            tracing::error!("Reminder webhook returned {} for {}", status, reminder.id);
            return Err(AppError::ExternalServiceError(format!(
                "Reminder webhook returned {}",
                status
            )));
        }

        tracing::debug!(
            "Reminder {} sent to {} recipients",
            reminder.id,
            reminder.notify_emails.len()
        );
        Ok(())
    }
}

/// Used when no webhook is configured; only writes the reminder to the log
pub struct LogNotifier;

#[async_trait]
impl ReminderNotifier for LogNotifier {
    async fn notify(&self, submission: &Submission, reminder: &Reminder) -> Result<()> {
        tracing::info!(
            "Reminder '{}' for {} {} due at {} -> {}",
            reminder.title,
            submission.kind(),
            submission.id,
            reminder.at(),
            reminder.notify_emails.join(", ")
        );
        Ok(())
    }
}
