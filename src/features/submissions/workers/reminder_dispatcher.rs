use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::interval;

use crate::core::error::Result;
use crate::features::submissions::models::{reminder, SubmissionKind};
use crate::features::submissions::services::{ReminderNotifier, SubmissionService};

/// Background worker that sends due reminders and flags them as sent
pub struct ReminderDispatcher {
    service: Arc<SubmissionService>,
    notifier: Arc<dyn ReminderNotifier>,
    poll_interval: Duration,
    batch_size: i64,
}

impl ReminderDispatcher {
    pub fn new(
        service: Arc<SubmissionService>,
        notifier: Arc<dyn ReminderNotifier>,
        poll_interval: Duration,
        batch_size: i64,
    ) -> Self {
        Self {
            service,
            notifier,
            poll_interval,
            batch_size,
        }
    }

    /// Run the dispatcher in a background loop
    pub async fn run(&self) {
        tracing::info!(
            "Starting reminder dispatcher (every {:?}, batch {})",
            self.poll_interval,
            self.batch_size
        );

        let mut interval = interval(self.poll_interval);

        loop {
            interval.tick().await;

            match self.dispatch_due(Utc::now()).await {
                Ok(0) => {}
                Ok(sent) => tracing::info!("Dispatched {} reminders", sent),
                Err(e) => tracing::error!("Error dispatching reminders: {:?}", e),
            }
        }
    }

    /// Send every reminder due at `now`. Returns how many were sent.
    ///
    /// A reminder whose notification or bookkeeping fails stays unsent and is
    /// picked up again on the next tick.
    pub async fn dispatch_due(&self, now: DateTime<Utc>) -> Result<usize> {
        let mut sent = 0;

        for kind in SubmissionKind::ALL {
            let submissions = self
                .service
                .submissions_with_due_reminders(kind, now, self.batch_size)
                .await?;

            for submission in submissions {
                for due in reminder::due(&submission.content.reminders, now) {
                    if let Err(e) = self.notifier.notify(&submission, due).await {
                        if e.is_transient() {
                            tracing::warn!(
                                "Reminder {} for {} {} not sent, retrying next tick: {}",
                                due.id,
                                kind,
                                submission.id,
                                e
                            );
                        } else {
                            tracing::error!(
                                "Failed to send reminder {} for {} {}: {:?}",
                                due.id,
                                kind,
                                submission.id,
                                e
                            );
                        }
                        continue;
                    }

                    match self
                        .service
                        .mark_reminder_sent(kind, submission.id, due.id, now)
                        .await
                    {
                        Ok(_) => sent += 1,
                        Err(e) => tracing::error!(
                            "Reminder {} was sent but could not be marked: {:?}",
                            due.id,
                            e
                        ),
                    }
                }
            }
        }

        Ok(sent)
    }
}
