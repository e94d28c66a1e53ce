use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use uuid::Uuid;

use super::repository::SubmissionRepository;
use crate::core::error::{AppError, Result};
use crate::features::submissions::models::{
    reminder, NewSubmission, Submission, SubmissionKind, SubmissionStatus,
};

/// In-process stand-in for `PgSubmissionRepository`
#[derive(Default)]
pub struct InMemorySubmissionRepository {
    records: Mutex<HashMap<(SubmissionKind, Uuid), Submission>>,
    fail_writes: AtomicBool,
}

impl InMemorySubmissionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `create`/`update` fail like a dropped connection
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn count(&self) -> usize {
        self.records.lock().map(|r| r.len()).unwrap_or(0)
    }

    fn check_writable(&self) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(AppError::Database(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }

    fn lock(
        &self,
    ) -> Result<std::sync::MutexGuard<'_, HashMap<(SubmissionKind, Uuid), Submission>>> {
        self.records
            .lock()
            .map_err(|_| AppError::Internal("repository lock poisoned".to_string()))
    }

    fn select(
        &self,
        kind: SubmissionKind,
        filter: impl Fn(&Submission) -> bool,
    ) -> Result<Vec<Submission>> {
        let records = self.lock()?;
        let mut found: Vec<Submission> = records
            .iter()
            .filter(|((k, _), s)| *k == kind && filter(s))
            .map(|(_, s)| s.clone())
            .collect();
        found.sort_by_key(|s| s.submitted_at);
        Ok(found)
    }
}

#[async_trait]
impl SubmissionRepository for InMemorySubmissionRepository {
    async fn create(&self, data: &NewSubmission) -> Result<Submission> {
        self.check_writable()?;
        let now = Utc::now();
        let submission = Submission {
            id: Uuid::new_v4(),
            submitter: data.submitter.clone(),
            content: data.content.clone(),
            workflow: data.workflow.clone(),
            submitted_at: now,
            updated_at: now,
        };
        self.lock()?
            .insert((submission.kind(), submission.id), submission.clone());
        Ok(submission)
    }

    async fn get_by_id(&self, kind: SubmissionKind, id: Uuid) -> Result<Option<Submission>> {
        Ok(self.lock()?.get(&(kind, id)).cloned())
    }

    async fn update(
        &self,
        kind: SubmissionKind,
        id: Uuid,
        record: &Submission,
    ) -> Result<Submission> {
        self.check_writable()?;
        let mut records = self.lock()?;
        let stored = records
            .get_mut(&(kind, id))
            .ok_or_else(|| AppError::NotFound(format!("Submission {} not found", id)))?;

        stored.content = record.content.clone();
        stored.workflow = record.workflow.clone();
        stored.updated_at = Utc::now();
        Ok(stored.clone())
    }

    async fn list_by_submitter(
        &self,
        kind: SubmissionKind,
        user_id: &str,
    ) -> Result<Vec<Submission>> {
        self.select(kind, |s| s.submitter.user_id == user_id)
    }

    async fn list_by_status(
        &self,
        kind: SubmissionKind,
        status: SubmissionStatus,
    ) -> Result<Vec<Submission>> {
        self.select(kind, |s| s.status() == status)
    }

    async fn list_with_due_reminders(
        &self,
        kind: SubmissionKind,
        now: DateTime<Utc>,
        limit: i64,
    ) -> Result<Vec<Submission>> {
        let mut found = self.select(kind, |s| s.content.reminders.iter().any(|r| r.is_due(now)))?;
        found.sort_by_key(|s| reminder::next_due_at(&s.content.reminders));
        found.truncate(usize::try_from(limit).unwrap_or(0));
        Ok(found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::submissions::models::{Reminder, Submitter, Workflow};
    use crate::shared::test_helpers::complete_event;
    use chrono::{NaiveDate, NaiveTime, TimeZone};

    fn reminder_on(n: u128, date: NaiveDate) -> Reminder {
        Reminder {
            id: Uuid::from_u128(n),
            title: format!("Reminder {}", n),
            description: None,
            reminder_date: date,
            reminder_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            notify_emails: vec!["crew@example.org".to_string()],
            sent: false,
            sent_at: None,
        }
    }

    async fn event_with(repo: &InMemorySubmissionRepository, reminders: Vec<Reminder>) -> Uuid {
        let mut content = complete_event();
        content.reminders = reminders;
        let data = NewSubmission {
            submitter: Submitter {
                user_id: "member-1".to_string(),
                name: "Ayu Lestari".to_string(),
                email: "member-1@example.org".to_string(),
            },
            content,
            workflow: Workflow::draft(),
        };
        repo.create(&data).await.unwrap().id
    }

    #[tokio::test]
    async fn test_due_listing_skips_records_with_only_future_reminders() {
        let repo = InMemorySubmissionRepository::new();
        for n in 0..3 {
            event_with(&repo, vec![reminder_on(n, NaiveDate::from_ymd_opt(2030, 1, 1).unwrap())])
                .await;
        }
        let later = event_with(
            &repo,
            vec![reminder_on(10, NaiveDate::from_ymd_opt(2026, 11, 20).unwrap())],
        )
        .await;
        let earlier = event_with(
            &repo,
            vec![reminder_on(11, NaiveDate::from_ymd_opt(2026, 11, 1).unwrap())],
        )
        .await;

        let now = Utc.with_ymd_and_hms(2026, 12, 1, 0, 0, 0).unwrap();
        let one = repo
            .list_with_due_reminders(SubmissionKind::Event, now, 1)
            .await
            .unwrap();
        assert_eq!(one.len(), 1);
        assert_eq!(one[0].id, earlier);

        let all = repo
            .list_with_due_reminders(SubmissionKind::Event, now, 10)
            .await
            .unwrap();
        let ids: Vec<Uuid> = all.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![earlier, later]);
    }
}
