use chrono::{DateTime, Utc};
use std::sync::Arc;
use uuid::Uuid;

use super::lifecycle::{self, Actor, ReviewDecision};
use super::repository::SubmissionRepository;
use super::validation::prepare_for_submit;
use crate::core::error::{AppError, Result};
use crate::features::submissions::models::{
    checklist, head, reminder, ChecklistItem, HeadDraft, NewSubmission, Reminder, ReminderDraft,
    Submission, SubmissionContent, SubmissionKind, SubmissionStatus, Submitter,
};
use crate::shared::ids::IdGenerator;

/// An editor save: the full content plus the status the author picked
#[derive(Debug, Clone)]
pub struct SaveSubmission {
    pub submitter_name: String,
    pub submitter_email: String,
    pub content: SubmissionContent,
    pub status: SubmissionStatus,
}

/// Service for project and event submissions
pub struct SubmissionService {
    repository: Arc<dyn SubmissionRepository>,
    ids: Arc<dyn IdGenerator>,
}

impl SubmissionService {
    pub fn new(repository: Arc<dyn SubmissionRepository>, ids: Arc<dyn IdGenerator>) -> Self {
        Self { repository, ids }
    }

    /// Create a submission (no `draft_id`) or fully replace the author's existing one.
    pub async fn save(
        &self,
        actor: &Actor,
        kind: SubmissionKind,
        draft_id: Option<Uuid>,
        request: SaveSubmission,
    ) -> Result<Submission> {
        if request.content.kind() != kind {
            return Err(AppError::BadRequest(format!(
                "Details describe a {} but this is the {} collection",
                request.content.kind(),
                kind
            )));
        }

        let now = Utc::now();

        match draft_id {
            None => {
                let content = prepare_for_submit(
                    with_server_state(&[], &[], request.content),
                    request.status,
                )?;
                let workflow = lifecycle::open(actor, request.status, now)?;
                let data = NewSubmission {
                    submitter: Submitter {
                        user_id: actor.user_id.clone(),
                        name: request.submitter_name.trim().to_string(),
                        email: request.submitter_email.trim().to_string(),
                    },
                    content,
                    workflow,
                };
                self.repository.create(&data).await
            }
            Some(id) => {
                let stored = self.load(kind, id).await?;
                lifecycle::ensure_editable(&stored, actor)?;

                let content = with_server_state(
                    &stored.content.checklist,
                    &stored.content.reminders,
                    request.content,
                );
                let mut next = stored;
                next.content = prepare_for_submit(content, request.status)?;
                lifecycle::apply_editor_status(&mut next.workflow, actor, request.status, now)?;

                self.repository.update(kind, id, &next).await
            }
        }
    }

    /// Send a stored draft to review after checking it is complete
    pub async fn submit(
        &self,
        actor: &Actor,
        kind: SubmissionKind,
        id: Uuid,
    ) -> Result<Submission> {
        let mut submission = self.load(kind, id).await?;
        lifecycle::ensure_editable(&submission, actor)?;

        submission.content = prepare_for_submit(submission.content, SubmissionStatus::Pending)?;
        lifecycle::submit_draft(&mut submission.workflow, actor, Utc::now())?;

        self.repository.update(kind, id, &submission).await
    }

    pub async fn review(
        &self,
        actor: &Actor,
        kind: SubmissionKind,
        id: Uuid,
        decision: ReviewDecision,
    ) -> Result<Submission> {
        let mut submission = self.load(kind, id).await?;
        lifecycle::review(&mut submission.workflow, actor, decision, Utc::now())?;

        let submission = self.repository.update(kind, id, &submission).await?;
        tracing::info!(
            "Submission {} reviewed by {}: {}",
            id,
            actor.user_id,
            submission.status()
        );
        Ok(submission)
    }

    /// Hidden submissions read as not found
    pub async fn get(
        &self,
        actor: &Actor,
        kind: SubmissionKind,
        id: Uuid,
    ) -> Result<Submission> {
        let submission = self.load(kind, id).await?;
        if !lifecycle::can_view(&submission, actor) {
            return Err(not_found(id));
        }
        Ok(submission)
    }

    pub async fn list_mine(
        &self,
        actor: &Actor,
        kind: SubmissionKind,
    ) -> Result<Vec<Submission>> {
        self.repository.list_by_submitter(kind, &actor.user_id).await
    }

    pub async fn review_queue(
        &self,
        actor: &Actor,
        kind: SubmissionKind,
    ) -> Result<Vec<Submission>> {
        if !actor.is_reviewer {
            return Err(AppError::Forbidden(
                "Only reviewers can see the review queue".to_string(),
            ));
        }
        self.repository
            .list_by_status(kind, SubmissionStatus::Pending)
            .await
    }

    // ---- checklist ----

    pub async fn add_checklist_item(
        &self,
        actor: &Actor,
        kind: SubmissionKind,
        id: Uuid,
        text: &str,
    ) -> Result<Submission> {
        let ids = self.ids.as_ref();
        self.edit_content(actor, kind, id, |content| {
            content.checklist = checklist::add(&content.checklist, text, ids)?;
            Ok(())
        })
        .await
    }

    /// Only someone other than the author can tick items off; for the author this is a no-op.
    pub async fn toggle_checklist_item(
        &self,
        actor: &Actor,
        kind: SubmissionKind,
        id: Uuid,
        item_id: Uuid,
    ) -> Result<Submission> {
        let mut submission = self.get(actor, kind, id).await?;
        if !checklist::contains(&submission.content.checklist, item_id) {
            return Err(AppError::NotFound(format!(
                "Checklist item {} not found",
                item_id
            )));
        }

        let completion_allowed = !submission.is_authored_by(&actor.user_id);
        if !completion_allowed {
            tracing::debug!(
                "Ignoring checklist toggle by author {} on {}",
                actor.user_id,
                id
            );
            return Ok(submission);
        }

        submission.content.checklist = checklist::toggle(
            &submission.content.checklist,
            item_id,
            &actor.user_id,
            completion_allowed,
            Utc::now(),
        );
        self.repository.update(kind, id, &submission).await
    }

    pub async fn remove_checklist_item(
        &self,
        actor: &Actor,
        kind: SubmissionKind,
        id: Uuid,
        item_id: Uuid,
    ) -> Result<Submission> {
        self.edit_content(actor, kind, id, |content| {
            content.checklist = checklist::remove(&content.checklist, item_id);
            Ok(())
        })
        .await
    }

    // ---- reminders ----

    pub async fn add_reminder(
        &self,
        actor: &Actor,
        kind: SubmissionKind,
        id: Uuid,
        draft: ReminderDraft,
    ) -> Result<Submission> {
        let ids = self.ids.as_ref();
        self.edit_content(actor, kind, id, |content| {
            content.reminders = reminder::add(&content.reminders, draft, ids)?;
            Ok(())
        })
        .await
    }

    pub async fn remove_reminder(
        &self,
        actor: &Actor,
        kind: SubmissionKind,
        id: Uuid,
        reminder_id: Uuid,
    ) -> Result<Submission> {
        self.edit_content(actor, kind, id, |content| {
            content.reminders = reminder::remove(&content.reminders, reminder_id);
            Ok(())
        })
        .await
    }

    /// Record a dispatched reminder. Runs on behalf of the system, whatever the status.
    pub async fn mark_reminder_sent(
        &self,
        kind: SubmissionKind,
        id: Uuid,
        reminder_id: Uuid,
        sent_at: DateTime<Utc>,
    ) -> Result<Submission> {
        let mut submission = self.load(kind, id).await?;
        submission.content.reminders =
            reminder::mark_sent(&submission.content.reminders, reminder_id, sent_at)?;
        self.repository.update(kind, id, &submission).await
    }

    /// Records with a reminder due at `now`, earliest first
    pub async fn submissions_with_due_reminders(
        &self,
        kind: SubmissionKind,
        now: DateTime<Utc>,
        limit: i64,
    ) -> Result<Vec<Submission>> {
        self.repository
            .list_with_due_reminders(kind, now, limit)
            .await
    }

    // ---- organizers ----

    pub async fn add_head(
        &self,
        actor: &Actor,
        kind: SubmissionKind,
        id: Uuid,
        draft: HeadDraft,
    ) -> Result<Submission> {
        let ids = self.ids.as_ref();
        self.edit_content(actor, kind, id, |content| {
            content.heads = head::add(&content.heads, draft, ids)?;
            Ok(())
        })
        .await
    }

    pub async fn update_head(
        &self,
        actor: &Actor,
        kind: SubmissionKind,
        id: Uuid,
        head_id: Uuid,
        draft: HeadDraft,
    ) -> Result<Submission> {
        self.edit_content(actor, kind, id, |content| {
            content.heads = head::update(&content.heads, head_id, draft)?;
            Ok(())
        })
        .await
    }

    pub async fn set_head_image(
        &self,
        actor: &Actor,
        kind: SubmissionKind,
        id: Uuid,
        head_id: Uuid,
        image: Option<String>,
    ) -> Result<Submission> {
        self.edit_content(actor, kind, id, |content| {
            content.heads = head::set_image(&content.heads, head_id, image)?;
            Ok(())
        })
        .await
    }

    pub async fn remove_head(
        &self,
        actor: &Actor,
        kind: SubmissionKind,
        id: Uuid,
        head_id: Uuid,
    ) -> Result<Submission> {
        self.edit_content(actor, kind, id, |content| {
            content.heads = head::remove(&content.heads, head_id);
            Ok(())
        })
        .await
    }

    async fn load(&self, kind: SubmissionKind, id: Uuid) -> Result<Submission> {
        self.repository
            .get_by_id(kind, id)
            .await?
            .ok_or_else(|| not_found(id))
    }

    /// Load, check the author may edit, apply `change` to a copy and write the copy back
    async fn edit_content<F>(
        &self,
        actor: &Actor,
        kind: SubmissionKind,
        id: Uuid,
        change: F,
    ) -> Result<Submission>
    where
        F: FnOnce(&mut SubmissionContent) -> Result<()> + Send,
    {
        let mut submission = self.load(kind, id).await?;
        lifecycle::ensure_editable(&submission, actor)?;

        change(&mut submission.content)?;
        self.repository.update(kind, id, &submission).await
    }
}

/// Checklist completion and reminder dispatch are owned by the server; an
/// editor snapshot only supplies the text of those entries.
fn with_server_state(
    stored_checklist: &[ChecklistItem],
    stored_reminders: &[Reminder],
    mut content: SubmissionContent,
) -> SubmissionContent {
    content.checklist = checklist::carry_completion(stored_checklist, content.checklist);
    content.reminders = reminder::carry_sent(stored_reminders, content.reminders);
    content
}

fn not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Submission {} not found", id))
}
