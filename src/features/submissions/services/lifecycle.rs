//! Status transitions and the audit entries they leave behind.
//!
//! ```text
//! draft ──submit──> pending ──review──> approved | rejected
//!   ^                  │
//!   └──editor save─────┘
//! ```
//!
//! Every function works on a `Workflow` value and never touches storage.

use chrono::{DateTime, Utc};

use crate::core::error::{AppError, Result};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::submissions::models::{
    AuditAction, AuditEntry, Submission, SubmissionStatus, Workflow,
};

/// The user performing an operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub user_id: String,
    pub is_reviewer: bool,
}

impl Actor {
    pub fn new(user_id: impl Into<String>, is_reviewer: bool) -> Self {
        Self {
            user_id: user_id.into(),
            is_reviewer,
        }
    }
}

impl From<&AuthenticatedUser> for Actor {
    fn from(user: &AuthenticatedUser) -> Self {
        Self::new(user.sub.clone(), user.has_reviewer_access())
    }
}

/// A reviewer sending their own submission to review skips the queue.
pub struct AutoApproval;

impl AutoApproval {
    pub fn applies(actor: &Actor, requested: SubmissionStatus) -> bool {
        actor.is_reviewer && requested == SubmissionStatus::Pending
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewDecision {
    Approve {
        comments: Option<String>,
    },
    Reject {
        reason: Option<String>,
        comments: Option<String>,
    },
}

/// Workflow for a record about to be created with `requested` status
pub fn open(actor: &Actor, requested: SubmissionStatus, now: DateTime<Utc>) -> Result<Workflow> {
    let mut workflow = Workflow::draft();

    match requested {
        SubmissionStatus::Draft => {
            workflow.audit_trail.record(AuditEntry::transition(
                AuditAction::Created,
                &actor.user_id,
                now,
                None,
                SubmissionStatus::Draft,
            ));
        }
        SubmissionStatus::Pending => {
            workflow.status = SubmissionStatus::Pending;
            workflow.audit_trail.record(AuditEntry::transition(
                AuditAction::Submitted,
                &actor.user_id,
                now,
                None,
                SubmissionStatus::Pending,
            ));

            if AutoApproval::applies(actor, requested) {
                workflow.status = SubmissionStatus::Approved;
                workflow.reviewed_at = Some(now);
                workflow.reviewed_by = Some(actor.user_id.clone());
                workflow.audit_trail.record(
                    AuditEntry::transition(
                        AuditAction::AutoApproved,
                        &actor.user_id,
                        now,
                        Some(SubmissionStatus::Pending),
                        SubmissionStatus::Approved,
                    )
                    .with_details(Some("Submitted by a reviewer".to_string())),
                );
            }
        }
        other => {
            return Err(AppError::BadRequest(format!(
                "A new submission cannot start as {}",
                other
            )));
        }
    }

    Ok(workflow)
}

/// Apply the status an author picked in the editor to an existing record
pub fn apply_editor_status(
    workflow: &mut Workflow,
    actor: &Actor,
    requested: SubmissionStatus,
    now: DateTime<Utc>,
) -> Result<()> {
    let current = workflow.status;
    let action = match (current, requested) {
        (from, to) if from == to => return Ok(()),
        (SubmissionStatus::Draft, SubmissionStatus::Pending) => AuditAction::Submitted,
        (SubmissionStatus::Pending, SubmissionStatus::Draft) => AuditAction::ReturnedToDraft,
        (from, to) => {
            return Err(AppError::Conflict(format!(
                "Cannot move a submission from {} to {} while editing",
                from, to
            )));
        }
    };

    workflow.status = requested;
    workflow.audit_trail.record(AuditEntry::transition(
        action,
        &actor.user_id,
        now,
        Some(current),
        requested,
    ));
    Ok(())
}

/// draft -> pending. Content must already have passed pending validation.
pub fn submit_draft(workflow: &mut Workflow, actor: &Actor, now: DateTime<Utc>) -> Result<()> {
    if workflow.status != SubmissionStatus::Draft {
        return Err(AppError::Conflict(format!(
            "Only drafts can be submitted; this submission is {}",
            workflow.status
        )));
    }
    apply_editor_status(workflow, actor, SubmissionStatus::Pending, now)
}

/// pending -> approved | rejected, reviewers only
pub fn review(
    workflow: &mut Workflow,
    actor: &Actor,
    decision: ReviewDecision,
    now: DateTime<Utc>,
) -> Result<()> {
    if !actor.is_reviewer {
        return Err(AppError::Forbidden(
            "Only reviewers can review submissions".to_string(),
        ));
    }
    if workflow.status != SubmissionStatus::Pending {
        return Err(AppError::Conflict(format!(
            "Only pending submissions can be reviewed; this submission is {}",
            workflow.status
        )));
    }

    let (action, status, reason, comments) = match decision {
        ReviewDecision::Approve { comments } => {
            (AuditAction::Approved, SubmissionStatus::Approved, None, comments)
        }
        ReviewDecision::Reject { reason, comments } => {
            (AuditAction::Rejected, SubmissionStatus::Rejected, reason, comments)
        }
    };

    let details = match (&reason, &comments) {
        (Some(r), Some(c)) => Some(format!("{} ({})", r, c)),
        (Some(r), None) => Some(r.clone()),
        (None, c) => c.clone(),
    };

    workflow.status = status;
    workflow.reviewed_at = Some(now);
    workflow.reviewed_by = Some(actor.user_id.clone());
    workflow.admin_comments = comments;
    workflow.rejection_reason = reason;
    workflow.audit_trail.record(
        AuditEntry::transition(
            action,
            &actor.user_id,
            now,
            Some(SubmissionStatus::Pending),
            status,
        )
        .with_details(details),
    );
    Ok(())
}

/// Authors may edit their own submission while it is draft or pending.
pub fn ensure_editable(submission: &Submission, actor: &Actor) -> Result<()> {
    if !submission.is_authored_by(&actor.user_id) {
        return Err(AppError::Forbidden(
            "Only the author can edit this submission".to_string(),
        ));
    }
    if !submission.status().is_editable() {
        return Err(AppError::Forbidden(format!(
            "Submission is {} and can no longer be edited",
            submission.status()
        )));
    }
    Ok(())
}

/// Approved submissions are public; everything else is limited to the author and reviewers.
pub fn can_view(submission: &Submission, actor: &Actor) -> bool {
    submission.status() == SubmissionStatus::Approved
        || actor.is_reviewer
        || submission.is_authored_by(&actor.user_id)
}
