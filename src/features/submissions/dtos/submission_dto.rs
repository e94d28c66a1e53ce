use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::submissions::models::{
    checklist, Submission, SubmissionContent, SubmissionKind, SubmissionStatus,
};
use crate::features::submissions::services::ReviewDecision;

fn default_status() -> SubmissionStatus {
    SubmissionStatus::Draft
}

/// Request DTO for creating or replacing a submission from the editor
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaveSubmissionDto {
    /// Defaults to the name on the caller's token
    #[validate(length(max = 128, message = "Name must not exceed 128 characters"))]
    pub submitter_name: Option<String>,

    /// Defaults to the email on the caller's token
    #[validate(email(message = "Submitter email must be a valid email"))]
    pub submitter_email: Option<String>,

    /// `draft` to save work in progress, `pending` to send it to review
    #[serde(default = "default_status")]
    pub status: SubmissionStatus,

    #[serde(flatten)]
    pub content: SubmissionContent,
}

/// Response DTO for a submission
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionResponseDto {
    pub kind: SubmissionKind,
    #[serde(flatten)]
    pub submission: Submission,
    /// Completed share of the checklist, 0.0 to 1.0
    pub checklist_progress: f64,
}

impl From<Submission> for SubmissionResponseDto {
    fn from(submission: Submission) -> Self {
        Self {
            kind: submission.kind(),
            checklist_progress: checklist::completion_ratio(&submission.content.checklist),
            submission,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ReviewOutcome {
    Approve,
    Reject,
}

/// Request DTO for a reviewer's decision
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReviewSubmissionDto {
    pub decision: ReviewOutcome,

    #[validate(length(max = 2000, message = "Comments must not exceed 2000 characters"))]
    pub comments: Option<String>,

    #[validate(length(max = 2000, message = "Rejection reason must not exceed 2000 characters"))]
    pub rejection_reason: Option<String>,
}

impl From<ReviewSubmissionDto> for ReviewDecision {
    fn from(dto: ReviewSubmissionDto) -> Self {
        let clean = |v: Option<String>| v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty());
        match dto.decision {
            ReviewOutcome::Approve => ReviewDecision::Approve {
                comments: clean(dto.comments),
            },
            ReviewOutcome::Reject => ReviewDecision::Reject {
                reason: clean(dto.rejection_reason),
                comments: clean(dto.comments),
            },
        }
    }
}

/// Request DTO for a new checklist item
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct AddChecklistItemDto {
    #[validate(length(max = 500, message = "Checklist item must not exceed 500 characters"))]
    pub text: String,
}

/// Request DTO for pointing an organizer at an uploaded photo
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct SetHeadImageDto {
    #[validate(url(message = "Image must be a valid URL"))]
    pub image: Option<String>,
}
