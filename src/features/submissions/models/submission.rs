use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::Type;
use utoipa::ToSchema;
use uuid::Uuid;

use super::{
    AuditTrail, ChecklistItem, EventDetails, HeadInfo, ProjectDetails, Reminder, SubmissionKind,
};

/// Submission status enum matching database enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "submission_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStatus {
    Draft,
    Pending,
    Approved,
    Rejected,
}

impl SubmissionStatus {
    /// Authors may still change content
    pub fn is_editable(self) -> bool {
        matches!(self, SubmissionStatus::Draft | SubmissionStatus::Pending)
    }
}

impl std::fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubmissionStatus::Draft => write!(f, "draft"),
            SubmissionStatus::Pending => write!(f, "pending"),
            SubmissionStatus::Approved => write!(f, "approved"),
            SubmissionStatus::Rejected => write!(f, "rejected"),
        }
    }
}

/// Both halves of a map pin; a submission has either both or neither
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn in_range(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// Variant-specific fields, tagged by `kind`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SubmissionDetails {
    Project(ProjectDetails),
    Event(EventDetails),
}

impl SubmissionDetails {
    pub fn empty(kind: SubmissionKind) -> Self {
        match kind {
            SubmissionKind::Project => SubmissionDetails::Project(ProjectDetails::default()),
            SubmissionKind::Event => SubmissionDetails::Event(EventDetails::default()),
        }
    }

    pub fn kind(&self) -> SubmissionKind {
        match self {
            SubmissionDetails::Project(_) => SubmissionKind::Project,
            SubmissionDetails::Event(_) => SubmissionKind::Event,
        }
    }
}

/// Everything the author edits. Identity and workflow live elsewhere.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionContent {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub coordinates: Option<Coordinates>,
    #[serde(default)]
    pub contact_email: String,
    #[serde(default)]
    pub contact_phone: Option<String>,
    #[serde(default)]
    pub target_audience: Option<String>,
    #[serde(default)]
    pub duration_estimate: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub requirements: Vec<String>,
    pub details: SubmissionDetails,
    #[serde(default)]
    pub checklist: Vec<ChecklistItem>,
    #[serde(default)]
    pub reminders: Vec<Reminder>,
    #[serde(default)]
    pub heads: Vec<HeadInfo>,
    #[serde(default)]
    pub image: Option<String>,
}

impl SubmissionContent {
    pub fn empty(kind: SubmissionKind) -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            location: String::new(),
            address: None,
            coordinates: None,
            contact_email: String::new(),
            contact_phone: None,
            target_audience: None,
            duration_estimate: None,
            notes: None,
            requirements: Vec::new(),
            details: SubmissionDetails::empty(kind),
            checklist: Vec::new(),
            reminders: Vec::new(),
            heads: Vec::new(),
            image: None,
        }
    }

    pub fn kind(&self) -> SubmissionKind {
        self.details.kind()
    }
}

/// Who proposed the submission. Fixed at creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Submitter {
    #[serde(rename = "submittedBy")]
    pub user_id: String,
    #[serde(rename = "submitterName")]
    pub name: String,
    #[serde(rename = "submitterEmail")]
    pub email: String,
}

/// Review state and history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Workflow {
    pub status: SubmissionStatus,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub reviewed_by: Option<String>,
    pub admin_comments: Option<String>,
    pub rejection_reason: Option<String>,
    pub audit_trail: AuditTrail,
}

impl Workflow {
    pub fn draft() -> Self {
        Self {
            status: SubmissionStatus::Draft,
            reviewed_at: None,
            reviewed_by: None,
            admin_comments: None,
            rejection_reason: None,
            audit_trail: AuditTrail::new(),
        }
    }
}

/// Data for creating a new submission; the repository assigns id and timestamps
#[derive(Debug, Clone)]
pub struct NewSubmission {
    pub submitter: Submitter,
    pub content: SubmissionContent,
    pub workflow: Workflow,
}

/// A persisted project or event submission
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub id: Uuid,
    #[serde(flatten)]
    pub submitter: Submitter,
    #[serde(flatten)]
    pub content: SubmissionContent,
    #[serde(flatten)]
    pub workflow: Workflow,
    pub submitted_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Submission {
    pub fn kind(&self) -> SubmissionKind {
        self.content.kind()
    }

    pub fn status(&self) -> SubmissionStatus {
        self.workflow.status
    }

    pub fn is_authored_by(&self, user_id: &str) -> bool {
        self.submitter.user_id == user_id
    }
}
