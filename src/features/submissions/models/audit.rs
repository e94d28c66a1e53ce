use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::SubmissionStatus;

/// What happened to a submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum AuditAction {
    Created,
    Submitted,
    AutoApproved,
    Approved,
    Rejected,
    ReturnedToDraft,
}

impl std::fmt::Display for AuditAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuditAction::Created => write!(f, "created"),
            AuditAction::Submitted => write!(f, "submitted"),
            AuditAction::AutoApproved => write!(f, "auto-approved"),
            AuditAction::Approved => write!(f, "approved"),
            AuditAction::Rejected => write!(f, "rejected"),
            AuditAction::ReturnedToDraft => write!(f, "returned-to-draft"),
        }
    }
}

/// One immutable line of a submission's history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuditEntry {
    pub action: AuditAction,
    pub performed_by: String,
    pub performed_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_status: Option<SubmissionStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_status: Option<SubmissionStatus>,
}

impl AuditEntry {
    pub fn transition(
        action: AuditAction,
        performed_by: &str,
        performed_at: DateTime<Utc>,
        previous_status: Option<SubmissionStatus>,
        new_status: SubmissionStatus,
    ) -> Self {
        Self {
            action,
            performed_by: performed_by.to_string(),
            performed_at,
            details: None,
            previous_status,
            new_status: Some(new_status),
        }
    }

    pub fn with_details(mut self, details: Option<String>) -> Self {
        self.details = details;
        self
    }
}

/// Append-only history. Entries can be read and appended, never edited or removed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct AuditTrail(Vec<AuditEntry>);

impl AuditTrail {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, entry: AuditEntry) {
        tracing::debug!(
            "Audit: {} by {} ({:?} -> {:?})",
            entry.action,
            entry.performed_by,
            entry.previous_status,
            entry.new_status
        );
        self.0.push(entry);
    }

    pub fn entries(&self) -> &[AuditEntry] {
        &self.0
    }
}
