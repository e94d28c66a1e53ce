use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{SubmissionContent, SubmissionDetails};
use crate::shared::validation::is_blank;

/// Which kind of proposal a submission is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionKind {
    #[serde(alias = "projects")]
    Project,
    #[serde(alias = "events")]
    Event,
}

impl SubmissionKind {
    pub const ALL: [SubmissionKind; 2] = [SubmissionKind::Project, SubmissionKind::Event];

    pub fn descriptor(self) -> &'static VariantDescriptor {
        match self {
            SubmissionKind::Project => &PROJECT,
            SubmissionKind::Event => &EVENT,
        }
    }
}

impl std::fmt::Display for SubmissionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubmissionKind::Project => write!(f, "project"),
            SubmissionKind::Event => write!(f, "event"),
        }
    }
}

/// Per-kind facts the shared engine needs: where records live and what must
/// be filled in before review
#[derive(Debug)]
pub struct VariantDescriptor {
    pub kind: SubmissionKind,
    pub collection: &'static str,
    pub required_fields: &'static [RequiredField],
}

static PROJECT: VariantDescriptor = VariantDescriptor {
    kind: SubmissionKind::Project,
    collection: "project_submissions",
    required_fields: &[
        RequiredField::Title,
        RequiredField::Description,
        RequiredField::Location,
        RequiredField::StartDate,
        RequiredField::EndDate,
        RequiredField::ContactEmail,
        RequiredField::Timeline,
    ],
};

static EVENT: VariantDescriptor = VariantDescriptor {
    kind: SubmissionKind::Event,
    collection: "event_submissions",
    required_fields: &[
        RequiredField::Title,
        RequiredField::Description,
        RequiredField::Date,
        RequiredField::Time,
        RequiredField::Location,
        RequiredField::RegistrationDeadline,
        RequiredField::ContactEmail,
    ],
};

/// A field that must be present before a submission can enter review
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequiredField {
    Title,
    Description,
    Location,
    ContactEmail,
    Timeline,
    StartDate,
    EndDate,
    Date,
    Time,
    RegistrationDeadline,
}

impl RequiredField {
    /// Field name as it appears in request bodies
    pub fn wire_name(self) -> &'static str {
        match self {
            RequiredField::Title => "title",
            RequiredField::Description => "description",
            RequiredField::Location => "location",
            RequiredField::ContactEmail => "contactEmail",
            RequiredField::Timeline => "timeline",
            RequiredField::StartDate => "startDate",
            RequiredField::EndDate => "endDate",
            RequiredField::Date => "date",
            RequiredField::Time => "time",
            RequiredField::RegistrationDeadline => "registrationDeadline",
        }
    }

    /// A field that does not exist on the content's variant counts as missing.
    pub fn is_missing(self, content: &SubmissionContent) -> bool {
        match (self, &content.details) {
            (RequiredField::Title, _) => is_blank(&content.title),
            (RequiredField::Description, _) => is_blank(&content.description),
            (RequiredField::Location, _) => is_blank(&content.location),
            (RequiredField::ContactEmail, _) => is_blank(&content.contact_email),
            (RequiredField::Timeline, SubmissionDetails::Project(p)) => is_blank(&p.timeline),
            (RequiredField::StartDate, SubmissionDetails::Project(p)) => p.start_date.is_none(),
            (RequiredField::EndDate, SubmissionDetails::Project(p)) => p.end_date.is_none(),
            (RequiredField::Date, SubmissionDetails::Event(e)) => e.date.is_none(),
            (RequiredField::Time, SubmissionDetails::Event(e)) => e.time.is_none(),
            (RequiredField::RegistrationDeadline, SubmissionDetails::Event(e)) => {
                e.registration_deadline.is_none()
            }
            _ => true,
        }
    }
}
