pub mod audit;
pub mod checklist;
pub mod event;
pub mod head;
pub mod project;
pub mod reminder;
pub mod submission;
pub mod variant;

pub use audit::{AuditAction, AuditEntry, AuditTrail};
pub use checklist::ChecklistItem;
pub use event::{EventCategory, EventDetails};
pub use head::{HeadDraft, HeadInfo};
pub use project::{ProjectCategory, ProjectDetails};
pub use reminder::{Reminder, ReminderDraft};
pub use submission::{
    Coordinates, NewSubmission, Submission, SubmissionContent, SubmissionDetails,
    SubmissionStatus, Submitter, Workflow,
};
pub use variant::SubmissionKind;
