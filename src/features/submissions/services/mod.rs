pub mod lifecycle;
#[cfg(test)]
pub mod memory_repository;
pub mod notifier;
pub mod repository;
pub mod submission_service;
pub mod validation;

pub use lifecycle::{Actor, ReviewDecision};
pub use notifier::{LogNotifier, ReminderNotifier, WebhookNotifier};
pub use repository::PgSubmissionRepository;
pub use submission_service::{SaveSubmission, SubmissionService};
