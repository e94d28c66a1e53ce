pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod workers;

pub use services::{
    LogNotifier, PgSubmissionRepository, ReminderNotifier, SubmissionService, WebhookNotifier,
};
pub use workers::ReminderDispatcher;
