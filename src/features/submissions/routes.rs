use std::sync::Arc;

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::features::submissions::handlers::{self, SubmissionState};
use crate::features::submissions::services::SubmissionService;

/// Create routes for the submissions feature
///
/// All routes require the auth middleware to be applied by the caller
pub fn routes(service: Arc<SubmissionService>) -> Router {
    let state = SubmissionState { service };

    Router::new()
        .route(
            "/api/submissions/{kind}",
            post(handlers::create_submission).get(handlers::list_my_submissions),
        )
        .route(
            "/api/submissions/{kind}/review-queue",
            get(handlers::review_queue),
        )
        .route(
            "/api/submissions/{kind}/{id}",
            get(handlers::get_submission).put(handlers::update_submission),
        )
        .route(
            "/api/submissions/{kind}/{id}/submit",
            post(handlers::submit_submission),
        )
        .route(
            "/api/submissions/{kind}/{id}/review",
            post(handlers::review_submission),
        )
        // Checklist
        .route(
            "/api/submissions/{kind}/{id}/checklist",
            post(handlers::add_checklist_item),
        )
        .route(
            "/api/submissions/{kind}/{id}/checklist/{item_id}",
            delete(handlers::remove_checklist_item),
        )
        .route(
            "/api/submissions/{kind}/{id}/checklist/{item_id}/toggle",
            post(handlers::toggle_checklist_item),
        )
        // Reminders
        .route(
            "/api/submissions/{kind}/{id}/reminders",
            post(handlers::add_reminder),
        )
        .route(
            "/api/submissions/{kind}/{id}/reminders/{reminder_id}",
            delete(handlers::remove_reminder),
        )
        // Organizers
        .route("/api/submissions/{kind}/{id}/heads", post(handlers::add_head))
        .route(
            "/api/submissions/{kind}/{id}/heads/{head_id}",
            put(handlers::update_head).delete(handlers::remove_head),
        )
        .route(
            "/api/submissions/{kind}/{id}/heads/{head_id}/image",
            put(handlers::set_head_image),
        )
        .with_state(state)
}
