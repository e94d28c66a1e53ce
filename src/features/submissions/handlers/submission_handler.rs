use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::auth::guards::RequireReviewer;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::submissions::dtos::{
    AddChecklistItemDto, ReviewSubmissionDto, SaveSubmissionDto, SetHeadImageDto,
    SubmissionResponseDto,
};
use crate::features::submissions::models::{HeadDraft, ReminderDraft, Submission, SubmissionKind};
use crate::features::submissions::services::{Actor, SaveSubmission, SubmissionService};
use crate::shared::types::ApiResponse;

/// State for submission handlers
#[derive(Clone)]
pub struct SubmissionState {
    pub service: Arc<SubmissionService>,
}

type SubmissionResponse = Json<ApiResponse<SubmissionResponseDto>>;

fn respond(submission: Submission, message: &str) -> SubmissionResponse {
    Json(ApiResponse::success(
        Some(submission.into()),
        Some(message.to_string()),
        None,
    ))
}

fn into_save(user: &AuthenticatedUser, dto: SaveSubmissionDto) -> SaveSubmission {
    SaveSubmission {
        submitter_name: dto
            .submitter_name
            .or_else(|| user.name.clone())
            .unwrap_or_default(),
        submitter_email: dto
            .submitter_email
            .or_else(|| user.email.clone())
            .unwrap_or_default(),
        content: dto.content,
        status: dto.status,
    }
}

/// Create a project or event submission
#[utoipa::path(
    post,
    path = "/api/submissions/{kind}",
    params(("kind" = SubmissionKind, Path, description = "project or event")),
    request_body = SaveSubmissionDto,
    responses(
        (status = 201, description = "Submission created", body = ApiResponse<SubmissionResponseDto>),
        (status = 400, description = "Validation error or missing required fields"),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "submissions"
)]
pub async fn create_submission(
    user: AuthenticatedUser,
    State(state): State<SubmissionState>,
    Path(kind): Path<SubmissionKind>,
    AppJson(dto): AppJson<SaveSubmissionDto>,
) -> Result<(StatusCode, SubmissionResponse)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let actor = Actor::from(&user);
    let submission = state
        .service
        .save(&actor, kind, None, into_save(&user, dto))
        .await?;

    Ok((
        StatusCode::CREATED,
        respond(submission, "Submission saved successfully"),
    ))
}

/// Replace the content of the caller's draft or pending submission
#[utoipa::path(
    put,
    path = "/api/submissions/{kind}/{id}",
    params(
        ("kind" = SubmissionKind, Path, description = "project or event"),
        ("id" = Uuid, Path, description = "Submission ID")
    ),
    request_body = SaveSubmissionDto,
    responses(
        (status = 200, description = "Submission saved", body = ApiResponse<SubmissionResponseDto>),
        (status = 400, description = "Validation error or missing required fields"),
        (status = 403, description = "Not the author, or no longer editable"),
        (status = 404, description = "Submission not found")
    ),
    security(("bearer_auth" = [])),
    tag = "submissions"
)]
pub async fn update_submission(
    user: AuthenticatedUser,
    State(state): State<SubmissionState>,
    Path((kind, id)): Path<(SubmissionKind, Uuid)>,
    AppJson(dto): AppJson<SaveSubmissionDto>,
) -> Result<SubmissionResponse> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let actor = Actor::from(&user);
    let submission = state
        .service
        .save(&actor, kind, Some(id), into_save(&user, dto))
        .await?;

    Ok(respond(submission, "Submission saved successfully"))
}

/// List the caller's own submissions
#[utoipa::path(
    get,
    path = "/api/submissions/{kind}",
    params(("kind" = SubmissionKind, Path, description = "project or event")),
    responses(
        (status = 200, description = "Caller's submissions", body = ApiResponse<Vec<SubmissionResponseDto>>),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "submissions"
)]
pub async fn list_my_submissions(
    user: AuthenticatedUser,
    State(state): State<SubmissionState>,
    Path(kind): Path<SubmissionKind>,
) -> Result<Json<ApiResponse<Vec<SubmissionResponseDto>>>> {
    let submissions = state.service.list_mine(&Actor::from(&user), kind).await?;
    let dtos: Vec<SubmissionResponseDto> = submissions.into_iter().map(Into::into).collect();
    Ok(Json(ApiResponse::list(dtos)))
}

/// Get a submission by ID
#[utoipa::path(
    get,
    path = "/api/submissions/{kind}/{id}",
    params(
        ("kind" = SubmissionKind, Path, description = "project or event"),
        ("id" = Uuid, Path, description = "Submission ID")
    ),
    responses(
        (status = 200, description = "Submission found", body = ApiResponse<SubmissionResponseDto>),
        (status = 404, description = "Submission not found")
    ),
    security(("bearer_auth" = [])),
    tag = "submissions"
)]
pub async fn get_submission(
    user: AuthenticatedUser,
    State(state): State<SubmissionState>,
    Path((kind, id)): Path<(SubmissionKind, Uuid)>,
) -> Result<Json<ApiResponse<SubmissionResponseDto>>> {
    let submission = state.service.get(&Actor::from(&user), kind, id).await?;
    Ok(Json(ApiResponse::success(Some(submission.into()), None, None)))
}

/// Send a saved draft to review
#[utoipa::path(
    post,
    path = "/api/submissions/{kind}/{id}/submit",
    params(
        ("kind" = SubmissionKind, Path, description = "project or event"),
        ("id" = Uuid, Path, description = "Submission ID")
    ),
    responses(
        (status = 200, description = "Submission sent to review", body = ApiResponse<SubmissionResponseDto>),
        (status = 400, description = "Missing required fields"),
        (status = 409, description = "Submission is not a draft")
    ),
    security(("bearer_auth" = [])),
    tag = "submissions"
)]
pub async fn submit_submission(
    user: AuthenticatedUser,
    State(state): State<SubmissionState>,
    Path((kind, id)): Path<(SubmissionKind, Uuid)>,
) -> Result<SubmissionResponse> {
    let submission = state.service.submit(&Actor::from(&user), kind, id).await?;
    Ok(respond(submission, "Submission sent to review"))
}

/// Approve or reject a pending submission (reviewer only)
#[utoipa::path(
    post,
    path = "/api/submissions/{kind}/{id}/review",
    params(
        ("kind" = SubmissionKind, Path, description = "project or event"),
        ("id" = Uuid, Path, description = "Submission ID")
    ),
    request_body = ReviewSubmissionDto,
    responses(
        (status = 200, description = "Decision recorded", body = ApiResponse<SubmissionResponseDto>),
        (status = 403, description = "Reviewer access required"),
        (status = 409, description = "Submission is not pending")
    ),
    security(("bearer_auth" = [])),
    tag = "submissions"
)]
pub async fn review_submission(
    RequireReviewer(user): RequireReviewer,
    State(state): State<SubmissionState>,
    Path((kind, id)): Path<(SubmissionKind, Uuid)>,
    AppJson(dto): AppJson<ReviewSubmissionDto>,
) -> Result<SubmissionResponse> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let submission = state
        .service
        .review(&Actor::from(&user), kind, id, dto.into())
        .await?;
    Ok(respond(submission, "Review recorded"))
}

/// Pending submissions waiting for a reviewer
#[utoipa::path(
    get,
    path = "/api/submissions/{kind}/review-queue",
    params(("kind" = SubmissionKind, Path, description = "project or event")),
    responses(
        (status = 200, description = "Pending submissions", body = ApiResponse<Vec<SubmissionResponseDto>>),
        (status = 403, description = "Reviewer access required")
    ),
    security(("bearer_auth" = [])),
    tag = "submissions"
)]
pub async fn review_queue(
    RequireReviewer(user): RequireReviewer,
    State(state): State<SubmissionState>,
    Path(kind): Path<SubmissionKind>,
) -> Result<Json<ApiResponse<Vec<SubmissionResponseDto>>>> {
    let submissions = state
        .service
        .review_queue(&Actor::from(&user), kind)
        .await?;
    let dtos: Vec<SubmissionResponseDto> = submissions.into_iter().map(Into::into).collect();
    Ok(Json(ApiResponse::list(dtos)))
}

/// Add a checklist item
#[utoipa::path(
    post,
    path = "/api/submissions/{kind}/{id}/checklist",
    params(
        ("kind" = SubmissionKind, Path, description = "project or event"),
        ("id" = Uuid, Path, description = "Submission ID")
    ),
    request_body = AddChecklistItemDto,
    responses(
        (status = 200, description = "Item added", body = ApiResponse<SubmissionResponseDto>),
        (status = 400, description = "Blank item text")
    ),
    security(("bearer_auth" = [])),
    tag = "submissions"
)]
pub async fn add_checklist_item(
    user: AuthenticatedUser,
    State(state): State<SubmissionState>,
    Path((kind, id)): Path<(SubmissionKind, Uuid)>,
    AppJson(dto): AppJson<AddChecklistItemDto>,
) -> Result<SubmissionResponse> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let submission = state
        .service
        .add_checklist_item(&Actor::from(&user), kind, id, &dto.text)
        .await?;
    Ok(respond(submission, "Checklist item added"))
}

/// Mark a checklist item done or not done
#[utoipa::path(
    post,
    path = "/api/submissions/{kind}/{id}/checklist/{item_id}/toggle",
    params(
        ("kind" = SubmissionKind, Path, description = "project or event"),
        ("id" = Uuid, Path, description = "Submission ID"),
        ("item_id" = Uuid, Path, description = "Checklist item ID")
    ),
    responses(
        (status = 200, description = "Item toggled", body = ApiResponse<SubmissionResponseDto>),
        (status = 404, description = "Submission or item not found")
    ),
    security(("bearer_auth" = [])),
    tag = "submissions"
)]
pub async fn toggle_checklist_item(
    user: AuthenticatedUser,
    State(state): State<SubmissionState>,
    Path((kind, id, item_id)): Path<(SubmissionKind, Uuid, Uuid)>,
) -> Result<SubmissionResponse> {
    let submission = state
        .service
        .toggle_checklist_item(&Actor::from(&user), kind, id, item_id)
        .await?;
    Ok(respond(submission, "Checklist item updated"))
}

/// Remove a checklist item
#[utoipa::path(
    delete,
    path = "/api/submissions/{kind}/{id}/checklist/{item_id}",
    params(
        ("kind" = SubmissionKind, Path, description = "project or event"),
        ("id" = Uuid, Path, description = "Submission ID"),
        ("item_id" = Uuid, Path, description = "Checklist item ID")
    ),
    responses(
        (status = 200, description = "Item removed", body = ApiResponse<SubmissionResponseDto>)
    ),
    security(("bearer_auth" = [])),
    tag = "submissions"
)]
pub async fn remove_checklist_item(
    user: AuthenticatedUser,
    State(state): State<SubmissionState>,
    Path((kind, id, item_id)): Path<(SubmissionKind, Uuid, Uuid)>,
) -> Result<SubmissionResponse> {
    let submission = state
        .service
        .remove_checklist_item(&Actor::from(&user), kind, id, item_id)
        .await?;
    Ok(respond(submission, "Checklist item removed"))
}

/// Schedule a reminder
#[utoipa::path(
    post,
    path = "/api/submissions/{kind}/{id}/reminders",
    params(
        ("kind" = SubmissionKind, Path, description = "project or event"),
        ("id" = Uuid, Path, description = "Submission ID")
    ),
    request_body = ReminderDraft,
    responses(
        (status = 200, description = "Reminder scheduled", body = ApiResponse<SubmissionResponseDto>),
        (status = 400, description = "Incomplete reminder")
    ),
    security(("bearer_auth" = [])),
    tag = "submissions"
)]
pub async fn add_reminder(
    user: AuthenticatedUser,
    State(state): State<SubmissionState>,
    Path((kind, id)): Path<(SubmissionKind, Uuid)>,
    AppJson(draft): AppJson<ReminderDraft>,
) -> Result<SubmissionResponse> {
    let submission = state
        .service
        .add_reminder(&Actor::from(&user), kind, id, draft)
        .await?;
    Ok(respond(submission, "Reminder scheduled"))
}

/// Cancel a reminder
#[utoipa::path(
    delete,
    path = "/api/submissions/{kind}/{id}/reminders/{reminder_id}",
    params(
        ("kind" = SubmissionKind, Path, description = "project or event"),
        ("id" = Uuid, Path, description = "Submission ID"),
        ("reminder_id" = Uuid, Path, description = "Reminder ID")
    ),
    responses(
        (status = 200, description = "Reminder removed", body = ApiResponse<SubmissionResponseDto>)
    ),
    security(("bearer_auth" = [])),
    tag = "submissions"
)]
pub async fn remove_reminder(
    user: AuthenticatedUser,
    State(state): State<SubmissionState>,
    Path((kind, id, reminder_id)): Path<(SubmissionKind, Uuid, Uuid)>,
) -> Result<SubmissionResponse> {
    let submission = state
        .service
        .remove_reminder(&Actor::from(&user), kind, id, reminder_id)
        .await?;
    Ok(respond(submission, "Reminder removed"))
}

/// Add an organizer
#[utoipa::path(
    post,
    path = "/api/submissions/{kind}/{id}/heads",
    params(
        ("kind" = SubmissionKind, Path, description = "project or event"),
        ("id" = Uuid, Path, description = "Submission ID")
    ),
    request_body = HeadDraft,
    responses(
        (status = 200, description = "Organizer added", body = ApiResponse<SubmissionResponseDto>),
        (status = 400, description = "Organizer name missing")
    ),
    security(("bearer_auth" = [])),
    tag = "submissions"
)]
pub async fn add_head(
    user: AuthenticatedUser,
    State(state): State<SubmissionState>,
    Path((kind, id)): Path<(SubmissionKind, Uuid)>,
    AppJson(draft): AppJson<HeadDraft>,
) -> Result<SubmissionResponse> {
    let submission = state
        .service
        .add_head(&Actor::from(&user), kind, id, draft)
        .await?;
    Ok(respond(submission, "Organizer added"))
}

/// Edit an organizer
#[utoipa::path(
    put,
    path = "/api/submissions/{kind}/{id}/heads/{head_id}",
    params(
        ("kind" = SubmissionKind, Path, description = "project or event"),
        ("id" = Uuid, Path, description = "Submission ID"),
        ("head_id" = Uuid, Path, description = "Organizer ID")
    ),
    request_body = HeadDraft,
    responses(
        (status = 200, description = "Organizer updated", body = ApiResponse<SubmissionResponseDto>),
        (status = 404, description = "Organizer not found")
    ),
    security(("bearer_auth" = [])),
    tag = "submissions"
)]
pub async fn update_head(
    user: AuthenticatedUser,
    State(state): State<SubmissionState>,
    Path((kind, id, head_id)): Path<(SubmissionKind, Uuid, Uuid)>,
    AppJson(draft): AppJson<HeadDraft>,
) -> Result<SubmissionResponse> {
    let submission = state
        .service
        .update_head(&Actor::from(&user), kind, id, head_id, draft)
        .await?;
    Ok(respond(submission, "Organizer updated"))
}

/// Attach an uploaded photo to an organizer
#[utoipa::path(
    put,
    path = "/api/submissions/{kind}/{id}/heads/{head_id}/image",
    params(
        ("kind" = SubmissionKind, Path, description = "project or event"),
        ("id" = Uuid, Path, description = "Submission ID"),
        ("head_id" = Uuid, Path, description = "Organizer ID")
    ),
    request_body = SetHeadImageDto,
    responses(
        (status = 200, description = "Photo set", body = ApiResponse<SubmissionResponseDto>),
        (status = 404, description = "Organizer not found")
    ),
    security(("bearer_auth" = [])),
    tag = "submissions"
)]
pub async fn set_head_image(
    user: AuthenticatedUser,
    State(state): State<SubmissionState>,
    Path((kind, id, head_id)): Path<(SubmissionKind, Uuid, Uuid)>,
    AppJson(dto): AppJson<SetHeadImageDto>,
) -> Result<SubmissionResponse> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let submission = state
        .service
        .set_head_image(&Actor::from(&user), kind, id, head_id, dto.image)
        .await?;
    Ok(respond(submission, "Organizer photo updated"))
}

/// Remove an organizer
#[utoipa::path(
    delete,
    path = "/api/submissions/{kind}/{id}/heads/{head_id}",
    params(
        ("kind" = SubmissionKind, Path, description = "project or event"),
        ("id" = Uuid, Path, description = "Submission ID"),
        ("head_id" = Uuid, Path, description = "Organizer ID")
    ),
    responses(
        (status = 200, description = "Organizer removed", body = ApiResponse<SubmissionResponseDto>)
    ),
    security(("bearer_auth" = [])),
    tag = "submissions"
)]
pub async fn remove_head(
    user: AuthenticatedUser,
    State(state): State<SubmissionState>,
    Path((kind, id, head_id)): Path<(SubmissionKind, Uuid, Uuid)>,
) -> Result<SubmissionResponse> {
    let submission = state
        .service
        .remove_head(&Actor::from(&user), kind, id, head_id)
        .await?;
    Ok(respond(submission, "Organizer removed"))
}
