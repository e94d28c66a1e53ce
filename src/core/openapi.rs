use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::images::{
    dtos as images_dtos, handlers as images_handlers, services as images_services,
};
use crate::features::locations::{handlers as locations_handlers, services as locations_services};
use crate::features::submissions::{
    dtos as submissions_dtos, handlers as submissions_handlers, models as submissions_models,
};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Submissions
        submissions_handlers::create_submission,
        submissions_handlers::update_submission,
        submissions_handlers::list_my_submissions,
        submissions_handlers::get_submission,
        submissions_handlers::submit_submission,
        submissions_handlers::review_submission,
        submissions_handlers::review_queue,
        // Checklist
        submissions_handlers::add_checklist_item,
        submissions_handlers::toggle_checklist_item,
        submissions_handlers::remove_checklist_item,
        // Reminders
        submissions_handlers::add_reminder,
        submissions_handlers::remove_reminder,
        // Organizers
        submissions_handlers::add_head,
        submissions_handlers::update_head,
        submissions_handlers::set_head_image,
        submissions_handlers::remove_head,
        // Locations
        locations_handlers::search_locations,
        locations_handlers::resolve_location,
        // Images
        images_handlers::upload_image,
    ),
    components(
        schemas(
            Meta,
            // Submissions
            submissions_models::SubmissionKind,
            submissions_models::SubmissionStatus,
            submissions_models::SubmissionDetails,
            submissions_models::SubmissionContent,
            submissions_models::ProjectDetails,
            submissions_models::ProjectCategory,
            submissions_models::EventDetails,
            submissions_models::EventCategory,
            submissions_models::Coordinates,
            submissions_models::Submitter,
            submissions_models::Workflow,
            submissions_models::Submission,
            submissions_models::AuditAction,
            submissions_models::AuditEntry,
            submissions_models::AuditTrail,
            submissions_models::ChecklistItem,
            submissions_models::Reminder,
            submissions_models::ReminderDraft,
            submissions_models::HeadInfo,
            submissions_models::HeadDraft,
            submissions_dtos::SaveSubmissionDto,
            submissions_dtos::SubmissionResponseDto,
            submissions_dtos::ReviewOutcome,
            submissions_dtos::ReviewSubmissionDto,
            submissions_dtos::AddChecklistItemDto,
            submissions_dtos::SetHeadImageDto,
            ApiResponse<submissions_dtos::SubmissionResponseDto>,
            ApiResponse<Vec<submissions_dtos::SubmissionResponseDto>>,
            // Locations
            locations_services::PlaceCandidate,
            locations_services::ResolvedLocation,
            ApiResponse<Vec<locations_services::PlaceCandidate>>,
            ApiResponse<locations_services::ResolvedLocation>,
            // Images
            images_services::ImageFolder,
            images_dtos::UploadImageDto,
            images_dtos::UploadedImageDto,
            ApiResponse<images_dtos::UploadedImageDto>,
        )
    ),
    tags(
        (name = "submissions", description = "Project and event submissions with review workflow"),
        (name = "locations", description = "Place search for submission locations"),
        (name = "images", description = "Image upload for submissions and organizers"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "Community Submissions API",
        version = "0.1.0",
        description = "API documentation for community project and event submissions",
    )
)]
pub struct ApiDoc;

/// Adds Bearer JWT security scheme to the OpenAPI document
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
