use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;

use crate::core::error::Result;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::locations::dtos::LocationSearchQuery;
use crate::features::locations::services::{LocationService, PlaceCandidate, ResolvedLocation};
use crate::shared::types::ApiResponse;

/// Search places for a submission's location field
#[utoipa::path(
    get,
    path = "/api/locations/search",
    params(LocationSearchQuery),
    responses(
        (status = 200, description = "Matching places", body = ApiResponse<Vec<PlaceCandidate>>),
        (status = 401, description = "Unauthorized"),
        (status = 502, description = "Geocoding service unavailable")
    ),
    security(("bearer_auth" = [])),
    tag = "locations"
)]
pub async fn search_locations(
    _user: AuthenticatedUser,
    State(service): State<Arc<LocationService>>,
    Query(query): Query<LocationSearchQuery>,
) -> Result<Json<ApiResponse<Vec<PlaceCandidate>>>> {
    let places = service.search(&query.q).await?;
    Ok(Json(ApiResponse::success(Some(places), None, None)))
}

/// Resolve a query to the top place, shaped for a submission's location fields
#[utoipa::path(
    get,
    path = "/api/locations/resolve",
    params(LocationSearchQuery),
    responses(
        (status = 200, description = "Top place, or null when nothing matched", body = ApiResponse<ResolvedLocation>),
        (status = 401, description = "Unauthorized"),
        (status = 502, description = "Geocoding service unavailable")
    ),
    security(("bearer_auth" = [])),
    tag = "locations"
)]
pub async fn resolve_location(
    _user: AuthenticatedUser,
    State(service): State<Arc<LocationService>>,
    Query(query): Query<LocationSearchQuery>,
) -> Result<Json<ApiResponse<ResolvedLocation>>> {
    let resolved = service.first_accepted(&query.q).await?;
    Ok(Json(ApiResponse::success(resolved, None, None)))
}
