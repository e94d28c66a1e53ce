//! Role guards for handlers that need more than an authenticated user.

use crate::core::error::AppError;
use crate::features::auth::model::AuthenticatedUser;
use axum::{extract::FromRequestParts, http::request::Parts};

/// Allows users with the "reviewer" or "super_admin" role.
///
/// ```ignore
/// pub async fn handler(RequireReviewer(user): RequireReviewer) { ... }
/// ```
pub struct RequireReviewer(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for RequireReviewer
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = parts
            .extensions
            .get::<AuthenticatedUser>()
            .ok_or_else(|| AppError::Unauthorized("User not authenticated".to_string()))?;

        if !user.has_reviewer_access() {
            return Err(AppError::Forbidden("Reviewer access required".to_string()));
        }

        Ok(RequireReviewer(user.clone()))
    }
}
