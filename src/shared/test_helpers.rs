use axum::{extract::Request, middleware::Next, response::Response, Router};
use chrono::{NaiveDate, NaiveTime};

use crate::features::auth::model::AuthenticatedUser;
use crate::features::submissions::models::{
    EventCategory, EventDetails, ProjectCategory, ProjectDetails, SubmissionContent,
    SubmissionDetails, SubmissionKind,
};
use crate::features::submissions::services::Actor;

fn user(sub: &str, name: &str, roles: &[&str]) -> AuthenticatedUser {
    AuthenticatedUser {
        sub: sub.to_string(),
        name: Some(name.to_string()),
        email: Some(format!("{}@example.org", sub)),
        roles: roles.iter().map(|r| r.to_string()).collect(),
    }
}

pub fn member_user() -> AuthenticatedUser {
    user("member-1", "Ayu Lestari", &["member"])
}

pub fn other_member_user() -> AuthenticatedUser {
    user("member-2", "Budi Santoso", &["member"])
}

pub fn reviewer_user() -> AuthenticatedUser {
    user("reviewer-1", "Citra Dewi", &["reviewer"])
}

pub fn member_actor() -> Actor {
    Actor::from(&member_user())
}

pub fn other_member_actor() -> Actor {
    Actor::from(&other_member_user())
}

pub fn reviewer_actor() -> Actor {
    Actor::from(&reviewer_user())
}

/// Project content that passes review validation
pub fn complete_project() -> SubmissionContent {
    SubmissionContent {
        title: "Riverside tree planting".to_string(),
        description: "Plant native trees along the riverbank".to_string(),
        location: "Kali Code riverbank".to_string(),
        contact_email: "green@example.org".to_string(),
        requirements: vec!["Gloves".to_string()],
        details: SubmissionDetails::Project(ProjectDetails {
            category: Some(ProjectCategory::Environment),
            start_date: NaiveDate::from_ymd_opt(2026, 11, 1),
            end_date: NaiveDate::from_ymd_opt(2027, 1, 31),
            timeline: "Three months, weekends only".to_string(),
            expected_volunteers: 25,
            objectives: vec!["Plant 200 trees".to_string()],
            budget: None,
        }),
        ..SubmissionContent::empty(SubmissionKind::Project)
    }
}

/// Event content that passes review validation
pub fn complete_event() -> SubmissionContent {
    SubmissionContent {
        title: "Neighbourhood cleanup".to_string(),
        description: "Morning cleanup of the market area".to_string(),
        location: "Pasar Beringharjo".to_string(),
        contact_email: "crew@example.org".to_string(),
        details: SubmissionDetails::Event(EventDetails {
            category: Some(EventCategory::Cleanup),
            date: NaiveDate::from_ymd_opt(2026, 11, 14),
            time: NaiveTime::from_hms_opt(7, 30, 0),
            registration_deadline: NaiveDate::from_ymd_opt(2026, 11, 10),
            expected_attendees: 40,
            agenda: vec!["Gather".to_string(), "Clean".to_string()],
            cost: "Free".to_string(),
        }),
        ..SubmissionContent::empty(SubmissionKind::Event)
    }
}

/// Wrap a router so every request runs as `user`, skipping token validation
pub fn with_user(router: Router, user: AuthenticatedUser) -> Router {
    router.layer(axum::middleware::from_fn(
        move |mut request: Request, next: Next| {
            let user = user.clone();
            async move {
                request.extensions_mut().insert(user);
                let response: Response = next.run(request).await;
                response
            }
        },
    ))
}
