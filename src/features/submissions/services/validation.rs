use crate::core::error::{AppError, Result};
use crate::features::submissions::models::{
    checklist, head, reminder, SubmissionContent, SubmissionDetails, SubmissionStatus,
};
use crate::shared::constants::DEFAULT_EVENT_COST;
use crate::shared::validation::{looks_like_email, normalize_entries, normalize_optional};

/// Normalize raw editor content and, when it is headed for review, check it is complete.
///
/// Drafts only get normalization plus the type-level range checks; every
/// required-field rule is skipped so half-filled work can be saved.
pub fn prepare_for_submit(
    raw: SubmissionContent,
    intended_status: SubmissionStatus,
) -> Result<SubmissionContent> {
    let content = normalize(raw);

    if intended_status == SubmissionStatus::Pending {
        check_required(&content)?;
    }
    check_ranges(&content)?;

    Ok(content)
}

fn normalize(raw: SubmissionContent) -> SubmissionContent {
    let details = match raw.details {
        SubmissionDetails::Project(mut p) => {
            p.objectives = normalize_entries(p.objectives);
            p.timeline = p.timeline.trim().to_string();
            p.budget = normalize_optional(p.budget);
            SubmissionDetails::Project(p)
        }
        SubmissionDetails::Event(mut e) => {
            e.agenda = normalize_entries(e.agenda);
            e.cost = match e.cost.trim() {
                "" => DEFAULT_EVENT_COST.to_string(),
                cost => cost.to_string(),
            };
            SubmissionDetails::Event(e)
        }
    };

    SubmissionContent {
        title: raw.title.trim().to_string(),
        description: raw.description.trim().to_string(),
        location: raw.location.trim().to_string(),
        address: normalize_optional(raw.address),
        contact_email: raw.contact_email.trim().to_string(),
        contact_phone: normalize_optional(raw.contact_phone),
        target_audience: normalize_optional(raw.target_audience),
        duration_estimate: normalize_optional(raw.duration_estimate),
        notes: normalize_optional(raw.notes),
        requirements: normalize_entries(raw.requirements),
        image: normalize_optional(raw.image),
        details,
        ..raw
    }
}

fn check_required(content: &SubmissionContent) -> Result<()> {
    let missing: Vec<String> = content
        .kind()
        .descriptor()
        .required_fields
        .iter()
        .filter(|field| field.is_missing(content))
        .map(|field| field.wire_name().to_string())
        .collect();

    if !missing.is_empty() {
        return Err(AppError::MissingFields(missing));
    }

    if !looks_like_email(&content.contact_email) {
        return Err(AppError::Validation(
            "contactEmail must be a valid email address".to_string(),
        ));
    }

    Ok(())
}

fn check_ranges(content: &SubmissionContent) -> Result<()> {
    let scale = match &content.details {
        SubmissionDetails::Project(p) => ("expectedVolunteers", p.expected_volunteers),
        SubmissionDetails::Event(e) => ("expectedAttendees", e.expected_attendees),
    };
    if scale.1 < 1 {
        return Err(AppError::Validation(format!("{} must be at least 1", scale.0)));
    }

    if let Some(coords) = &content.coordinates {
        if !coords.in_range() {
            return Err(AppError::Validation(
                "coordinates are out of range".to_string(),
            ));
        }
    }

    checklist::validate_snapshot(&content.checklist)?;
    reminder::validate_snapshot(&content.reminders)?;
    head::validate_snapshot(&content.heads)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::submissions::models::{Coordinates, SubmissionKind};
    use crate::shared::test_helpers::{complete_event, complete_project};

    #[test]
    fn test_pending_project_missing_title_lists_field() {
        let mut content = complete_project();
        content.title = "   ".to_string();

        let err = prepare_for_submit(content, SubmissionStatus::Pending).unwrap_err();
        match err {
            AppError::MissingFields(fields) => assert_eq!(fields, vec!["title".to_string()]),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_pending_lists_every_missing_field_in_order() {
        let content = SubmissionContent::empty(SubmissionKind::Event);

        let err = prepare_for_submit(content, SubmissionStatus::Pending).unwrap_err();
        let AppError::MissingFields(fields) = err else {
            panic!("expected missing fields");
        };
        assert_eq!(
            fields,
            vec![
                "title",
                "description",
                "date",
                "time",
                "location",
                "registrationDeadline",
                "contactEmail"
            ]
        );
    }

    #[test]
    fn test_draft_skips_required_checks() {
        let content = SubmissionContent::empty(SubmissionKind::Project);
        let prepared = prepare_for_submit(content, SubmissionStatus::Draft).unwrap();
        assert_eq!(prepared.title, "");
    }

    #[test]
    fn test_normalizes_lists_and_optionals() {
        let mut content = complete_project();
        content.requirements = vec![" gloves ".into(), "".into(), "  ".into(), "bags".into()];
        content.notes = Some("   ".to_string());
        if let SubmissionDetails::Project(p) = &mut content.details {
            p.objectives = vec!["".into(), " plant 50 trees ".into()];
        }

        let prepared = prepare_for_submit(content, SubmissionStatus::Pending).unwrap();
        assert_eq!(prepared.requirements, vec!["gloves", "bags"]);
        assert_eq!(prepared.notes, None);
        let SubmissionDetails::Project(p) = prepared.details else {
            panic!("expected project details");
        };
        assert_eq!(p.objectives, vec!["plant 50 trees"]);
    }

    #[test]
    fn test_blank_event_cost_defaults_to_free() {
        let mut content = complete_event();
        if let SubmissionDetails::Event(e) = &mut content.details {
            e.cost = "  ".to_string();
        }

        let prepared = prepare_for_submit(content, SubmissionStatus::Pending).unwrap();
        let SubmissionDetails::Event(e) = prepared.details else {
            panic!("expected event details");
        };
        assert_eq!(e.cost, "Free");
    }

    #[test]
    fn test_pending_rejects_email_without_at() {
        let mut content = complete_event();
        content.contact_email = "crew.example.org".to_string();

        let err = prepare_for_submit(content, SubmissionStatus::Pending).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_range_checks_apply_to_drafts() {
        let mut content = SubmissionContent::empty(SubmissionKind::Project);
        if let SubmissionDetails::Project(p) = &mut content.details {
            p.expected_volunteers = 0;
        }
        assert!(matches!(
            prepare_for_submit(content, SubmissionStatus::Draft),
            Err(AppError::Validation(_))
        ));

        let mut content = SubmissionContent::empty(SubmissionKind::Event);
        content.coordinates = Some(Coordinates {
            latitude: 120.0,
            longitude: 10.0,
        });
        assert!(matches!(
            prepare_for_submit(content, SubmissionStatus::Draft),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_prepare_is_idempotent() {
        let once = prepare_for_submit(complete_event(), SubmissionStatus::Pending).unwrap();
        let twice = prepare_for_submit(once.clone(), SubmissionStatus::Pending).unwrap();
        assert_eq!(once, twice);
    }
}
