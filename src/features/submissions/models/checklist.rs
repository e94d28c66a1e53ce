//! Task checklist attached to a submission.
//!
//! Every operation takes the current snapshot and returns the next one; the
//! caller writes the whole list back to the submission.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::shared::ids::IdGenerator;
use crate::shared::validation::is_blank;

/// A completable task. `completed_at`/`completed_by` are set iff `completed`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistItem {
    pub id: Uuid,
    pub text: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_by: Option<String>,
}

pub fn add(
    items: &[ChecklistItem],
    text: &str,
    ids: &dyn IdGenerator,
) -> Result<Vec<ChecklistItem>> {
    if is_blank(text) {
        return Err(AppError::Validation(
            "Checklist item text is required".to_string(),
        ));
    }

    let mut next = items.to_vec();
    next.push(ChecklistItem {
        id: ids.next_id(),
        text: text.trim().to_string(),
        completed: false,
        completed_at: None,
        completed_by: None,
    });
    Ok(next)
}

/// Flip completion of `id`. Returns the snapshot unchanged when
/// `completion_allowed` is false or the id is absent.
pub fn toggle(
    items: &[ChecklistItem],
    id: Uuid,
    acting_user: &str,
    completion_allowed: bool,
    now: DateTime<Utc>,
) -> Vec<ChecklistItem> {
    if !completion_allowed {
        return items.to_vec();
    }

    items
        .iter()
        .cloned()
        .map(|mut item| {
            if item.id == id {
                if item.completed {
                    item.completed = false;
                    item.completed_at = None;
                    item.completed_by = None;
                } else {
                    item.completed = true;
                    item.completed_at = Some(now);
                    item.completed_by = Some(acting_user.to_string());
                }
            }
            item
        })
        .collect()
}

pub fn remove(items: &[ChecklistItem], id: Uuid) -> Vec<ChecklistItem> {
    items.iter().filter(|i| i.id != id).cloned().collect()
}

pub fn contains(items: &[ChecklistItem], id: Uuid) -> bool {
    items.iter().any(|i| i.id == id)
}

/// completed / total, 0 for an empty list
pub fn completion_ratio(items: &[ChecklistItem]) -> f64 {
    if items.is_empty() {
        return 0.0;
    }
    let done = items.iter().filter(|i| i.completed).count();
    done as f64 / items.len() as f64
}

/// Take completion state from `stored` for every item of an editor snapshot.
///
/// Completion only changes through `toggle`; items new to the list start open.
pub fn carry_completion(
    stored: &[ChecklistItem],
    incoming: Vec<ChecklistItem>,
) -> Vec<ChecklistItem> {
    incoming
        .into_iter()
        .map(|mut item| {
            match stored.iter().find(|s| s.id == item.id) {
                Some(previous) => {
                    item.completed = previous.completed;
                    item.completed_at = previous.completed_at;
                    item.completed_by = previous.completed_by.clone();
                }
                None => {
                    item.completed = false;
                    item.completed_at = None;
                    item.completed_by = None;
                }
            }
            item
        })
        .collect()
}

/// Check a client-supplied snapshot before it replaces the stored one.
pub fn validate_snapshot(items: &[ChecklistItem]) -> Result<()> {
    let mut seen = HashSet::new();
    for item in items {
        if !seen.insert(item.id) {
            return Err(AppError::Validation(format!(
                "Duplicate checklist item id {}",
                item.id
            )));
        }
        if is_blank(&item.text) {
            return Err(AppError::Validation(
                "Checklist item text is required".to_string(),
            ));
        }
        if item.completed != (item.completed_at.is_some() && item.completed_by.is_some())
            || (!item.completed && (item.completed_at.is_some() || item.completed_by.is_some()))
        {
            return Err(AppError::Validation(format!(
                "Checklist item {} has inconsistent completion data",
                item.id
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::ids::SequentialIds;

    fn three_items(ids: &SequentialIds) -> Vec<ChecklistItem> {
        let items = add(&[], "Book venue", ids).unwrap();
        let items = add(&items, "Print flyers", ids).unwrap();
        add(&items, "Order snacks", ids).unwrap()
    }

    fn assert_completion_invariant(items: &[ChecklistItem]) {
        for item in items {
            assert_eq!(item.completed, item.completed_at.is_some());
            assert_eq!(item.completed, item.completed_by.is_some());
        }
    }

    #[test]
    fn test_add_appends_incomplete_item() {
        let ids = SequentialIds::default();
        let items = add(&[], "  Book venue  ", &ids).unwrap();

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, SequentialIds::id(1));
        assert_eq!(items[0].text, "Book venue");
        assert!(!items[0].completed);
        assert_completion_invariant(&items);
    }

    #[test]
    fn test_add_rejects_blank_text() {
        let ids = SequentialIds::default();
        let existing = add(&[], "Keep me", &ids).unwrap();

        let err = add(&existing, "   ", &ids).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(existing.len(), 1);
    }

    #[test]
    fn test_toggle_sets_and_clears_completion() {
        let ids = SequentialIds::default();
        let items = three_items(&ids);
        let target = items[1].id;
        let now = Utc::now();

        let done = toggle(&items, target, "volunteer-7", true, now);
        assert!(done[1].completed);
        assert_eq!(done[1].completed_at, Some(now));
        assert_eq!(done[1].completed_by.as_deref(), Some("volunteer-7"));
        assert_completion_invariant(&done);

        let undone = toggle(&done, target, "volunteer-7", true, now);
        assert!(!undone[1].completed);
        assert_eq!(undone[1].completed_at, None);
        assert_eq!(undone[1].completed_by, None);
        assert_completion_invariant(&undone);
    }

    #[test]
    fn test_toggle_is_noop_when_not_allowed() {
        let ids = SequentialIds::default();
        let items = three_items(&ids);

        let unchanged = toggle(&items, items[0].id, "author", false, Utc::now());
        assert_eq!(unchanged, items);
    }

    #[test]
    fn test_remove_is_idempotent() {
        let ids = SequentialIds::default();
        let items = three_items(&ids);
        let target = items[0].id;

        let once = remove(&items, target);
        let twice = remove(&once, target);
        assert_eq!(once.len(), 2);
        assert_eq!(once, twice);

        let missing = remove(&items, Uuid::nil());
        assert_eq!(missing, items);
    }

    #[test]
    fn test_completion_ratio() {
        let ids = SequentialIds::default();
        assert_eq!(completion_ratio(&[]), 0.0);

        let items = three_items(&ids);
        let now = Utc::now();
        let one_done = toggle(&items, items[0].id, "v", true, now);
        assert!((completion_ratio(&one_done) - 1.0 / 3.0).abs() < 1e-9);

        let two_done = toggle(&one_done, items[2].id, "v", true, now);
        assert!((completion_ratio(&two_done) - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_carry_completion_keeps_stored_state() {
        let ids = SequentialIds::default();
        let stored = three_items(&ids);
        let now = Utc::now();
        let stored = toggle(&stored, stored[0].id, "volunteer-7", true, now);

        let mut incoming = stored.clone();
        // Editor reopens a completed task and ticks another off itself
        incoming[0].completed = false;
        incoming[0].completed_at = None;
        incoming[0].completed_by = None;
        incoming[1].completed = true;
        incoming[1].completed_at = Some(now);
        incoming[1].completed_by = Some("someone-else".to_string());
        incoming[2].text = "Order snacks and water".to_string();

        let carried = carry_completion(&stored, incoming);
        assert!(carried[0].completed);
        assert_eq!(carried[0].completed_by.as_deref(), Some("volunteer-7"));
        assert!(!carried[1].completed);
        assert_eq!(carried[1].completed_by, None);
        assert_eq!(carried[2].text, "Order snacks and water");
        assert_completion_invariant(&carried);
    }

    #[test]
    fn test_carry_completion_opens_new_items() {
        let forged = ChecklistItem {
            id: Uuid::from_u128(99),
            text: "Already done, honest".to_string(),
            completed: true,
            completed_at: Some(Utc::now()),
            completed_by: Some("volunteer-7".to_string()),
        };

        let carried = carry_completion(&[], vec![forged]);
        assert!(!carried[0].completed);
        assert_completion_invariant(&carried);
    }

    #[test]
    fn test_validate_snapshot() {
        let ids = SequentialIds::default();
        let items = three_items(&ids);
        assert!(validate_snapshot(&items).is_ok());

        let mut forged = items.clone();
        forged[0].completed = true;
        assert!(validate_snapshot(&forged).is_err());

        let mut stale = items.clone();
        stale[1].completed_by = Some("someone".to_string());
        assert!(validate_snapshot(&stale).is_err());

        let mut duplicated = items.clone();
        duplicated[2].id = duplicated[0].id;
        assert!(validate_snapshot(&duplicated).is_err());
    }
}
