use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::shared::ids::IdGenerator;
use crate::shared::validation::{is_blank, normalize_optional};

/// Organizer shown on a submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HeadInfo {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub designation: String,
    /// Durable URL of the uploaded photo
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HeadDraft {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub designation: String,
    #[serde(default)]
    pub image: Option<String>,
}

pub fn add(heads: &[HeadInfo], draft: HeadDraft, ids: &dyn IdGenerator) -> Result<Vec<HeadInfo>> {
    if is_blank(&draft.name) {
        return Err(AppError::Validation("Organizer name is required".to_string()));
    }

    let mut next = heads.to_vec();
    next.push(HeadInfo {
        id: ids.next_id(),
        name: draft.name.trim().to_string(),
        designation: draft.designation.trim().to_string(),
        image: normalize_optional(draft.image),
    });
    Ok(next)
}

/// Replace name, designation and image of an existing entry
pub fn update(heads: &[HeadInfo], id: Uuid, draft: HeadDraft) -> Result<Vec<HeadInfo>> {
    if is_blank(&draft.name) {
        return Err(AppError::Validation("Organizer name is required".to_string()));
    }
    if !heads.iter().any(|h| h.id == id) {
        return Err(AppError::NotFound(format!("Organizer {} not found", id)));
    }

    let image = normalize_optional(draft.image);
    Ok(heads
        .iter()
        .cloned()
        .map(|mut h| {
            if h.id == id {
                h.name = draft.name.trim().to_string();
                h.designation = draft.designation.trim().to_string();
                h.image = image.clone();
            }
            h
        })
        .collect())
}

pub fn set_image(heads: &[HeadInfo], id: Uuid, image: Option<String>) -> Result<Vec<HeadInfo>> {
    let current = heads
        .iter()
        .find(|h| h.id == id)
        .ok_or_else(|| AppError::NotFound(format!("Organizer {} not found", id)))?;

    update(
        heads,
        id,
        HeadDraft {
            name: current.name.clone(),
            designation: current.designation.clone(),
            image,
        },
    )
}

pub fn remove(heads: &[HeadInfo], id: Uuid) -> Vec<HeadInfo> {
    heads.iter().filter(|h| h.id != id).cloned().collect()
}

pub fn validate_snapshot(heads: &[HeadInfo]) -> Result<()> {
    let mut seen = std::collections::HashSet::new();
    for head in heads {
        if !seen.insert(head.id) {
            return Err(AppError::Validation(format!(
                "Duplicate organizer id {}",
                head.id
            )));
        }
        if is_blank(&head.name) {
            return Err(AppError::Validation("Organizer name is required".to_string()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::ids::SequentialIds;

    fn draft(name: &str) -> HeadDraft {
        HeadDraft {
            name: name.to_string(),
            designation: "Coordinator".to_string(),
            image: None,
        }
    }

    #[test]
    fn test_add_requires_name() {
        let ids = SequentialIds::default();
        assert!(matches!(
            add(&[], draft(" "), &ids),
            Err(AppError::Validation(_))
        ));

        let heads = add(&[], draft(" Rina "), &ids).unwrap();
        assert_eq!(heads[0].name, "Rina");
        assert_eq!(heads[0].id, SequentialIds::id(1));
    }

    #[test]
    fn test_update_and_set_image() {
        let ids = SequentialIds::default();
        let heads = add(&[], draft("Rina"), &ids).unwrap();
        let heads = add(&heads, draft("Budi"), &ids).unwrap();
        let budi = heads[1].id;

        let updated = update(
            &heads,
            budi,
            HeadDraft {
                name: "Budi S.".to_string(),
                designation: "Treasurer".to_string(),
                image: None,
            },
        )
        .unwrap();
        assert_eq!(updated[1].name, "Budi S.");
        assert_eq!(updated[1].designation, "Treasurer");
        assert_eq!(updated[0], heads[0]);

        let with_photo = set_image(
            &updated,
            budi,
            Some("https://cdn.example.org/heads/b.png".to_string()),
        )
        .unwrap();
        assert_eq!(
            with_photo[1].image.as_deref(),
            Some("https://cdn.example.org/heads/b.png")
        );
        assert_eq!(with_photo[1].name, "Budi S.");
    }

    #[test]
    fn test_update_unknown_is_not_found() {
        let ids = SequentialIds::default();
        let heads = add(&[], draft("Rina"), &ids).unwrap();

        assert!(matches!(
            update(&heads, Uuid::nil(), draft("X")),
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            set_image(&heads, Uuid::nil(), None),
            Err(AppError::NotFound(_))
        ));
    }

    #[test]
    fn test_remove_is_idempotent() {
        let ids = SequentialIds::default();
        let heads = add(&[], draft("Rina"), &ids).unwrap();
        let id = heads[0].id;

        let once = remove(&heads, id);
        assert!(once.is_empty());
        assert_eq!(remove(&once, id), once);
    }
}
