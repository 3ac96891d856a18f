//! Field-by-field mapping from request payloads to stored survey documents.
//!
//! Server-controlled fields are written here and nowhere else: the survey id
//! and owner on create, owner / edit-access / deleted carried over from the
//! stored document on edit, and a fresh id for every element on both.

use crate::error::AppError;
use std::collections::HashSet;
use survey_common::model::survey::{Element, Page, Survey};
use survey_common::requests::{ElementPayload, PagePayload, SurveyPayload};
use uuid::Uuid;

pub fn new_survey(payload: SurveyPayload, owner_id: &str) -> Survey {
    Survey {
        id: Uuid::new_v4().to_string(),
        title: payload.title,
        description: payload.description,
        pages: map_pages(payload.pages),
        owner_id: owner_id.to_string(),
        edit_access_user_ids: payload.edit_access_user_ids,
        is_public: payload.is_public,
        deleted: false,
    }
}

/// Applies an edit. `edit_access_user_ids` in the payload is ignored.
pub fn edited_survey(existing: Survey, payload: SurveyPayload) -> Survey {
    Survey {
        id: existing.id,
        title: payload.title,
        description: payload.description,
        pages: map_pages(payload.pages),
        owner_id: existing.owner_id,
        edit_access_user_ids: existing.edit_access_user_ids,
        is_public: payload.is_public,
        deleted: existing.deleted,
    }
}

/// Element names are the answer correlation key, so they must be present
/// and unique across all pages of a survey.
pub fn check_element_names(pages: &[PagePayload]) -> Result<(), AppError> {
    let mut seen = HashSet::new();
    for element in pages.iter().flat_map(|page| page.elements.iter()) {
        let name = element.name.trim();
        if name.is_empty() {
            return Err(AppError::InvalidInput(
                "every element needs a name".to_string(),
            ));
        }
        if !seen.insert(name) {
            return Err(AppError::InvalidInput(format!(
                "duplicate element name '{name}'"
            )));
        }
    }
    Ok(())
}

fn map_pages(pages: Vec<PagePayload>) -> Vec<Page> {
    pages
        .into_iter()
        .map(|page| Page {
            name: page.name,
            title: page.title,
            description: page.description,
            elements: page.elements.into_iter().map(map_element).collect(),
        })
        .collect()
}

fn map_element(element: ElementPayload) -> Element {
    Element {
        id: Uuid::new_v4().to_string(),
        element_type: element.element_type,
        name: element.name,
        title: element.title,
        choices: element.choices,
        is_required: element.is_required,
        rows: element.rows,
        columns: element.columns,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::BTreeSet;

    fn payload(value: serde_json::Value) -> SurveyPayload {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn create_assigns_owner_and_fresh_ids() {
        let survey = new_survey(
            payload(json!({
                "title": "Lunch",
                "editAccessUserIds": ["bob"],
                "pages": [
                    { "name": "p1", "elements": [{ "type": "text", "name": "q1" }] },
                    { "name": "p2", "elements": [{ "type": "boolean", "name": "q2" }] }
                ]
            })),
            "alice",
        );

        assert_eq!(survey.owner_id, "alice");
        assert!(!survey.deleted);
        assert!(Uuid::parse_str(&survey.id).is_ok());
        assert_eq!(survey.edit_access_user_ids, BTreeSet::from(["bob".to_string()]));
        // Each page keeps only its own elements.
        assert_eq!(survey.pages[0].elements.len(), 1);
        assert_eq!(survey.pages[1].elements[0].name, "q2");
        assert_ne!(survey.pages[0].elements[0].id, survey.pages[1].elements[0].id);
    }

    #[test]
    fn edit_keeps_server_controlled_fields() {
        let mut existing = new_survey(
            payload(json!({
                "title": "Old",
                "editAccessUserIds": ["carol"],
                "pages": [{ "name": "p1", "elements": [{ "type": "text", "name": "q1" }] }]
            })),
            "alice",
        );
        existing.deleted = true;
        let old_element_id = existing.pages[0].elements[0].id.clone();

        let edited = edited_survey(
            existing.clone(),
            payload(json!({
                "ownerId": "mallory",
                "editAccessUserIds": ["mallory"],
                "title": "New",
                "isPublic": true,
                "pages": [{ "name": "p1", "elements": [{ "id": old_element_id, "type": "text", "name": "q1" }] }]
            })),
        );

        assert_eq!(edited.id, existing.id);
        assert_eq!(edited.owner_id, "alice");
        assert_eq!(edited.edit_access_user_ids, existing.edit_access_user_ids);
        assert!(edited.deleted);
        assert_eq!(edited.title, "New");
        assert!(edited.is_public);
        assert_eq!(edited.pages[0].elements[0].name, "q1");
        assert_ne!(edited.pages[0].elements[0].id, old_element_id);
    }

    #[test]
    fn element_names_must_be_unique_across_pages() {
        let duplicated = payload(json!({
            "pages": [
                { "elements": [{ "type": "text", "name": "q1" }] },
                { "elements": [{ "type": "text", "name": "q1" }] }
            ]
        }));
        assert!(matches!(
            check_element_names(&duplicated.pages),
            Err(AppError::InvalidInput(_))
        ));

        let blank = payload(json!({
            "pages": [{ "elements": [{ "type": "text", "name": " " }] }]
        }));
        assert!(check_element_names(&blank.pages).is_err());

        let fine = payload(json!({
            "pages": [{ "elements": [{ "type": "text", "name": "q1" }, { "type": "text", "name": "q2" }] }]
        }));
        assert!(check_element_names(&fine.pages).is_ok());
    }
}
