//! # Response validation
//!
//! A response is accepted only as a whole. The target survey must exist
//! (otherwise `NotFound`) and must not be soft-deleted; every answer must be a
//! JSON object and every key of every answer must name an element of the
//! survey. Any failure rejects the full submission as `InvalidInput`.

use crate::error::AppError;
use crate::store::SurveyStore;
use log::warn;
use serde_json::Value;
use std::collections::HashSet;
use survey_common::model::response::Answer;
use survey_common::model::survey::Survey;

/// Loads the target survey and checks `answers` against it.
pub fn validate_response(
    surveys: &dyn SurveyStore,
    survey_id: &str,
    answers: Vec<Value>,
) -> Result<Vec<Answer>, AppError> {
    let survey = surveys.find_survey(survey_id)?.ok_or_else(|| {
        warn!("Survey not found for ID: {survey_id}");
        AppError::NotFound(format!("Survey not found for ID: {survey_id}"))
    })?;

    check_answers(&survey, answers)
}

/// Checks `answers` against an already loaded survey.
pub fn check_answers(survey: &Survey, answers: Vec<Value>) -> Result<Vec<Answer>, AppError> {
    if survey.deleted {
        warn!("Survey is deleted for ID: {}", survey.id);
        return Err(AppError::InvalidInput(format!(
            "survey {} is deleted",
            survey.id
        )));
    }

    let names: HashSet<&str> = survey.element_names().collect();
    let mut accepted = Vec::with_capacity(answers.len());

    for (index, answer) in answers.into_iter().enumerate() {
        let Value::Object(map) = answer else {
            warn!("Invalid answer format for surveyId: {}", survey.id);
            return Err(AppError::InvalidInput(format!(
                "answer {index} is not an object"
            )));
        };

        if let Some(unknown) = map.keys().find(|key| !names.contains(key.as_str())) {
            warn!(
                "Invalid element name {unknown} in answers for surveyId: {}",
                survey.id
            );
            return Err(AppError::InvalidInput(format!(
                "unknown element name '{unknown}' for survey {}",
                survey.id
            )));
        }

        accepted.push(map);
    }

    Ok(accepted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::sqlite::SqliteStore;
    use serde_json::json;
    use std::collections::BTreeSet;
    use survey_common::model::survey::{Element, ElementType, Page};

    fn element(name: &str) -> Element {
        Element {
            id: format!("e-{name}"),
            element_type: ElementType::Text,
            name: name.into(),
            title: None,
            choices: None,
            is_required: None,
            rows: None,
            columns: None,
        }
    }

    fn survey_with(names: &[&str]) -> Survey {
        Survey {
            id: "s1".into(),
            title: "Feedback".into(),
            description: None,
            pages: vec![Page {
                name: "page1".into(),
                title: None,
                description: None,
                elements: names.iter().map(|n| element(n)).collect(),
            }],
            owner_id: "alice".into(),
            edit_access_user_ids: BTreeSet::new(),
            is_public: true,
            deleted: false,
        }
    }

    #[test]
    fn accepts_known_element_names() {
        let survey = survey_with(&["q1", "q2"]);
        let answers = check_answers(&survey, vec![json!({ "q1": "x" })]).unwrap();
        assert_eq!(answers.len(), 1);
        assert_eq!(answers[0]["q1"], "x");
    }

    #[test]
    fn unknown_name_rejects_everything() {
        let survey = survey_with(&["q1", "q2"]);
        let result = check_answers(
            &survey,
            vec![json!({ "q1": "x" }), json!({ "q1": "y", "q3": "z" })],
        );
        assert!(matches!(result, Err(AppError::InvalidInput(_))));

        let result = check_answers(&survey, vec![json!({ "q3": "x" })]);
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }

    #[test]
    fn non_object_answer_is_rejected() {
        let survey = survey_with(&["q1"]);
        let result = check_answers(&survey, vec![json!({ "q1": "x" }), json!(["q1"])]);
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }

    #[test]
    fn names_from_any_page_are_valid() {
        let mut survey = survey_with(&["q1"]);
        survey.pages.push(Page {
            name: "page2".into(),
            title: None,
            description: None,
            elements: vec![element("q9")],
        });
        assert!(check_answers(&survey, vec![json!({ "q1": true, "q9": ["a", "b"] })]).is_ok());
    }

    #[test]
    fn empty_answer_list_is_accepted() {
        let survey = survey_with(&["q1"]);
        assert!(check_answers(&survey, Vec::new()).unwrap().is_empty());
    }

    #[test]
    fn deleted_survey_is_invalid_input() {
        let mut survey = survey_with(&["q1"]);
        survey.deleted = true;
        let result = check_answers(&survey, vec![json!({ "q1": "x" })]);
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }

    #[test]
    fn missing_survey_is_not_found() {
        let store = SqliteStore::open_in_memory().unwrap();
        let result = validate_response(&store, "nope", vec![json!({ "q1": "x" })]);
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[test]
    fn deleted_survey_in_store_is_invalid_input() {
        let store = SqliteStore::open_in_memory().unwrap();
        store.insert_survey(&survey_with(&["q1"])).unwrap();
        store.set_survey_deleted("s1", true).unwrap();

        let result = validate_response(&store, "s1", vec![json!({ "q1": "x" })]);
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }
}
