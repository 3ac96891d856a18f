//! # Survey Edit Service
//!
//! `PUT /api/surveys/{survey_id}` replaces the title, description, pages and
//! visibility of a survey.
//!
//! ## Workflow
//!
//! 1.  The stored survey is loaded; an unknown id is `404 Not Found`.
//! 2.  The caller must be the owner or an edit-access grantee. The
//!     administrator role alone is not enough (`403 Forbidden`).
//! 3.  Element names in the payload are checked for blanks and duplicates.
//! 4.  `mapping::edited_survey` builds the new document. Owner, edit-access
//!     set and deleted flag come from the stored survey, and every element
//!     gets a new id. Answers stay correlated only through element names.
//! 5.  The document is written back. Concurrent edits are last-write-wins.

use super::mapping::{check_element_names, edited_survey};
use crate::error::AppError;
use crate::identity::Identity;
use crate::policy::access::ensure_mutate;
use crate::state::AppState;
use crate::store::SurveyStore;
use actix_web::{web, HttpResponse};
use log::info;
use survey_common::model::survey::Survey;
use survey_common::requests::SurveyPayload;

pub async fn process(
    state: web::Data<AppState>,
    identity: Identity,
    survey_id: web::Path<String>,
    payload: web::Json<SurveyPayload>,
) -> Result<HttpResponse, AppError> {
    info!("API hit: PUT /api/surveys/{survey_id}");
    let store = state.surveys.clone();
    let survey = web::block(move || {
        edit_survey(store.as_ref(), &identity, &survey_id, payload.into_inner())
    })
    .await??;
    Ok(HttpResponse::Ok().json(survey))
}

pub(crate) fn edit_survey(
    store: &dyn SurveyStore,
    identity: &Identity,
    survey_id: &str,
    payload: SurveyPayload,
) -> Result<Survey, AppError> {
    identity.require_user()?;

    let existing = store
        .find_survey(survey_id)?
        .ok_or_else(|| AppError::NotFound(format!("Survey not found for ID: {survey_id}")))?;

    ensure_mutate(&existing, identity)?;
    check_element_names(&payload.pages)?;

    let updated = edited_survey(existing, payload);
    if !store.update_survey(&updated)? {
        return Err(AppError::NotFound(format!(
            "Survey not found for ID: {survey_id}"
        )));
    }

    info!("Survey {} edited by {}", updated.id, identity.respondent_id());
    Ok(updated)
}
