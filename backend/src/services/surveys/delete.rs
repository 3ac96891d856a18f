//! # Survey Deletion Service
//!
//! `DELETE /api/surveys/{survey_id}` never removes the document. It sets the
//! `deleted` flag, after which the survey drops out of the owner listings and
//! stops accepting responses. Stored responses are left untouched.
//!
//! The mutate rule applies here exactly as for edits: owner or edit-access
//! grantee, and the administrator role alone does not qualify.

use crate::error::AppError;
use crate::identity::Identity;
use crate::policy::access::ensure_mutate;
use crate::state::AppState;
use crate::store::SurveyStore;
use actix_web::{web, HttpResponse};
use log::info;
use serde_json::json;

/// Actix handler for `DELETE /api/surveys/{survey_id}`.
///
/// # Arguments
/// * `survey_id` - Id of the survey to flag as deleted, from the URL path.
///
/// # Returns
/// - `200 OK` with `{"message": "Survey deleted successfully"}`.
/// - `403 Forbidden` if the caller is neither owner nor grantee.
/// - `404 Not Found` for an unknown id.
pub async fn process(
    state: web::Data<AppState>,
    identity: Identity,
    survey_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    info!("API hit: DELETE /api/surveys/{survey_id}");
    let store = state.surveys.clone();
    web::block(move || delete_survey(store.as_ref(), &identity, &survey_id)).await??;
    Ok(HttpResponse::Ok().json(json!({ "message": "Survey deleted successfully" })))
}

/// Sets the soft-delete flag.
///
/// The flag is written whatever its current value, so deleting twice leaves
/// the survey deleted. Only an unknown id is an error.
pub(crate) fn delete_survey(
    store: &dyn SurveyStore,
    identity: &Identity,
    survey_id: &str,
) -> Result<(), AppError> {
    identity.require_user()?;

    let not_found =
        || AppError::NotFound(format!("Survey not found or already deleted for ID: {survey_id}"));

    let survey = store.find_survey(survey_id)?.ok_or_else(not_found)?;
    ensure_mutate(&survey, identity)?;

    if !store.set_survey_deleted(survey_id, true)? {
        return Err(not_found());
    }
    info!("Survey {survey_id} deleted by {}", identity.respondent_id());
    Ok(())
}
