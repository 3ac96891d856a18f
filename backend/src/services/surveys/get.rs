//! # Survey Retrieval Service
//!
//! `GET /api/surveys/{survey_id}`. The lookup happens before the access
//! check, so an unknown id is reported as `404 Not Found` while a survey the
//! caller may not see is `403 Forbidden`.

use crate::error::AppError;
use crate::identity::Identity;
use crate::policy::access::ensure_view;
use crate::state::AppState;
use crate::store::SurveyStore;
use actix_web::{web, HttpResponse};
use log::info;
use survey_common::model::survey::Survey;

pub async fn process(
    state: web::Data<AppState>,
    identity: Identity,
    survey_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    info!("API hit: GET /api/surveys/{survey_id}");
    let store = state.surveys.clone();
    let survey = web::block(move || get_survey(store.as_ref(), &identity, &survey_id)).await??;
    Ok(HttpResponse::Ok().json(survey))
}

pub(crate) fn get_survey(
    store: &dyn SurveyStore,
    identity: &Identity,
    survey_id: &str,
) -> Result<Survey, AppError> {
    let survey = store
        .find_survey(survey_id)?
        .ok_or_else(|| AppError::NotFound(format!("Survey not found for ID: {survey_id}")))?;

    ensure_view(&survey, identity)?;
    Ok(survey)
}
