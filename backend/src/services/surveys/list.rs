//! Survey listings. Empty results are returned as empty arrays.

use crate::error::AppError;
use crate::identity::Identity;
use crate::state::AppState;
use crate::store::SurveyStore;
use actix_web::{web, HttpResponse};
use log::info;
use survey_common::model::survey::Survey;

/// `GET /api/surveys/user`
pub async fn mine(
    state: web::Data<AppState>,
    identity: Identity,
) -> Result<HttpResponse, AppError> {
    info!("API hit: GET /api/surveys/user");
    let store = state.surveys.clone();
    let surveys = web::block(move || surveys_for_caller(store.as_ref(), &identity)).await??;
    Ok(HttpResponse::Ok().json(surveys))
}

/// `GET /api/surveys/owner/{owner_id}`
pub async fn by_owner(
    state: web::Data<AppState>,
    identity: Identity,
    owner_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    info!("API hit: GET /api/surveys/owner/{owner_id}");
    let store = state.surveys.clone();
    let surveys =
        web::block(move || surveys_by_owner(store.as_ref(), &identity, &owner_id)).await??;
    Ok(HttpResponse::Ok().json(surveys))
}

/// `GET /api/surveys`
pub async fn all(
    state: web::Data<AppState>,
    identity: Identity,
) -> Result<HttpResponse, AppError> {
    info!("API hit: GET /api/surveys");
    let store = state.surveys.clone();
    let surveys = web::block(move || all_surveys(store.as_ref(), &identity)).await??;
    Ok(HttpResponse::Ok().json(surveys))
}

pub(crate) fn surveys_for_caller(
    store: &dyn SurveyStore,
    identity: &Identity,
) -> Result<Vec<Survey>, AppError> {
    let owner_id = identity.require_user()?;
    Ok(store.find_surveys_by_owner(owner_id)?)
}

pub(crate) fn surveys_by_owner(
    store: &dyn SurveyStore,
    identity: &Identity,
    owner_id: &str,
) -> Result<Vec<Survey>, AppError> {
    identity.require_admin()?;
    Ok(store.find_surveys_by_owner(owner_id)?)
}

/// Includes soft-deleted surveys.
pub(crate) fn all_surveys(
    store: &dyn SurveyStore,
    identity: &Identity,
) -> Result<Vec<Survey>, AppError> {
    identity.require_admin()?;
    Ok(store.find_all_surveys()?)
}
