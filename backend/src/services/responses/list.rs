//! Response listings: by survey, by user, and for the calling user.
//!
//! All three need the `USER` or `ADMIN` role. The per-user listings are paged
//! (`?page=&size=`, defaults `0` and `10`, `size` at least one), and an empty
//! result or an empty requested page is `404 Not Found`.

use crate::error::AppError;
use crate::identity::Identity;
use crate::state::AppState;
use crate::store::ResponseStore;
use actix_web::{web, HttpResponse};
use log::{info, warn};
use survey_common::model::page::{PageRequest, Paged};
use survey_common::model::response::Response;
use survey_common::requests::PageQuery;

/// `GET /api/responses/bySurvey/{survey_id}`
pub async fn by_survey(
    state: web::Data<AppState>,
    identity: Identity,
    survey_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    info!("API hit: GET /api/responses/bySurvey/{survey_id}");
    let store = state.responses.clone();
    let responses =
        web::block(move || responses_by_survey(store.as_ref(), &identity, &survey_id)).await??;
    Ok(HttpResponse::Ok().json(responses))
}

/// `GET /api/responses/byUser/{user_id}`
pub async fn by_user(
    state: web::Data<AppState>,
    identity: Identity,
    user_id: web::Path<String>,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse, AppError> {
    info!("API hit: GET /api/responses/byUser/{user_id}");
    let store = state.responses.clone();
    let request = PageRequest::from(query.into_inner());
    let page =
        web::block(move || responses_by_user(store.as_ref(), &identity, &user_id, request))
            .await??;
    Ok(HttpResponse::Ok().json(page))
}

/// `GET /api/responses/byCurrentUser`
pub async fn by_current_user(
    state: web::Data<AppState>,
    identity: Identity,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse, AppError> {
    info!("API hit: GET /api/responses/byCurrentUser");
    identity.require_user()?;
    let store = state.responses.clone();
    let request = PageRequest::from(query.into_inner());
    let page =
        web::block(move || responses_for_caller(store.as_ref(), &identity, request)).await??;
    Ok(HttpResponse::Ok().json(page))
}

pub(crate) fn responses_by_survey(
    store: &dyn ResponseStore,
    identity: &Identity,
    survey_id: &str,
) -> Result<Vec<Response>, AppError> {
    identity.require_user()?;
    let responses = store.find_responses_by_survey(survey_id)?;
    if responses.is_empty() {
        warn!("No responses found for SurveyId: {survey_id}");
        return Err(AppError::NotFound(format!(
            "No responses found for SurveyId: {survey_id}"
        )));
    }
    Ok(responses)
}

pub(crate) fn responses_by_user(
    store: &dyn ResponseStore,
    identity: &Identity,
    user_id: &str,
    request: PageRequest,
) -> Result<Paged<Response>, AppError> {
    identity.require_user()?;
    page_for_user(store, user_id, request)
}

/// Lists the caller's responses. Anonymous callers resolve to `guest`.
pub(crate) fn responses_for_caller(
    store: &dyn ResponseStore,
    identity: &Identity,
    request: PageRequest,
) -> Result<Paged<Response>, AppError> {
    page_for_user(store, identity.respondent_id(), request)
}

fn page_for_user(
    store: &dyn ResponseStore,
    user_id: &str,
    request: PageRequest,
) -> Result<Paged<Response>, AppError> {
    if request.size == 0 {
        return Err(AppError::InvalidInput(
            "page size must be at least one".to_string(),
        ));
    }

    let page = store.find_responses_by_user(user_id, request)?;
    if page.is_empty() {
        warn!("No responses found for userId: {user_id}");
        return Err(AppError::NotFound(format!(
            "No responses found for userId: {user_id}"
        )));
    }
    Ok(page)
}
