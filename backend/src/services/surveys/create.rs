//! # Survey Creation Service
//!
//! Backend logic for `POST /api/surveys`.
//!
//! ## Workflow
//!
//! 1.  **HTTP Request**: `process` receives the JSON `SurveyPayload` and the
//!     resolved `Identity`, then hands both to `create_survey` on the blocking pool.
//!
//! 2.  **Guard**: the caller needs the `USER` or `ADMIN` role. Anonymous callers
//!     get `401`, tokens with neither role get `403`.
//!
//! 3.  **Element names**: every element needs a non-blank name that no other
//!     element in the survey uses, on any page.
//!
//! 4.  **Mapping**: `mapping::new_survey` assigns a fresh survey id, fresh
//!     element ids, the caller as owner and `deleted = false`. Ids or owner
//!     values sent by the client never reach this point.
//!
//! 5.  **Persistence**: the document is inserted and returned as `200 OK`.

use super::mapping::{check_element_names, new_survey};
use crate::error::AppError;
use crate::identity::Identity;
use crate::state::AppState;
use crate::store::SurveyStore;
use actix_web::{web, HttpResponse};
use log::info;
use survey_common::model::survey::Survey;
use survey_common::requests::SurveyPayload;

/// Actix handler for `POST /api/surveys`.
///
/// # Arguments
/// * `state` - Shared stores.
/// * `identity` - The caller, resolved from the bearer token.
/// * `payload` - Title, description, pages, grantees and visibility.
///
/// # Returns
/// - `200 OK` with the stored survey, including its generated id and owner.
/// - `400 Bad Request` if element names are blank or repeated.
/// - `401 Unauthorized` for anonymous callers.
/// - `403 Forbidden` for tokens without the `USER` or `ADMIN` role.
pub async fn process(
    state: web::Data<AppState>,
    identity: Identity,
    payload: web::Json<SurveyPayload>,
) -> Result<HttpResponse, AppError> {
    info!("API hit: POST /api/surveys");
    let store = state.surveys.clone();
    let survey =
        web::block(move || create_survey(store.as_ref(), &identity, payload.into_inner()))
            .await??;
    Ok(HttpResponse::Ok().json(survey))
}

pub(crate) fn create_survey(
    store: &dyn SurveyStore,
    identity: &Identity,
    payload: SurveyPayload,
) -> Result<Survey, AppError> {
    let owner_id = identity.require_user()?;
    check_element_names(&payload.pages)?;

    let survey = new_survey(payload, owner_id);
    store.insert_survey(&survey)?;
    info!("Survey created: {} by {}", survey.id, survey.owner_id);
    Ok(survey)
}
