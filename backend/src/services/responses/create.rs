//! # Response Submission Service
//!
//! `POST /api/responses`. The body names a survey and carries the answers;
//! any `id` or `userId` it contains is ignored. The answers are validated as
//! a whole against the target survey (`policy::answers`), then stored with a
//! generated id and the caller's identity, or `guest` for anonymous callers.
//!
//! Validation and the insert are separate store operations. A survey deleted
//! in between still receives the response.

use crate::error::AppError;
use crate::identity::Identity;
use crate::policy::answers::validate_response;
use crate::state::AppState;
use crate::store::{ResponseStore, SurveyStore};
use actix_web::{web, HttpResponse};
use log::info;
use survey_common::model::response::Response;
use survey_common::requests::ResponsePayload;
use uuid::Uuid;

pub async fn process(
    state: web::Data<AppState>,
    identity: Identity,
    payload: web::Json<ResponsePayload>,
) -> Result<HttpResponse, AppError> {
    info!("API hit: POST /api/responses");
    let surveys = state.surveys.clone();
    let responses = state.responses.clone();
    let response = web::block(move || {
        create_response(
            surveys.as_ref(),
            responses.as_ref(),
            &identity,
            payload.into_inner(),
        )
    })
    .await??;
    Ok(HttpResponse::Ok().json(response))
}

pub(crate) fn create_response(
    surveys: &dyn SurveyStore,
    responses: &dyn ResponseStore,
    identity: &Identity,
    payload: ResponsePayload,
) -> Result<Response, AppError> {
    let user_id = identity.respondent_id();
    if identity.is_authenticated() {
        info!("Attempting to create response by user: {user_id}");
    } else {
        info!("Attempting to create anonymous response as {user_id}");
    }

    let answers = validate_response(surveys, &payload.survey_id, payload.answers)?;

    let response = Response {
        id: Uuid::new_v4().to_string(),
        user_id: user_id.to_string(),
        survey_id: payload.survey_id,
        answers,
    };
    responses.insert_response(&response)?;
    info!(
        "Response {} created for survey {}",
        response.id, response.survey_id
    );
    Ok(response)
}
