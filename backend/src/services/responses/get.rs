//! # Response Retrieval Service
//!
//! `GET /api/responses/{response_id}` returns one stored response to any
//! caller holding the `USER` or `ADMIN` role. There is no per-survey check.

use crate::error::AppError;
use crate::identity::Identity;
use crate::state::AppState;
use crate::store::ResponseStore;
use actix_web::{web, HttpResponse};
use log::{info, warn};
use survey_common::model::response::Response;

/// Actix handler for `GET /api/responses/{response_id}`.
///
/// # Returns
/// - `200 OK` with the `Response`.
/// - `404 Not Found` if no response has that id.
pub async fn process(
    state: web::Data<AppState>,
    identity: Identity,
    response_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    info!("API hit: GET /api/responses/{response_id}");
    let store = state.responses.clone();
    let response =
        web::block(move || get_response(store.as_ref(), &identity, &response_id)).await??;
    Ok(HttpResponse::Ok().json(response))
}

pub(crate) fn get_response(
    store: &dyn ResponseStore,
    identity: &Identity,
    response_id: &str,
) -> Result<Response, AppError> {
    identity.require_user()?;
    store.find_response(response_id)?.ok_or_else(|| {
        warn!("Response not found for ID: {response_id}");
        AppError::NotFound(format!("Response not found for ID: {response_id}"))
    })
}
