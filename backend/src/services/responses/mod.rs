//! Routes under `/api/responses`.
//!
//! - `POST /`: submit a response. Anonymous callers are recorded as `guest`.
//! - `GET /{response_id}`: one response (`USER` or `ADMIN`).
//! - `GET /bySurvey/{survey_id}`: all responses to a survey (`USER` or `ADMIN`).
//! - `GET /byUser/{user_id}?page=&size=`: one user's responses (`USER` or `ADMIN`).
//! - `GET /byCurrentUser?page=&size=`: the caller's own responses (`USER` or `ADMIN`).
//!
//! The listing endpoints answer `404 Not Found` when the result (or the
//! requested page) is empty.

mod create;
mod get;
mod list;

#[cfg(test)]
pub(crate) use create::create_response;
#[cfg(test)]
pub(crate) use get::get_response;
#[cfg(test)]
pub(crate) use list::{responses_by_survey, responses_by_user, responses_for_caller};

use actix_web::web::{get, post, scope};
use actix_web::Scope;

const API_PATH: &str = "/api/responses";

pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("", post().to(create::process))
        .route("/bySurvey/{survey_id}", get().to(list::by_survey))
        .route("/byUser/{user_id}", get().to(list::by_user))
        // Registered before `/{response_id}` so it is not read as an id.
        .route("/byCurrentUser", get().to(list::by_current_user))
        .route("/{response_id}", get().to(get::process))
}
