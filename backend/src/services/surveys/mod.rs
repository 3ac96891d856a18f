//! # Survey Service Module
//!
//! Routes under `/api/surveys`. Each sub-module holds one operation: an Actix
//! handler named `process` (or one per listing) that logs the hit, resolves
//! the caller and runs the synchronous service function on the blocking pool.
//!
//! ## Sub-modules:
//! - `create`: stores a new survey owned by the caller.
//! - `get`: returns one survey if the caller may view it.
//! - `edit`: replaces a survey's content, keeping owner, grantees and the deleted flag.
//! - `delete`: soft-deletes a survey.
//! - `list`: the caller's own surveys, and the admin-only listings.
//! - `mapping`: explicit payload-to-document field mapping.

mod create;
mod delete;
mod edit;
mod get;
mod list;
pub(crate) mod mapping;

#[cfg(test)]
pub(crate) use create::create_survey;
#[cfg(test)]
pub(crate) use delete::delete_survey;
#[cfg(test)]
pub(crate) use edit::edit_survey;
#[cfg(test)]
pub(crate) use get::get_survey;
#[cfg(test)]
pub(crate) use list::{all_surveys, surveys_by_owner, surveys_for_caller};

use actix_web::web::{delete, get, post, put, resource, scope};
use actix_web::Scope;

const API_PATH: &str = "/api/surveys";

/// Configures and returns the Actix `Scope` for all survey routes.
///
/// # Registered Routes:
///
/// *   **`POST /`**: create a survey (`USER` or `ADMIN`). The caller becomes the owner.
/// *   **`GET /`**: every survey including soft-deleted ones (admin).
/// *   **`GET /user`**: the caller's surveys, soft-deleted excluded (`USER` or `ADMIN`).
/// *   **`GET /owner/{owner_id}`**: surveys of one owner, soft-deleted excluded (admin).
/// *   **`GET /{survey_id}`**: one survey, subject to the view rule.
/// *   **`PUT /{survey_id}`**: edit (owner or edit-access grantee).
/// *   **`DELETE /{survey_id}`**: soft-delete (owner or edit-access grantee).
///
/// `/user` is registered ahead of `/{survey_id}` so it is not taken for an id.
pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .service(
            resource("")
                .route(post().to(create::process))
                .route(get().to(list::all)),
        )
        .route("/user", get().to(list::mine))
        .route("/owner/{owner_id}", get().to(list::by_owner))
        .service(
            resource("/{survey_id}")
                .route(get().to(get::process))
                .route(put().to(edit::process))
                .route(delete().to(delete::process)),
        )
}
