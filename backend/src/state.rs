//! Application state shared across workers.

use crate::store::{ResponseStore, SurveyStore};
use std::sync::Arc;

/// Shared handles injected into every handler as `web::Data<AppState>`.
///
/// The two collections are separate trait objects so they can be backed by
/// different stores, though `main` wires both to the same SQLite file.
#[derive(Clone)]
pub struct AppState {
    pub surveys: Arc<dyn SurveyStore>,
    pub responses: Arc<dyn ResponseStore>,
}
