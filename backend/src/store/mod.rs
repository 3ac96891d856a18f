//! # Persistence
//!
//! Two document collections, surveys and responses, each behind its own
//! trait so services can be exercised against any backing store. Every
//! operation touches a single document and is atomic at that granularity;
//! there are no multi-document transactions.
//!
//! - `sqlite`: the shipped implementation, one JSON document per row.

pub mod sqlite;

use survey_common::model::page::{PageRequest, Paged};
use survey_common::model::response::Response;
use survey_common::model::survey::Survey;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("sqlite: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("document codec: {0}")]
    Codec(#[from] serde_json::Error),

    #[error("store connection lock poisoned")]
    Poisoned,
}

pub trait SurveyStore: Send + Sync {
    fn insert_survey(&self, survey: &Survey) -> Result<(), StoreError>;

    fn find_survey(&self, id: &str) -> Result<Option<Survey>, StoreError>;

    /// Surveys owned by `owner_id`, soft-deleted ones excluded.
    fn find_surveys_by_owner(&self, owner_id: &str) -> Result<Vec<Survey>, StoreError>;

    /// Every survey, soft-deleted ones included.
    fn find_all_surveys(&self) -> Result<Vec<Survey>, StoreError>;

    /// Replaces the stored document with the same id. Returns false if no
    /// such document exists.
    fn update_survey(&self, survey: &Survey) -> Result<bool, StoreError>;

    /// Sets the soft-delete flag. Returns false if the id is unknown.
    fn set_survey_deleted(&self, id: &str, deleted: bool) -> Result<bool, StoreError>;
}

pub trait ResponseStore: Send + Sync {
    fn insert_response(&self, response: &Response) -> Result<(), StoreError>;

    fn find_response(&self, id: &str) -> Result<Option<Response>, StoreError>;

    fn find_responses_by_survey(&self, survey_id: &str) -> Result<Vec<Response>, StoreError>;

    fn find_responses_by_user(
        &self,
        user_id: &str,
        request: PageRequest,
    ) -> Result<Paged<Response>, StoreError>;
}
