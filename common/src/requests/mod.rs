//! Bodies and query strings accepted by the HTTP API.
//!
//! These types deliberately have no server-controlled fields. Anything the
//! server assigns (survey id, owner, deleted flag, element ids, response id,
//! responding user) is not part of them, so client values for those fields are
//! dropped during deserialization.

use crate::model::page::PageRequest;
use crate::model::survey::ElementType;
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeSet;

/// Body of `POST /api/surveys` and `PUT /api/surveys/{id}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveyPayload {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub pages: Vec<PagePayload>,
    /// Honoured on create only. Edits keep the stored set.
    #[serde(default)]
    pub edit_access_user_ids: BTreeSet<String>,
    #[serde(default)]
    pub is_public: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PagePayload {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub elements: Vec<ElementPayload>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementPayload {
    #[serde(rename = "type")]
    pub element_type: ElementType,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub choices: Option<Vec<Value>>,
    #[serde(default)]
    pub is_required: Option<bool>,
    #[serde(default)]
    pub rows: Option<Vec<Value>>,
    #[serde(default)]
    pub columns: Option<Vec<Value>>,
}

/// Body of `POST /api/responses`.
///
/// Answers are kept as raw JSON until validated against the target survey,
/// since a non-object entry is a rejection reason rather than a parse error.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponsePayload {
    pub survey_id: String,
    #[serde(default)]
    pub answers: Vec<Value>,
}

/// `?page=&size=` on the paginated listing endpoints.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<u32>,
    pub size: Option<u32>,
}

impl From<PageQuery> for PageRequest {
    fn from(query: PageQuery) -> Self {
        Self {
            page: query.page.unwrap_or(0),
            size: query.size.unwrap_or(PageRequest::DEFAULT_SIZE),
        }
    }
}
