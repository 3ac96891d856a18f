use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One answer object: element name to submitted value.
///
/// The value shape depends on the element type (free text, a choice, a list of
/// choices, a boolean or a ranked list) and is stored as received.
pub type Answer = Map<String, Value>;

/// A respondent's submission against one survey, as stored in the
/// `responses` collection. Responses are never modified after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    pub id: String,
    pub user_id: String,
    pub survey_id: String,
    #[serde(default)]
    pub answers: Vec<Answer>,
}
