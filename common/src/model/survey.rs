use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeSet;

/// A questionnaire definition as stored in the `surveys` collection.
///
/// `id` and `owner_id` are assigned by the server when the survey is created
/// and never change afterwards. The owner is always an effective editor even
/// though it is not listed in `edit_access_user_ids`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Survey {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub pages: Vec<Page>,
    pub owner_id: String,
    /// Users other than the owner allowed to edit and delete the survey.
    #[serde(default)]
    pub edit_access_user_ids: BTreeSet<String>,
    #[serde(default)]
    pub is_public: bool,
    /// Soft-delete marker. Deleted surveys stay in storage.
    #[serde(default)]
    pub deleted: bool,
}

impl Survey {
    /// Names of every element on every page, in page order.
    pub fn element_names(&self) -> impl Iterator<Item = &str> {
        self.pages
            .iter()
            .flat_map(|page| page.elements.iter())
            .map(|element| element.name.as_str())
    }

    /// True when `user_id` is the owner or one of the edit-access grantees.
    pub fn is_editor(&self, user_id: &str) -> bool {
        self.owner_id == user_id || self.edit_access_user_ids.contains(user_id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub elements: Vec<Element>,
}

/// One question on a page.
///
/// `name` is the key answers are correlated by. `id` is regenerated by the
/// server every time the survey is created or edited, so it is not stable
/// across versions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    pub id: String,
    #[serde(rename = "type")]
    pub element_type: ElementType,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub choices: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_required: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rows: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub columns: Option<Vec<Value>>,
}

/// The closed set of element kinds a survey may contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementType {
    RadioGroup,
    Checkbox,
    Boolean,
    Dropdown,
    Comment,
    Ranking,
    Text,
    Rating,
    TagBox,
    ImagePicker,
    Matrix,
    MultipleText,
    File,
    Html,
    Expression,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn element(name: &str) -> Element {
        Element {
            id: format!("id-{name}"),
            element_type: ElementType::Text,
            name: name.to_string(),
            title: None,
            choices: None,
            is_required: None,
            rows: None,
            columns: None,
        }
    }

    #[test]
    fn element_names_span_all_pages() {
        let survey = Survey {
            id: "s1".into(),
            title: "Feedback".into(),
            description: None,
            pages: vec![
                Page {
                    name: "p1".into(),
                    title: None,
                    description: None,
                    elements: vec![element("q1"), element("q2")],
                },
                Page {
                    name: "p2".into(),
                    title: None,
                    description: None,
                    elements: vec![element("q3")],
                },
            ],
            owner_id: "alice".into(),
            edit_access_user_ids: BTreeSet::new(),
            is_public: false,
            deleted: false,
        };

        let names: Vec<&str> = survey.element_names().collect();
        assert_eq!(names, vec!["q1", "q2", "q3"]);
        assert!(survey.is_editor("alice"));
        assert!(!survey.is_editor("bob"));
    }

    #[test]
    fn element_type_uses_lowercase_tags() {
        let parsed: Element = serde_json::from_value(json!({
            "id": "e1",
            "type": "radiogroup",
            "name": "q1",
            "choices": ["a", "b"],
            "isRequired": true
        }))
        .unwrap();
        assert_eq!(parsed.element_type, ElementType::RadioGroup);
        assert_eq!(parsed.is_required, Some(true));

        let unknown = serde_json::from_value::<Element>(json!({
            "id": "e1",
            "type": "slider",
            "name": "q1"
        }));
        assert!(unknown.is_err());
    }

    #[test]
    fn survey_serializes_camel_case() {
        let survey = Survey {
            id: "s1".into(),
            title: "t".into(),
            description: None,
            pages: Vec::new(),
            owner_id: "alice".into(),
            edit_access_user_ids: BTreeSet::from(["bob".to_string()]),
            is_public: true,
            deleted: false,
        };
        let value = serde_json::to_value(&survey).unwrap();
        assert_eq!(value["ownerId"], "alice");
        assert_eq!(value["editAccessUserIds"], json!(["bob"]));
        assert_eq!(value["isPublic"], true);
        assert_eq!(value["deleted"], false);
    }
}
