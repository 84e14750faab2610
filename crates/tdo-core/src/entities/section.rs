use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A named group of tasks inside exactly one project. Sections do not nest.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Section {
    #[serde(deserialize_with = "super::id::required")]
    #[schemars(with = "String")]
    pub id: String,
    #[serde(deserialize_with = "super::id::required")]
    #[schemars(with = "String")]
    pub project_id: String,
    pub name: String,
    #[serde(default)]
    pub order: Option<i64>,
}

impl Section {
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, project_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            project_id: project_id.into(),
            name: name.into(),
            order: None,
        }
    }
}
