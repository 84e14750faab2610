use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::ViewStyle;

/// A project container. Projects nest through `parent_id`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Project {
    #[serde(deserialize_with = "super::id::required")]
    #[schemars(with = "String")]
    pub id: String,
    pub name: String,
    #[serde(default, deserialize_with = "super::id::optional")]
    #[schemars(with = "Option<String>")]
    pub parent_id: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub is_favorite: bool,
    #[serde(default)]
    pub view_style: Option<ViewStyle>,
    #[serde(default)]
    pub order: Option<i64>,
    #[serde(default)]
    pub is_inbox_project: bool,
    #[serde(default)]
    pub is_shared: bool,
    #[serde(default)]
    pub url: Option<String>,
}

impl Project {
    /// Minimal project with only identity and hierarchy set.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, parent_id: Option<&str>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            parent_id: parent_id.map(str::to_string),
            color: None,
            is_favorite: false,
            view_style: None,
            order: None,
            is_inbox_project: false,
            is_shared: false,
            url: None,
        }
    }
}
