use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::Priority;

/// Due date as reported by the service. `date` is always present; `datetime`
/// only for tasks with a time of day.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Due {
    pub string: String,
    pub date: String,
    #[serde(default)]
    pub is_recurring: bool,
    #[serde(default)]
    pub datetime: Option<String>,
    #[serde(default)]
    pub timezone: Option<String>,
}

/// An actionable item. Tasks nest through `parent_id`, independently of the
/// project hierarchy. A missing `project_id` means the inbox.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Task {
    #[serde(deserialize_with = "super::id::required")]
    #[schemars(with = "String")]
    pub id: String,
    pub content: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, deserialize_with = "super::id::optional")]
    #[schemars(with = "Option<String>")]
    pub project_id: Option<String>,
    #[serde(default, deserialize_with = "super::id::optional")]
    #[schemars(with = "Option<String>")]
    pub section_id: Option<String>,
    #[serde(default, deserialize_with = "super::id::optional")]
    #[schemars(with = "Option<String>")]
    pub parent_id: Option<String>,
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub due: Option<Due>,
    #[serde(default)]
    pub is_completed: bool,
    #[serde(default)]
    pub order: Option<i64>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub url: Option<String>,
}

impl Task {
    /// Minimal task with only identity and placement set.
    #[must_use]
    pub fn new(id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
            description: String::new(),
            project_id: None,
            section_id: None,
            parent_id: None,
            labels: Vec::new(),
            priority: Priority::default(),
            due: None,
            is_completed: false,
            order: None,
            created_at: None,
            url: None,
        }
    }

    #[must_use]
    pub fn in_project(mut self, project_id: &str) -> Self {
        self.project_id = Some(project_id.to_string());
        self
    }

    #[must_use]
    pub fn in_section(mut self, section_id: &str) -> Self {
        self.section_id = Some(section_id.to_string());
        self
    }

    #[must_use]
    pub fn with_parent(mut self, parent_id: &str) -> Self {
        self.parent_id = Some(parent_id.to_string());
        self
    }
}
