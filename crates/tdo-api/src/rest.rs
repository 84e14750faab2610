//! REST read endpoints.

use tdo_core::entities::{Project, Section, Task};

use crate::{TodoClient, error::ApiError, http::decode};

/// Server-side task filters for `GET /tasks`.
///
/// When `filter` is set the service evaluates that query and ignores the
/// other fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskQuery {
    pub project_id: Option<String>,
    pub section_id: Option<String>,
    pub label: Option<String>,
    /// Query in the service's filter language, e.g. `today & #Work`.
    pub filter: Option<String>,
}

impl TaskQuery {
    #[must_use]
    pub fn filter(query: impl Into<String>) -> Self {
        Self {
            filter: Some(query.into()),
            ..Self::default()
        }
    }

    /// `?key=value&…`, or an empty string when no field is set.
    #[must_use]
    pub fn query_string(&self) -> String {
        let mut pairs: Vec<(&str, String)> = Vec::new();
        if let Some(project_id) = &self.project_id {
            pairs.push(("project_id", project_id.clone()));
        }
        if let Some(section_id) = &self.section_id {
            pairs.push(("section_id", section_id.clone()));
        }
        if let Some(label) = &self.label {
            pairs.push(("label", label.clone()));
        }
        if let Some(filter) = &self.filter {
            pairs.push(("filter", filter.clone()));
        }

        if pairs.is_empty() {
            return String::new();
        }
        let joined = pairs
            .iter()
            .map(|(key, value)| format!("{key}={}", urlencoding::encode(value)))
            .collect::<Vec<_>>()
            .join("&");
        format!("?{joined}")
    }
}

impl TodoClient {
    /// All active projects.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails, the service returns a
    /// non-success status, or the response cannot be parsed.
    pub async fn list_projects(&self) -> Result<Vec<Project>, ApiError> {
        let body = self.get("/projects").await?;
        decode(&body, "projects")
    }

    /// Sections of one project, or of all projects.
    ///
    /// # Errors
    ///
    /// See [`TodoClient::list_projects`].
    pub async fn list_sections(&self, project_id: Option<&str>) -> Result<Vec<Section>, ApiError> {
        let path = match project_id {
            Some(id) => format!("/sections?project_id={}", urlencoding::encode(id)),
            None => String::from("/sections"),
        };
        let body = self.get(&path).await?;
        decode(&body, "sections")
    }

    /// Active tasks matching `query`.
    ///
    /// # Errors
    ///
    /// See [`TodoClient::list_projects`].
    pub async fn list_tasks(&self, query: &TaskQuery) -> Result<Vec<Task>, ApiError> {
        let body = self
            .get(&format!("/tasks{}", query.query_string()))
            .await?;
        decode(&body, "tasks")
    }
}
