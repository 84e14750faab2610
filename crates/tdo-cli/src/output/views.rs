//! Output records: what commands print, in both formats.

use schemars::JsonSchema;
use serde::Serialize;
use tdo_core::entities::{Project, Section, Task};
use tdo_core::enums::{Priority, ViewStyle};
use tdo_core::{PATH_DELIMITER, PathIndex, Snapshot, SnapshotIndex};

/// One-line description used in text reports.
pub trait Summary {
    fn summary(&self) -> String;
}

/// A view of one record, looked up by id through a prebuilt index.
pub trait RecordView: Sized {
    fn from_index(index: &SnapshotIndex<'_>, id: &str) -> Option<Self>;

    /// One-off lookup; builds its own index.
    #[must_use]
    fn lookup(snapshot: &Snapshot, id: &str) -> Option<Self> {
        Self::from_index(&snapshot.index(), id)
    }
}

// ---------------------------------------------------------------------------
// Projects
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
pub struct ProjectView {
    pub id: String,
    pub name: String,
    /// Root-to-project names joined with ` » `.
    pub path: String,
    /// Number of ancestors; top-level projects are 0.
    pub depth: usize,
    pub parent_id: Option<String>,
    pub color: Option<String>,
    pub is_favorite: bool,
    pub view_style: Option<ViewStyle>,
    pub is_inbox: bool,
}

impl ProjectView {
    #[must_use]
    pub fn build(index: &PathIndex<'_, Project>, project: &Project) -> Self {
        let depth = index
            .get(&project.id)
            .map_or(0, |indexed| index.ancestors(indexed).len());
        Self {
            id: project.id.clone(),
            name: project.name.clone(),
            path: index
                .path_of(&project.id)
                .unwrap_or_else(|| project.name.clone()),
            depth,
            parent_id: project.parent_id.clone(),
            color: project.color.clone(),
            is_favorite: project.is_favorite,
            view_style: project.view_style,
            is_inbox: project.is_inbox_project,
        }
    }

    /// Every project, ordered so each parent precedes its children.
    #[must_use]
    pub fn all(snapshot: &Snapshot) -> Vec<Self> {
        let index = snapshot.project_index();
        let mut views: Vec<Self> = snapshot
            .projects
            .iter()
            .map(|project| Self::build(&index, project))
            .collect();
        views.sort_by_cached_key(|view| {
            let segments: Vec<String> = view
                .path
                .split(PATH_DELIMITER)
                .map(str::to_lowercase)
                .collect();
            (segments, view.id.clone())
        });
        views
    }
}

impl RecordView for ProjectView {
    fn from_index(index: &SnapshotIndex<'_>, id: &str) -> Option<Self> {
        index
            .projects
            .get(id)
            .map(|project| Self::build(&index.projects, project))
    }
}

impl Summary for ProjectView {
    fn summary(&self) -> String {
        self.path.clone()
    }
}

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
pub struct SectionView {
    pub id: String,
    pub name: String,
    pub project_id: String,
    pub project_path: String,
}

impl SectionView {
    #[must_use]
    pub fn build(index: &SnapshotIndex<'_>, section: &Section) -> Self {
        Self {
            id: section.id.clone(),
            name: section.name.clone(),
            project_id: section.project_id.clone(),
            project_path: index.project_label(Some(&section.project_id)),
        }
    }
}

impl RecordView for SectionView {
    fn from_index(index: &SnapshotIndex<'_>, id: &str) -> Option<Self> {
        index.section(id).map(|section| Self::build(index, section))
    }
}

impl Summary for SectionView {
    fn summary(&self) -> String {
        format!("{} ({})", self.name, self.project_path)
    }
}

// ---------------------------------------------------------------------------
// Tasks
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
pub struct TaskView {
    pub id: String,
    pub content: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// Project path, section, then parent tasks.
    pub location: String,
    pub project_id: Option<String>,
    pub section_id: Option<String>,
    pub parent_id: Option<String>,
    /// API value, 1 (normal) to 4 (urgent).
    pub priority: Priority,
    pub due: Option<String>,
    pub labels: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl TaskView {
    #[must_use]
    pub fn build(index: &SnapshotIndex<'_>, task: &Task) -> Self {
        Self {
            id: task.id.clone(),
            content: task.content.clone(),
            description: task.description.clone(),
            location: index.task_location(task),
            project_id: task.project_id.clone(),
            section_id: task.section_id.clone(),
            parent_id: task.parent_id.clone(),
            priority: task.priority,
            due: task.due.as_ref().map(|due| {
                if due.string.is_empty() {
                    due.date.clone()
                } else {
                    due.string.clone()
                }
            }),
            labels: task.labels.clone(),
            url: task.url.clone(),
        }
    }

    /// Views for `tasks`, sharing one index over `snapshot`.
    #[must_use]
    pub fn many<'a>(snapshot: &Snapshot, tasks: impl IntoIterator<Item = &'a Task>) -> Vec<Self> {
        let index = snapshot.index();
        tasks
            .into_iter()
            .map(|task| Self::build(&index, task))
            .collect()
    }
}

impl RecordView for TaskView {
    fn from_index(index: &SnapshotIndex<'_>, id: &str) -> Option<Self> {
        index.tasks.get(id).map(|task| Self::build(index, task))
    }
}

impl Summary for TaskView {
    fn summary(&self) -> String {
        let mut text = format!("{} [{}]", self.content, self.location);
        if self.priority != Priority::NORMAL {
            text.push(' ');
            text.push_str(&self.priority.label());
        }
        if let Some(due) = &self.due {
            text.push_str(&format!(" due:{due}"));
        }
        if !self.labels.is_empty() {
            text.push_str(&format!(" @{}", self.labels.join(" @")));
        }
        text
    }
}

// ---------------------------------------------------------------------------
// Write reports
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ChangeStatus {
    /// Dry run; nothing was sent.
    Planned,
    Applied,
    Failed,
}

impl ChangeStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Planned => "planned",
            Self::Applied => "applied",
            Self::Failed => "failed",
        }
    }
}

/// One submitted (or planned) command and the record it touched.
#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct Change<V> {
    /// Wire command type, e.g. `item_move`.
    pub command: String,
    pub uuid: String,
    /// Target record, or the created id once known.
    pub id: Option<String>,
    pub status: ChangeStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<i64>,
    /// Command arguments as sent.
    pub args: serde_json::Value,
    pub before: Option<V>,
    pub after: Option<V>,
}

/// Result of a mutating command.
#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct WriteReport<V> {
    pub operation: String,
    pub dry_run: bool,
    /// False when any command failed.
    pub ok: bool,
    pub changes: Vec<Change<V>>,
}
