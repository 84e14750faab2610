//! One consistent view of the service's records for a single invocation.
//!
//! Commands fetch a [`Snapshot`] once and hand it to every resolution and
//! path-building call, so a batch of tokens is resolved against the same data
//! and never triggers additional fetches.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::entities::{Project, Section, Task};
use crate::errors::{EntityKind, ResolveError};
use crate::path::{PATH_DELIMITER, PathIndex};
use crate::resolve::{Entry, MatchMode, normalize_path_token, resolve};

/// Label used for tasks without a project.
pub const INBOX_LABEL: &str = "Inbox";

#[derive(Debug, Clone, Default, Serialize)]
pub struct Snapshot {
    pub projects: Vec<Project>,
    pub sections: Vec<Section>,
    pub tasks: Vec<Task>,
}

/// Narrows task candidates before any name matching.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskScope<'s> {
    pub project_id: Option<&'s str>,
    pub section_id: Option<&'s str>,
}

impl<'s> TaskScope<'s> {
    #[must_use]
    pub const fn project(project_id: &'s str) -> Self {
        Self {
            project_id: Some(project_id),
            section_id: None,
        }
    }

    #[must_use]
    pub fn contains(&self, task: &Task) -> bool {
        let project_ok = self
            .project_id
            .is_none_or(|id| task.project_id.as_deref() == Some(id));
        let section_ok = self
            .section_id
            .is_none_or(|id| task.section_id.as_deref() == Some(id));
        project_ok && section_ok
    }
}

/// Outcome of resolving many tokens against one snapshot.
#[derive(Debug)]
pub struct BatchResolution<'a> {
    /// Resolved tasks in token order, without duplicates.
    pub tasks: Vec<&'a Task>,
    pub failures: Vec<ResolveError>,
}

impl<'a> BatchResolution<'a> {
    /// All tasks, or every failure when at least one token did not resolve.
    ///
    /// # Errors
    ///
    /// The single failure as-is, or [`ResolveError::Batch`] for several.
    pub fn into_result(mut self) -> Result<Vec<&'a Task>, ResolveError> {
        match self.failures.len() {
            0 => Ok(self.tasks),
            1 => Err(self.failures.remove(0)),
            _ => Err(ResolveError::Batch(self.failures)),
        }
    }
}

impl Snapshot {
    #[must_use]
    pub const fn new(projects: Vec<Project>, sections: Vec<Section>, tasks: Vec<Task>) -> Self {
        Self {
            projects,
            sections,
            tasks,
        }
    }

    #[must_use]
    pub fn project_index(&self) -> PathIndex<'_, Project> {
        PathIndex::new(&self.projects)
    }

    #[must_use]
    pub fn task_index(&self) -> PathIndex<'_, Task> {
        PathIndex::new(&self.tasks)
    }

    #[must_use]
    pub fn project(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|project| project.id == id)
    }

    #[must_use]
    pub fn section(&self, id: &str) -> Option<&Section> {
        self.sections.iter().find(|section| section.id == id)
    }

    #[must_use]
    pub fn task(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    /// Lookups shared by many label and path computations.
    #[must_use]
    pub fn index(&self) -> SnapshotIndex<'_> {
        SnapshotIndex::new(self)
    }

    /// Path of a project id, `Inbox` when absent, the raw id when unknown.
    #[must_use]
    pub fn project_label(&self, project_id: Option<&str>) -> String {
        self.index().project_label(project_id)
    }

    /// `Section (Project » Path)`.
    #[must_use]
    pub fn section_label(&self, section: &Section) -> String {
        self.index().section_label(section)
    }

    /// Full placement of a task: project path, section, then parent tasks.
    #[must_use]
    pub fn task_location(&self, task: &Task) -> String {
        self.index().task_location(task)
    }

    // -- resolution ---------------------------------------------------------

    /// Resolve a project by id, full path, name, or path fragment.
    ///
    /// # Errors
    ///
    /// See [`resolve`].
    pub fn resolve_project(&self, token: &str) -> Result<&Project, ResolveError> {
        self.resolve_project_with(token, MatchMode::Auto)
    }

    /// [`Snapshot::resolve_project`] with an explicit match mode.
    ///
    /// # Errors
    ///
    /// See [`resolve`].
    pub fn resolve_project_with(
        &self,
        token: &str,
        mode: MatchMode,
    ) -> Result<&Project, ResolveError> {
        let index = self.project_index();
        let entries: Vec<Entry<'_, Project>> = self
            .projects
            .iter()
            .map(|project| {
                let path = index.path(project);
                Entry::new(project, &project.id, path.clone())
                    .exact(&path)
                    .exact(&project.name)
                    .haystack(&path)
            })
            .collect();

        resolve(
            EntityKind::Project,
            token,
            &normalize_path_token(token),
            &entries,
            mode,
        )
    }

    /// Resolve a section by id or name, optionally within one project.
    ///
    /// # Errors
    ///
    /// See [`resolve`].
    pub fn resolve_section(
        &self,
        token: &str,
        project_id: Option<&str>,
    ) -> Result<&Section, ResolveError> {
        let index = self.index();
        let entries: Vec<Entry<'_, Section>> = self
            .sections
            .iter()
            .filter(|section| project_id.is_none_or(|id| section.project_id == id))
            .map(|section| {
                Entry::new(section, &section.id, index.section_label(section))
                    .exact(&section.name)
                    .haystack(&section.name)
            })
            .collect();

        resolve(EntityKind::Section, token, token, &entries, MatchMode::Auto)
    }

    /// Resolve a task by id or content within `scope`.
    ///
    /// # Errors
    ///
    /// See [`resolve`].
    pub fn resolve_task(
        &self,
        token: &str,
        scope: TaskScope<'_>,
        mode: MatchMode,
    ) -> Result<&Task, ResolveError> {
        let entries = self.task_entries(scope);
        resolve(EntityKind::Task, token, token, &entries, mode)
    }

    /// Resolve every token against this snapshot, collecting all failures.
    #[must_use]
    pub fn resolve_tasks<S: AsRef<str>>(
        &self,
        tokens: &[S],
        scope: TaskScope<'_>,
        mode: MatchMode,
    ) -> BatchResolution<'_> {
        let entries = self.task_entries(scope);
        let mut seen = HashSet::new();
        let mut batch = BatchResolution {
            tasks: Vec::with_capacity(tokens.len()),
            failures: Vec::new(),
        };

        for token in tokens {
            let token = token.as_ref();
            match resolve(EntityKind::Task, token, token, &entries, mode) {
                Ok(task) => {
                    if seen.insert(task.id.as_str()) {
                        batch.tasks.push(task);
                    }
                }
                Err(error) => batch.failures.push(error),
            }
        }
        batch
    }

    /// Tasks in `scope` whose content matches `query`: equality in exact
    /// mode, case-insensitive containment otherwise.
    #[must_use]
    pub fn search_tasks(&self, query: &str, scope: TaskScope<'_>, exact: bool) -> Vec<&Task> {
        let needle = query.trim().to_lowercase();
        self.tasks
            .iter()
            .filter(|task| scope.contains(task))
            .filter(|task| {
                let content = task.content.to_lowercase();
                if exact {
                    content.trim() == needle
                } else {
                    content.contains(&needle)
                }
            })
            .collect()
    }

    fn task_entries(&self, scope: TaskScope<'_>) -> Vec<Entry<'_, Task>> {
        let index = self.index();
        self.tasks
            .iter()
            .filter(|task| scope.contains(task))
            .map(|task| {
                let display = format!(
                    "{} ({})",
                    index.tasks.path(task),
                    index.project_label(task.project_id.as_deref())
                );
                Entry::new(task, &task.id, display)
                    .exact(&task.content)
                    .haystack(&task.content)
            })
            .collect()
    }
}

/// Path indexes over one snapshot, built once and shared by many lookups.
#[derive(Debug)]
pub struct SnapshotIndex<'a> {
    pub projects: PathIndex<'a, Project>,
    pub tasks: PathIndex<'a, Task>,
    sections: HashMap<&'a str, &'a Section>,
}

impl<'a> SnapshotIndex<'a> {
    #[must_use]
    pub fn new(snapshot: &'a Snapshot) -> Self {
        Self {
            projects: PathIndex::new(&snapshot.projects),
            tasks: PathIndex::new(&snapshot.tasks),
            sections: snapshot
                .sections
                .iter()
                .map(|section| (section.id.as_str(), section))
                .collect(),
        }
    }

    #[must_use]
    pub fn section(&self, id: &str) -> Option<&'a Section> {
        self.sections.get(id).copied()
    }

    /// Path of a project id, `Inbox` when absent, the raw id when unknown.
    #[must_use]
    pub fn project_label(&self, project_id: Option<&str>) -> String {
        match project_id {
            None => INBOX_LABEL.to_string(),
            Some(id) => self
                .projects
                .path_of(id)
                .unwrap_or_else(|| id.to_string()),
        }
    }

    /// `Section (Project » Path)`.
    #[must_use]
    pub fn section_label(&self, section: &Section) -> String {
        format!(
            "{} ({})",
            section.name,
            self.project_label(Some(&section.project_id))
        )
    }

    /// Full placement of a task: project path, section, then parent tasks.
    #[must_use]
    pub fn task_location(&self, task: &Task) -> String {
        let mut segments = vec![self.project_label(task.project_id.as_deref())];
        if let Some(section) = task.section_id.as_deref().and_then(|id| self.section(id)) {
            segments.push(section.name.clone());
        }
        if let Some(indexed) = self.tasks.get(&task.id) {
            let mut chain = self.tasks.segments(indexed);
            chain.pop();
            segments.extend(chain.into_iter().map(str::to_string));
        }
        segments.join(PATH_DELIMITER)
    }
}
