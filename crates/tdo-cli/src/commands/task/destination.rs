//! Where `task move` and `task batch-move` send tasks.

use tdo_api::commands::MoveTarget;
use tdo_core::entities::Task;
use tdo_core::{MatchMode, PathIndex, Snapshot, TaskScope};

use crate::cli::subcommands::DestinationArgs;

/// Resolve destination flags to exactly one move target.
///
/// `--parent` beats `--section`, which beats `--project`; a project given
/// alongside either narrows its resolution.
pub fn resolve(snapshot: &Snapshot, args: &DestinationArgs) -> anyhow::Result<MoveTarget> {
    let project = args
        .project
        .as_deref()
        .map(|token| snapshot.resolve_project(token))
        .transpose()?;

    if let Some(token) = args.parent.as_deref() {
        let scope = project.map_or_else(TaskScope::default, |project| TaskScope::project(&project.id));
        let parent = snapshot.resolve_task(token, scope, MatchMode::Auto)?;
        return Ok(MoveTarget::ParentId(parent.id.clone()));
    }

    if let Some(token) = args.section.as_deref() {
        let section = snapshot.resolve_section(token, project.map(|project| project.id.as_str()))?;
        return Ok(MoveTarget::SectionId(section.id.clone()));
    }

    match project {
        Some(project) => Ok(MoveTarget::ProjectId(project.id.clone())),
        None => anyhow::bail!("one of --project, --section, or --parent is required"),
    }
}

/// Refuse nesting a task under itself or one of its own subtasks.
pub fn check(index: &PathIndex<'_, Task>, task: &Task, target: &MoveTarget) -> anyhow::Result<()> {
    if let MoveTarget::ParentId(parent_id) = target {
        if index.is_self_or_descendant(parent_id, &task.id) {
            anyhow::bail!(
                "cannot move '{}' under its own subtask '{}'",
                task.content,
                index.path_of(parent_id).unwrap_or_else(|| parent_id.clone())
            );
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tdo_api::commands::MoveTarget;
    use tdo_core::Snapshot;
    use tdo_core::entities::{Project, Section, Task};

    use super::{check, resolve};
    use crate::cli::subcommands::DestinationArgs;

    fn snapshot() -> Snapshot {
        Snapshot::new(
            vec![
                Project::new("1", "Work", None),
                Project::new("2", "Sprint", Some("1")),
            ],
            vec![
                Section::new("10", "Planning", "1"),
                Section::new("11", "Planning", "2"),
            ],
            vec![
                Task::new("5", "Buy milk").in_project("1"),
                Task::new("6", "Release").in_project("2"),
                Task::new("7", "Notes").in_project("2").with_parent("6"),
            ],
        )
    }

    fn args(project: Option<&str>, section: Option<&str>, parent: Option<&str>) -> DestinationArgs {
        DestinationArgs {
            project: project.map(str::to_string),
            section: section.map(str::to_string),
            parent: parent.map(str::to_string),
        }
    }

    #[test]
    fn project_alone_targets_project() {
        let target = resolve(&snapshot(), &args(Some("Work » Sprint"), None, None)).expect("target");
        assert_eq!(target, MoveTarget::ProjectId("2".into()));
    }

    #[test]
    fn project_narrows_section() {
        let target =
            resolve(&snapshot(), &args(Some("Sprint"), Some("Planning"), None)).expect("target");
        assert_eq!(target, MoveTarget::SectionId("11".into()));
        assert!(resolve(&snapshot(), &args(None, Some("Planning"), None)).is_err());
    }

    #[test]
    fn parent_target_and_cycle_check() {
        let snapshot = snapshot();
        let target = resolve(&snapshot, &args(None, None, Some("Notes"))).expect("target");
        assert_eq!(target, MoveTarget::ParentId("7".into()));

        let index = snapshot.task_index();
        let release = snapshot.task("6").expect("task");
        let err = check(&index, release, &target).expect_err("cycle");
        assert!(err.to_string().contains("Release » Notes"));

        let milk = snapshot.task("5").expect("task");
        check(&index, milk, &target).expect("allowed");
    }
}
