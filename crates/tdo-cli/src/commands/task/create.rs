use tdo_api::commands::{DueSpec, ItemAdd};
use tdo_api::{Command, SyncCommand};
use tdo_core::enums::Priority;
use tdo_core::{MatchMode, Snapshot, TaskScope};

use crate::cli::GlobalFlags;
use crate::commands::shared::parse::clean_labels;
use crate::commands::shared::write::apply;
use crate::context::AppContext;
use crate::output::views::TaskView;

pub struct Params {
    pub content: String,
    pub project: Option<String>,
    pub section: Option<String>,
    pub parent: Option<String>,
    pub description: Option<String>,
    pub priority: Option<Priority>,
    pub due: Option<String>,
    pub labels: Option<Vec<String>>,
}

pub async fn run(params: Params, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    if params.content.trim().is_empty() {
        anyhow::bail!("task content must not be empty");
    }

    let snapshot = ctx.snapshot().await?;
    let command = plan(&params, &snapshot)?;
    apply::<TaskView>(ctx, flags, "task create", &snapshot, vec![command]).await
}

fn plan(params: &Params, snapshot: &Snapshot) -> anyhow::Result<SyncCommand> {
    let project = params
        .project
        .as_deref()
        .map(|token| snapshot.resolve_project(token))
        .transpose()?;
    let project_id = project.map(|project| project.id.as_str());

    let section = params
        .section
        .as_deref()
        .map(|token| snapshot.resolve_section(token, project_id))
        .transpose()?;

    let parent = match params.parent.as_deref() {
        None => None,
        Some(token) => {
            let scope = TaskScope {
                project_id,
                section_id: section.map(|section| section.id.as_str()),
            };
            Some(snapshot.resolve_task(token, scope, MatchMode::Auto)?)
        }
    };

    let project_id = project_id
        .or_else(|| section.map(|section| section.project_id.as_str()))
        .or_else(|| parent.and_then(|parent| parent.project_id.as_deref()));

    Ok(SyncCommand::new(Command::ItemAdd(ItemAdd {
        content: params.content.trim().to_string(),
        description: params.description.clone(),
        project_id: project_id.map(str::to_string),
        section_id: section
            .map(|section| section.id.clone())
            .or_else(|| parent.and_then(|parent| parent.section_id.clone())),
        parent_id: parent.map(|parent| parent.id.clone()),
        priority: params.priority,
        due: params.due.as_deref().map(DueSpec::new),
        labels: params.labels.as_deref().map(clean_labels),
    })))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tdo_api::Command;
    use tdo_core::Snapshot;
    use tdo_core::entities::{Project, Section, Task};
    use tdo_core::enums::Priority;

    use super::{Params, plan};

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
            vec![Task::new("6", "Release").in_project("2").in_section("11")],
        )
    }

    fn params() -> Params {
        Params {
            content: "Write notes".into(),
            project: None,
            section: None,
            parent: None,
            description: None,
            priority: None,
            due: None,
            labels: None,
        }
    }

    #[test]
    fn section_implies_its_project() {
        let params = Params {
            project: Some("Sprint".into()),
            section: Some("Planning".into()),
            priority: Some(Priority::URGENT),
            due: Some("tomorrow".into()),
            labels: Some(vec!["work".into(), " work".into()]),
            ..params()
        };
        let command = plan(&params, &snapshot()).expect("plan");
        let Command::ItemAdd(args) = command.command else {
            panic!("expected item_add");
        };
        assert_eq!(args.project_id.as_deref(), Some("2"));
        assert_eq!(args.section_id.as_deref(), Some("11"));
        assert_eq!(args.priority, Some(Priority::URGENT));
        assert_eq!(args.due.map(|due| due.string), Some("tomorrow".to_string()));
        assert_eq!(args.labels, Some(vec!["work".to_string()]));
    }

    #[test]
    fn subtask_inherits_parent_placement() {
        let params = Params {
            parent: Some("Release".into()),
            ..params()
        };
        let command = plan(&params, &snapshot()).expect("plan");
        let Command::ItemAdd(args) = command.command else {
            panic!("expected item_add");
        };
        assert_eq!(args.parent_id.as_deref(), Some("6"));
        assert_eq!(args.project_id.as_deref(), Some("2"));
        assert_eq!(args.section_id.as_deref(), Some("11"));
    }

    #[test]
    fn ambiguous_section_fails() {
        let params = Params {
            section: Some("Planning".into()),
            ..params()
        };
        assert!(plan(&params, &snapshot()).is_err());
    }
}
