use tdo_api::commands::SectionMove;
use tdo_api::{Command, SyncCommand};
use tdo_core::Snapshot;

use crate::cli::GlobalFlags;
use crate::commands::shared::write::apply;
use crate::context::AppContext;
use crate::output::views::SectionView;

use super::scope_id;

pub async fn run(
    section: &str,
    project: Option<&str>,
    to_project: &str,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let snapshot = ctx.structure().await?;
    let command = plan(section, project, to_project, &snapshot)?;
    apply::<SectionView>(ctx, flags, "section move", &snapshot, vec![command]).await
}

fn plan(
    section: &str,
    project: Option<&str>,
    to_project: &str,
    snapshot: &Snapshot,
) -> anyhow::Result<SyncCommand> {
    let scope = scope_id(snapshot, project)?;
    let section = snapshot.resolve_section(section, scope.as_deref())?;
    let destination = snapshot.resolve_project(to_project)?;
    if destination.id == section.project_id {
        anyhow::bail!(
            "section '{}' is already in '{}'",
            section.name,
            snapshot.project_label(Some(&destination.id))
        );
    }

    Ok(SyncCommand::new(Command::SectionMove(SectionMove {
        id: section.id.clone(),
        project_id: destination.id.clone(),
    })))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tdo_api::Command;
    use tdo_core::entities::{Project, Section};
    use tdo_core::{ResolveError, Snapshot};

    use super::plan;

    fn snapshot() -> Snapshot {
        Snapshot::new(
            vec![
                Project::new("1", "Work", None),
                Project::new("2", "Sprint", Some("1")),
                Project::new("3", "Home", None),
            ],
            vec![
                Section::new("10", "Planning", "1"),
                Section::new("11", "Planning", "2"),
            ],
            Vec::new(),
        )
    }

    #[test]
    fn scoped_section_moves() {
        let command = plan("Planning", Some("Sprint"), "Home", &snapshot()).expect("plan");
        let Command::SectionMove(args) = command.command else {
            panic!("expected section_move");
        };
        assert_eq!(args.id, "11");
        assert_eq!(args.project_id, "3");
    }

    #[test]
    fn unscoped_duplicate_name_is_ambiguous() {
        let err = plan("Planning", None, "Home", &snapshot()).expect_err("ambiguous");
        let resolve = err.downcast_ref::<ResolveError>().expect("resolve error");
        let mut ids: Vec<&str> = resolve
            .candidates()
            .iter()
            .map(|candidate| candidate.id.as_str())
            .collect();
        ids.sort_unstable();
        assert_eq!(ids, vec!["10", "11"]);
    }

    #[test]
    fn refuses_noop_move() {
        let err = plan("10", None, "Work", &snapshot()).expect_err("noop");
        assert!(err.to_string().contains("already in 'Work'"));
    }
}
