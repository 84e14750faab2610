use tdo_api::commands::SectionAdd;
use tdo_api::{Command, SyncCommand};
use tdo_core::Snapshot;

use crate::cli::GlobalFlags;
use crate::commands::shared::write::apply;
use crate::context::AppContext;
use crate::output::views::SectionView;

pub async fn run(name: &str, project: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    if name.trim().is_empty() {
        anyhow::bail!("section name must not be empty");
    }

    let snapshot = ctx.structure().await?;
    let command = plan(name, project, &snapshot)?;
    apply::<SectionView>(ctx, flags, "section create", &snapshot, vec![command]).await
}

fn plan(name: &str, project: &str, snapshot: &Snapshot) -> anyhow::Result<SyncCommand> {
    let project = snapshot.resolve_project(project)?;
    let clash = snapshot
        .sections
        .iter()
        .any(|section| section.project_id == project.id && section.name.eq_ignore_ascii_case(name.trim()));
    if clash {
        tracing::warn!(
            section = name.trim(),
            project = %snapshot.project_label(Some(&project.id)),
            "a section with this name already exists in the project; names will be ambiguous"
        );
    }

    Ok(SyncCommand::new(Command::SectionAdd(SectionAdd {
        name: name.trim().to_string(),
        project_id: project.id.clone(),
    })))
}
