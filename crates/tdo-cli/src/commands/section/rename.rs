use tdo_api::commands::SectionUpdate;
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
    name: &str,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    if name.trim().is_empty() {
        anyhow::bail!("--name must not be empty");
    }

    let snapshot = ctx.structure().await?;
    let command = plan(section, project, name, &snapshot)?;
    apply::<SectionView>(ctx, flags, "section rename", &snapshot, vec![command]).await
}

fn plan(
    section: &str,
    project: Option<&str>,
    name: &str,
    snapshot: &Snapshot,
) -> anyhow::Result<SyncCommand> {
    let scope = scope_id(snapshot, project)?;
    let section = snapshot.resolve_section(section, scope.as_deref())?;

    Ok(SyncCommand::new(Command::SectionUpdate(SectionUpdate {
        id: section.id.clone(),
        name: name.trim().to_string(),
    })))
}
