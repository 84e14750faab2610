use tdo_api::commands::ProjectMove;
use tdo_api::{Command, SyncCommand};
use tdo_core::Snapshot;

use crate::cli::GlobalFlags;
use crate::commands::shared::write::apply;
use crate::context::AppContext;
use crate::output::views::ProjectView;

/// Move `token` under `parent`, or to the top level when `parent` is `None`.
pub async fn run(
    token: &str,
    parent: Option<&str>,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let snapshot = ctx.projects().await?;
    let command = plan(token, parent, &snapshot)?;
    apply::<ProjectView>(ctx, flags, "project move", &snapshot, vec![command]).await
}

fn plan(token: &str, parent: Option<&str>, snapshot: &Snapshot) -> anyhow::Result<SyncCommand> {
    let project = snapshot.resolve_project(token)?;
    if project.is_inbox_project {
        anyhow::bail!("the inbox project cannot be moved");
    }

    let parent_id = match parent {
        None => None,
        Some(parent_token) => {
            let parent = snapshot.resolve_project(parent_token)?;
            let index = snapshot.project_index();
            if index.is_self_or_descendant(&parent.id, &project.id) {
                anyhow::bail!(
                    "cannot move '{}' under '{}': the destination is the project itself or one of its descendants",
                    index.path(project),
                    index.path(parent)
                );
            }
            Some(parent.id.clone())
        }
    };

    Ok(SyncCommand::new(Command::ProjectMove(ProjectMove {
        id: project.id.clone(),
        parent_id,
    })))
}
