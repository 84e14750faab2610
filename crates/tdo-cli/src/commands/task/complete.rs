use tdo_api::commands::ItemRef;
use tdo_api::{Command, SyncCommand};

use crate::cli::GlobalFlags;
use crate::cli::subcommands::TaskRefArgs;
use crate::commands::shared::parse::bare_id;
use crate::commands::shared::write::apply;
use crate::context::AppContext;
use crate::output::views::TaskView;

use super::{match_mode, project_scope};

pub async fn run_complete(target: &TaskRefArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let snapshot = ctx.snapshot().await?;
    let scope = project_scope(&snapshot, target.in_project.as_deref())?;
    let task = snapshot.resolve_task(&target.task, scope, match_mode(target.exact))?;

    let command = SyncCommand::new(Command::ItemClose(ItemRef {
        id: task.id.clone(),
    }));
    apply::<TaskView>(ctx, flags, "task complete", &snapshot, vec![command]).await
}

/// Completed tasks are absent from the active listing, so only ids work here.
pub async fn run_reopen(id: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let id = bare_id(id)?;
    let snapshot = ctx.snapshot().await?;
    if snapshot.task(&id).is_some() {
        tracing::warn!(id = %id, "task is already active; sending reopen anyway");
    }

    let command = SyncCommand::new(Command::ItemReopen(ItemRef { id }));
    apply::<TaskView>(ctx, flags, "task reopen", &snapshot, vec![command]).await
}
