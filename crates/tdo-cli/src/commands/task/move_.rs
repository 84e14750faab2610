use tdo_api::commands::ItemMove;
use tdo_api::{Command, SyncCommand};
use tdo_core::Snapshot;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::{DestinationArgs, TaskRefArgs};
use crate::commands::shared::write::apply;
use crate::context::AppContext;
use crate::output::views::TaskView;

use super::{destination, match_mode, project_scope};

pub async fn run(
    target: &TaskRefArgs,
    destination: &DestinationArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let snapshot = ctx.snapshot().await?;
    let command = plan(target, destination, &snapshot)?;
    apply::<TaskView>(ctx, flags, "task move", &snapshot, vec![command]).await
}

fn plan(
    target: &TaskRefArgs,
    destination_args: &DestinationArgs,
    snapshot: &Snapshot,
) -> anyhow::Result<SyncCommand> {
    let scope = project_scope(snapshot, target.in_project.as_deref())?;
    let task = snapshot.resolve_task(&target.task, scope, match_mode(target.exact))?;
    let destination = destination::resolve(snapshot, destination_args)?;
    destination::check(&snapshot.task_index(), task, &destination)?;

    Ok(SyncCommand::new(Command::ItemMove(ItemMove {
        id: task.id.clone(),
        target: destination,
    })))
}
