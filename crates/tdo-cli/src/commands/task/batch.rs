//! `task batch-move` and `task batch-update`: resolve every selected task
//! first, then send all commands in one submission.

use tdo_api::commands::{ItemMove, MoveTarget};
use tdo_api::{Command, SyncCommand, TaskQuery};
use tdo_core::entities::Task;
use tdo_core::{Snapshot, TaskScope};

use crate::cli::GlobalFlags;
use crate::cli::subcommands::{DestinationArgs, TaskFieldArgs, TaskSelectorArgs};
use crate::commands::shared::write::apply;
use crate::context::AppContext;
use crate::output::views::TaskView;

use super::update::{build_update, validate_fields};
use super::{destination, match_mode, project_scope};

pub struct Selection {
    pub selector: TaskSelectorArgs,
    pub in_project: Option<String>,
    pub exact: bool,
}

pub async fn run_move(
    selection: &Selection,
    destination_args: &DestinationArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let snapshot = ctx.snapshot().await?;
    let tasks = select(selection, &snapshot, ctx).await?;
    let target = destination::resolve(&snapshot, destination_args)?;
    let commands = plan_move(&snapshot, &tasks, &target)?;
    apply::<TaskView>(ctx, flags, "task batch-move", &snapshot, commands).await
}

pub async fn run_update(
    selection: &Selection,
    fields: &TaskFieldArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    validate_fields(fields)?;

    let snapshot = ctx.snapshot().await?;
    let tasks = select(selection, &snapshot, ctx).await?;
    let commands = plan_update(&tasks, fields);
    if commands.is_empty() {
        anyhow::bail!("all {} selected task(s) already have the requested values", tasks.len());
    }
    apply::<TaskView>(ctx, flags, "task batch-update", &snapshot, commands).await
}

async fn select<'s>(
    selection: &Selection,
    snapshot: &'s Snapshot,
    ctx: &AppContext,
) -> anyhow::Result<Vec<&'s Task>> {
    let scope = project_scope(snapshot, selection.in_project.as_deref())?;
    let tasks = match &selection.selector.filter {
        Some(filter) => {
            let matched = ctx.tasks(&TaskQuery::filter(filter.as_str())).await?;
            let ids: Vec<&str> = matched.iter().map(|task| task.id.as_str()).collect();
            from_filter(snapshot, scope, &ids)
        }
        None => snapshot
            .resolve_tasks(&selection.selector.ids, scope, match_mode(selection.exact))
            .into_result()?,
    };

    if tasks.is_empty() {
        anyhow::bail!("no tasks selected");
    }
    tracing::debug!(selected = tasks.len(), "resolved batch selection");
    Ok(tasks)
}

/// Snapshot records for the ids a server-side filter returned, in scope.
fn from_filter<'s>(snapshot: &'s Snapshot, scope: TaskScope<'_>, ids: &[&str]) -> Vec<&'s Task> {
    let mut tasks = Vec::with_capacity(ids.len());
    for id in ids {
        match snapshot.task(id) {
            Some(task) if scope.contains(task) => {
                if !tasks.iter().any(|seen: &&Task| seen.id == task.id) {
                    tasks.push(task);
                }
            }
            Some(_) => {}
            None => tracing::warn!(id = %id, "filter matched a task missing from the snapshot; skipping"),
        }
    }
    tasks
}

fn plan_move(
    snapshot: &Snapshot,
    tasks: &[&Task],
    target: &MoveTarget,
) -> anyhow::Result<Vec<SyncCommand>> {
    let index = snapshot.task_index();
    tasks
        .iter()
        .map(|task| {
            destination::check(&index, task, target)?;
            Ok(SyncCommand::new(Command::ItemMove(ItemMove {
                id: task.id.clone(),
                target: target.clone(),
            })))
        })
        .collect()
}

fn plan_update(tasks: &[&Task], fields: &TaskFieldArgs) -> Vec<SyncCommand> {
    tasks
        .iter()
        .filter_map(|task| {
            let update = build_update(task, fields);
            if update.is_none() {
                tracing::debug!(id = %task.id, "task already matches; skipping");
            }
            update
        })
        .map(|update| SyncCommand::new(Command::ItemUpdate(update)))
        .collect()
}
