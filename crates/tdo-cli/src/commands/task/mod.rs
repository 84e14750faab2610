mod batch;
mod complete;
mod create;
mod destination;
mod list;
mod move_;
mod search;
mod update;

use tdo_core::{MatchMode, ResolveError, Snapshot, TaskScope};

use crate::cli::GlobalFlags;
use crate::cli::subcommands::TaskCommands;
use crate::context::AppContext;

/// Handle `tdo task`.
pub async fn handle(action: TaskCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        TaskCommands::List {
            project,
            section,
            label,
            filter,
        } => {
            list::run(
                list::Params {
                    project,
                    section,
                    label,
                    filter,
                },
                ctx,
                flags,
            )
            .await
        }
        TaskCommands::Search {
            query,
            project,
            section,
            exact,
        } => {
            search::run(
                &query,
                project.as_deref(),
                section.as_deref(),
                exact,
                ctx,
                flags,
            )
            .await
        }
        TaskCommands::Create {
            content,
            project,
            section,
            parent,
            description,
            priority,
            due,
            labels,
        } => {
            create::run(
                create::Params {
                    content,
                    project,
                    section,
                    parent,
                    description,
                    priority,
                    due,
                    labels,
                },
                ctx,
                flags,
            )
            .await
        }
        TaskCommands::Move {
            target,
            destination,
        } => move_::run(&target, &destination, ctx, flags).await,
        TaskCommands::Update { target, fields } => update::run(&target, &fields, ctx, flags).await,
        TaskCommands::Complete { target } => complete::run_complete(&target, ctx, flags).await,
        TaskCommands::Reopen { id } => complete::run_reopen(&id, ctx, flags).await,
        TaskCommands::BatchMove {
            selector,
            in_project,
            exact,
            destination,
        } => {
            let selection = batch::Selection {
                selector,
                in_project,
                exact,
            };
            batch::run_move(&selection, &destination, ctx, flags).await
        }
        TaskCommands::BatchUpdate {
            selector,
            in_project,
            exact,
            fields,
        } => {
            let selection = batch::Selection {
                selector,
                in_project,
                exact,
            };
            batch::run_update(&selection, &fields, ctx, flags).await
        }
    }
}

const fn match_mode(exact: bool) -> MatchMode {
    if exact { MatchMode::Exact } else { MatchMode::Auto }
}

/// Scope limited to the project `in_project` resolves to, if given.
fn project_scope<'s>(
    snapshot: &'s Snapshot,
    in_project: Option<&str>,
) -> Result<TaskScope<'s>, ResolveError> {
    match in_project {
        None => Ok(TaskScope::default()),
        Some(token) => snapshot
            .resolve_project(token)
            .map(|project| TaskScope::project(&project.id)),
    }
}
