mod create;
mod list;
mod move_;
mod path;
mod update;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::ProjectCommands;
use crate::context::AppContext;

/// Handle `tdo project`.
pub async fn handle(
    action: ProjectCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        ProjectCommands::List { tree } => list::run(tree, ctx, flags).await,
        ProjectCommands::Path { project, exact } => path::run(&project, exact, ctx, flags).await,
        ProjectCommands::Create {
            name,
            parent,
            color,
            favorite,
            view_style,
        } => {
            create::run(
                create::Params {
                    name,
                    parent,
                    color,
                    favorite,
                    view_style,
                },
                ctx,
                flags,
            )
            .await
        }
        ProjectCommands::Move {
            project,
            parent,
            root: _,
        } => move_::run(&project, parent.as_deref(), ctx, flags).await,
        ProjectCommands::Update {
            project,
            name,
            color,
            favorite,
            view_style,
        } => {
            update::run(
                update::Params {
                    project,
                    name,
                    color,
                    favorite,
                    view_style,
                },
                ctx,
                flags,
            )
            .await
        }
    }
}
