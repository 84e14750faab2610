mod create;
mod list;
mod move_;
mod rename;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::SectionCommands;
use crate::context::AppContext;

/// Handle `tdo section`.
pub async fn handle(
    action: SectionCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        SectionCommands::List { project } => list::run(project.as_deref(), ctx, flags).await,
        SectionCommands::Create { name, project } => {
            create::run(&name, &project, ctx, flags).await
        }
        SectionCommands::Move {
            section,
            project,
            to_project,
        } => move_::run(&section, project.as_deref(), &to_project, ctx, flags).await,
        SectionCommands::Rename {
            section,
            project,
            name,
        } => rename::run(&section, project.as_deref(), &name, ctx, flags).await,
    }
}

/// Resolve an optional project scope to its id.
fn scope_id(
    snapshot: &tdo_core::Snapshot,
    project: Option<&str>,
) -> Result<Option<String>, tdo_core::ResolveError> {
    project
        .map(|token| snapshot.resolve_project(token).map(|project| project.id.clone()))
        .transpose()
}
