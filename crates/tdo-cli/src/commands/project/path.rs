use tdo_core::MatchMode;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;
use crate::output::views::ProjectView;

pub async fn run(token: &str, exact: bool, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let snapshot = ctx.projects().await?;
    let mode = if exact { MatchMode::Exact } else { MatchMode::Auto };
    let project = snapshot.resolve_project_with(token, mode)?;

    let view = ProjectView::build(&snapshot.project_index(), project);
    output(&view, flags.format)
}
