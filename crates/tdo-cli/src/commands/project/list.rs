use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::views::ProjectView;
use crate::output::{ProjectTree, output};

pub async fn run(tree: bool, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let snapshot = ctx.projects().await?;
    let views = ProjectView::all(&snapshot);

    if tree {
        output(&ProjectTree(views), flags.format)
    } else {
        output(&views, flags.format)
    }
}
