use tdo_core::{Snapshot, TaskScope};

use crate::cli::GlobalFlags;
use crate::commands::shared::limit::effective_limit;
use crate::context::AppContext;
use crate::output::output;
use crate::output::views::TaskView;

pub async fn run(
    query: &str,
    project: Option<&str>,
    section: Option<&str>,
    exact: bool,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    if query.trim().is_empty() {
        anyhow::bail!("search query must not be empty");
    }

    let snapshot = ctx.snapshot().await?;
    let limit = effective_limit(flags.limit, flags.default_limit);
    let views = search(&snapshot, query, project, section, exact, limit)?;
    output(&views, flags.format)
}

fn search(
    snapshot: &Snapshot,
    query: &str,
    project: Option<&str>,
    section: Option<&str>,
    exact: bool,
    limit: usize,
) -> anyhow::Result<Vec<TaskView>> {
    let project = project.map(|token| snapshot.resolve_project(token)).transpose()?;
    let project_id = project.map(|project| project.id.as_str());
    let section = section
        .map(|token| snapshot.resolve_section(token, project_id))
        .transpose()?;

    let scope = TaskScope {
        project_id,
        section_id: section.map(|section| section.id.as_str()),
    };
    let hits = snapshot.search_tasks(query, scope, exact);
    tracing::debug!(query, hits = hits.len(), "searched tasks");

    let mut views = TaskView::many(snapshot, hits.into_iter().take(limit));
    views.sort_by(|a, b| a.location.cmp(&b.location).then_with(|| a.content.cmp(&b.content)));
    Ok(views)
}
