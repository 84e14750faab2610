use tdo_api::TaskQuery;
use tdo_core::Snapshot;
use tdo_core::entities::Task;

use crate::cli::GlobalFlags;
use crate::commands::shared::limit::effective_limit;
use crate::context::AppContext;
use crate::output::output;
use crate::output::views::TaskView;

pub struct Params {
    pub project: Option<String>,
    pub section: Option<String>,
    pub label: Option<String>,
    pub filter: Option<String>,
}

pub async fn run(params: Params, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let structure = ctx.structure().await?;
    let query = build_query(&params, &structure)?;
    tracing::debug!(query = %query.query_string(), "listing tasks");

    let tasks = ctx.tasks(&query).await?;
    let Snapshot {
        projects, sections, ..
    } = structure;
    let snapshot = Snapshot::new(projects, sections, tasks);

    let limit = effective_limit(flags.limit, flags.default_limit);
    let ordered = ordered(&snapshot.tasks);
    let views = TaskView::many(&snapshot, ordered.into_iter().take(limit));
    output(&views, flags.format)
}

/// Translate name references into the server-side query.
fn build_query(params: &Params, snapshot: &Snapshot) -> anyhow::Result<TaskQuery> {
    let project = params
        .project
        .as_deref()
        .map(|token| snapshot.resolve_project(token))
        .transpose()?;
    let section = params
        .section
        .as_deref()
        .map(|token| snapshot.resolve_section(token, project.map(|project| project.id.as_str())))
        .transpose()?;

    Ok(TaskQuery {
        project_id: project.map(|project| project.id.clone()),
        section_id: section.map(|section| section.id.clone()),
        label: params.label.clone(),
        filter: params.filter.clone(),
    })
}

/// Highest priority first, then service order.
fn ordered(tasks: &[Task]) -> Vec<&Task> {
    let mut ordered: Vec<&Task> = tasks.iter().collect();
    ordered.sort_by(|a, b| {
        b.priority
            .cmp(&a.priority)
            .then(a.order.cmp(&b.order))
            .then_with(|| a.id.cmp(&b.id))
    });
    ordered
}
