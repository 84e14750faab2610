use tdo_core::Snapshot;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;
use crate::output::views::SectionView;

use super::scope_id;

pub async fn run(project: Option<&str>, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let snapshot = ctx.structure().await?;
    let views = collect(&snapshot, project)?;
    output(&views, flags.format)
}

/// Sections ordered by project path, then by their order inside the project.
fn collect(snapshot: &Snapshot, project: Option<&str>) -> anyhow::Result<Vec<SectionView>> {
    let project_id = scope_id(snapshot, project)?;
    let index = snapshot.index();

    let mut sections: Vec<_> = snapshot
        .sections
        .iter()
        .filter(|section| {
            project_id
                .as_deref()
                .is_none_or(|id| section.project_id == id)
        })
        .map(|section| (SectionView::build(&index, section), section.order))
        .collect();
    sections.sort_by(|(a, a_order), (b, b_order)| {
        a.project_path
            .cmp(&b.project_path)
            .then(a_order.cmp(b_order))
            .then_with(|| a.name.cmp(&b.name))
    });

    Ok(sections.into_iter().map(|(view, _)| view).collect())
}
