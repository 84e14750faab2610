use tdo_api::commands::ProjectUpdate;
use tdo_api::{Command, SyncCommand};
use tdo_core::enums::ViewStyle;
use tdo_core::entities::Project;

use crate::cli::GlobalFlags;
use crate::commands::shared::parse::parse_enum;
use crate::commands::shared::write::apply;
use crate::context::AppContext;
use crate::output::views::ProjectView;

pub struct Params {
    pub project: String,
    pub name: Option<String>,
    pub color: Option<String>,
    pub favorite: Option<bool>,
    pub view_style: Option<String>,
}

pub async fn run(params: Params, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    validate_update_params(&params)?;
    let view_style = params
        .view_style
        .as_deref()
        .map(|raw| parse_enum::<ViewStyle>(raw, "view-style"))
        .transpose()?;

    let snapshot = ctx.projects().await?;
    let project = snapshot.resolve_project(&params.project)?;
    let command = plan(project, &params, view_style);
    apply::<ProjectView>(ctx, flags, "project update", &snapshot, vec![command]).await
}

fn validate_update_params(params: &Params) -> anyhow::Result<()> {
    if params.name.is_none()
        && params.color.is_none()
        && params.favorite.is_none()
        && params.view_style.is_none()
    {
        anyhow::bail!(
            "At least one of --name, --color, --favorite, or --view-style must be provided"
        );
    }
    if params
        .name
        .as_deref()
        .is_some_and(|name| name.trim().is_empty())
    {
        anyhow::bail!("--name must not be empty");
    }
    Ok(())
}

fn plan(project: &Project, params: &Params, view_style: Option<ViewStyle>) -> SyncCommand {
    SyncCommand::new(Command::ProjectUpdate(ProjectUpdate {
        id: project.id.clone(),
        name: params.name.as_deref().map(|name| name.trim().to_string()),
        color: params.color.clone(),
        is_favorite: params.favorite,
        view_style,
    }))
}
