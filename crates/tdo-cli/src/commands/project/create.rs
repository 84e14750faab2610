use tdo_api::commands::ProjectAdd;
use tdo_api::{Command, SyncCommand};
use tdo_core::Snapshot;
use tdo_core::enums::ViewStyle;

use crate::cli::GlobalFlags;
use crate::commands::shared::parse::parse_enum;
use crate::commands::shared::write::apply;
use crate::context::AppContext;
use crate::output::views::ProjectView;

pub struct Params {
    pub name: String,
    pub parent: Option<String>,
    pub color: Option<String>,
    pub favorite: bool,
    pub view_style: Option<String>,
}

pub async fn run(params: Params, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let view_style = params
        .view_style
        .as_deref()
        .map(|raw| parse_enum::<ViewStyle>(raw, "view-style"))
        .transpose()?;
    if params.name.trim().is_empty() {
        anyhow::bail!("project name must not be empty");
    }

    let snapshot = ctx.projects().await?;
    let command = plan(&params, view_style, &snapshot)?;
    apply::<ProjectView>(ctx, flags, "project create", &snapshot, vec![command]).await
}

fn plan(
    params: &Params,
    view_style: Option<ViewStyle>,
    snapshot: &Snapshot,
) -> anyhow::Result<SyncCommand> {
    let parent_id = params
        .parent
        .as_deref()
        .map(|token| snapshot.resolve_project(token).map(|project| project.id.clone()))
        .transpose()?;

    Ok(SyncCommand::new(Command::ProjectAdd(ProjectAdd {
        name: params.name.trim().to_string(),
        parent_id,
        color: params.color.clone(),
        is_favorite: params.favorite.then_some(true),
        view_style,
    })))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tdo_api::Command;
    use tdo_core::Snapshot;
    use tdo_core::entities::Project;
    use tdo_core::enums::ViewStyle;

    use super::{Params, plan};

    fn params(parent: Option<&str>) -> Params {
        Params {
            name: " Backend ".into(),
            parent: parent.map(str::to_string),
            color: None,
            favorite: true,
            view_style: None,
        }
    }

    fn snapshot() -> Snapshot {
        Snapshot::new(
            vec![
                Project::new("1", "Work", None),
                Project::new("2", "Sprint", Some("1")),
            ],
            Vec::new(),
            Vec::new(),
        )
    }

    #[test]
    fn resolves_parent_by_path() {
        let command = plan(&params(Some("Work > Sprint")), Some(ViewStyle::Board), &snapshot())
            .expect("plan");
        let Command::ProjectAdd(args) = command.command else {
            panic!("expected project_add");
        };
        assert_eq!(args.name, "Backend");
        assert_eq!(args.parent_id.as_deref(), Some("2"));
        assert_eq!(args.is_favorite, Some(true));
        assert_eq!(args.view_style, Some(ViewStyle::Board));
        assert!(command.temp_id.is_some());
    }

    #[test]
    fn unknown_parent_fails_before_any_write() {
        let err = plan(&params(Some("Nope")), None, &snapshot()).expect_err("should fail");
        assert!(err.to_string().contains("not found"));
    }
}
