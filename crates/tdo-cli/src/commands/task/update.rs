use tdo_api::commands::{DueSpec, ItemUpdate};
use tdo_api::{Command, SyncCommand};
use tdo_core::entities::Task;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::{TaskFieldArgs, TaskRefArgs};
use crate::commands::shared::parse::clean_labels;
use crate::commands::shared::write::apply;
use crate::context::AppContext;
use crate::output::views::TaskView;

use super::{match_mode, project_scope};

pub async fn run(
    target: &TaskRefArgs,
    fields: &TaskFieldArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    validate_fields(fields)?;

    let snapshot = ctx.snapshot().await?;
    let scope = project_scope(&snapshot, target.in_project.as_deref())?;
    let task = snapshot.resolve_task(&target.task, scope, match_mode(target.exact))?;
    let Some(update) = build_update(task, fields) else {
        anyhow::bail!("'{}' already has the requested values", task.content);
    };

    apply::<TaskView>(
        ctx,
        flags,
        "task update",
        &snapshot,
        vec![SyncCommand::new(Command::ItemUpdate(update))],
    )
    .await
}

/// Reject updates that could never change anything, before any fetch.
pub fn validate_fields(fields: &TaskFieldArgs) -> anyhow::Result<()> {
    if fields.is_empty() {
        anyhow::bail!(
            "At least one of --content, --description, --priority, --due, --labels, --add-label, or --remove-label must be provided"
        );
    }
    if fields
        .content
        .as_deref()
        .is_some_and(|content| content.trim().is_empty())
    {
        anyhow::bail!("--content must not be empty");
    }
    Ok(())
}

/// The update `fields` make to `task`, or `None` when nothing would change.
///
/// `--labels` replaces the label set; `--add-label` and `--remove-label`
/// edit the task's current labels.
pub fn build_update(task: &Task, fields: &TaskFieldArgs) -> Option<ItemUpdate> {
    let labels = match &fields.labels {
        Some(labels) => Some(clean_labels(labels)),
        None if fields.add_label.is_empty() && fields.remove_label.is_empty() => None,
        None => {
            let remove = clean_labels(&fields.remove_label);
            let mut next: Vec<String> = task
                .labels
                .iter()
                .filter(|label| !remove.iter().any(|gone| gone.eq_ignore_ascii_case(label)))
                .cloned()
                .collect();
            for label in clean_labels(&fields.add_label) {
                if !next.iter().any(|have| have.eq_ignore_ascii_case(&label)) {
                    next.push(label);
                }
            }
            (next != task.labels).then_some(next)
        }
    };

    let update = ItemUpdate {
        id: task.id.clone(),
        content: fields.content.as_deref().map(|content| content.trim().to_string()),
        description: fields.description.clone(),
        priority: fields.priority,
        due: fields.due.as_deref().map(DueSpec::new),
        labels,
    };
    (!update.is_noop()).then_some(update)
}
