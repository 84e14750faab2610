//! Submitting planned commands and reporting what changed.

use serde::Serialize;
use tdo_api::{CommandResult, SyncCommand};
use tdo_core::Snapshot;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;
use crate::output::views::{Change, ChangeStatus, RecordView, Summary, WriteReport};
use crate::progress::spin;

/// Submit `commands` (or print them under `--dry-run`) and report each one
/// with the touched record as it looked in `before` and after the write.
///
/// # Errors
///
/// Fails when the submission fails as a whole, or after printing the report
/// when any single command was rejected.
pub async fn apply<V>(
    ctx: &AppContext,
    flags: &GlobalFlags,
    operation: &str,
    before: &Snapshot,
    commands: Vec<SyncCommand>,
) -> anyhow::Result<()>
where
    V: Serialize + Summary + RecordView,
{
    if commands.is_empty() {
        anyhow::bail!("{operation}: nothing to change");
    }

    if flags.dry_run {
        let report = planned_report::<V>(operation, before, &commands)?;
        return output(&report, flags.format);
    }

    tracing::info!(operation, commands = commands.len(), "submitting changes");
    let outcome = spin("applying changes", ctx.client.submit(&commands)).await?;

    let after = match ctx.snapshot().await {
        Ok(snapshot) => Some(snapshot),
        Err(error) => {
            tracing::warn!(%error, "changes were submitted but the refreshed state could not be fetched");
            None
        }
    };

    let report =
        applied_report::<V>(operation, before, after.as_ref(), &commands, &outcome.results)?;
    output(&report, flags.format)?;
    outcome.ensure_ok()?;
    Ok(())
}

fn args_of(command: &SyncCommand) -> anyhow::Result<serde_json::Value> {
    let mut wire = serde_json::to_value(command)?;
    Ok(wire
        .get_mut("args")
        .map(serde_json::Value::take)
        .unwrap_or_default())
}

pub fn planned_report<V: RecordView>(
    operation: &str,
    before: &Snapshot,
    commands: &[SyncCommand],
) -> anyhow::Result<WriteReport<V>> {
    let index = before.index();
    let changes = commands
        .iter()
        .map(|command| {
            let id = command.command.target_id().map(str::to_string);
            Ok(Change {
                command: command.command.kind().to_string(),
                uuid: command.uuid.to_string(),
                before: id.as_deref().and_then(|id| V::from_index(&index, id)),
                id,
                status: ChangeStatus::Planned,
                error: None,
                error_code: None,
                args: args_of(command)?,
                after: None,
            })
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    Ok(WriteReport {
        operation: operation.to_string(),
        dry_run: true,
        ok: true,
        changes,
    })
}

pub fn applied_report<V: RecordView>(
    operation: &str,
    before: &Snapshot,
    after: Option<&Snapshot>,
    commands: &[SyncCommand],
    results: &[CommandResult],
) -> anyhow::Result<WriteReport<V>> {
    let before_index = before.index();
    let after_index = after.map(Snapshot::index);
    let changes = commands
        .iter()
        .zip(results)
        .map(|(command, result)| {
            let id = result.id.clone();
            let before_view = command
                .command
                .target_id()
                .and_then(|target| V::from_index(&before_index, target));
            let after_view = match (&after_index, id.as_deref()) {
                (Some(index), Some(id)) if result.ok => V::from_index(index, id),
                _ => None,
            };
            Ok(Change {
                command: command.command.kind().to_string(),
                uuid: command.uuid.to_string(),
                id,
                status: if result.ok {
                    ChangeStatus::Applied
                } else {
                    ChangeStatus::Failed
                },
                error: result.error.as_ref().map(|error| error.message.clone()),
                error_code: result.error.as_ref().and_then(|error| error.code),
                args: args_of(command)?,
                before: before_view,
                after: after_view,
            })
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    Ok(WriteReport {
        operation: operation.to_string(),
        ok: changes
            .iter()
            .all(|change| change.status == ChangeStatus::Applied),
        dry_run: false,
        changes,
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use tdo_api::commands::{ItemAdd, ItemMove, MoveTarget};
    use tdo_api::{Command, CommandFailure, CommandResult, SyncCommand};
    use tdo_core::Snapshot;
    use tdo_core::entities::{Project, Task};

    use super::{applied_report, planned_report};
    use crate::output::views::{ChangeStatus, TaskView};

    fn snapshot(project_of_five: &str) -> Snapshot {
        Snapshot::new(
            vec![
                Project::new("1", "Work", None),
                Project::new("2", "Home", None),
            ],
            Vec::new(),
            vec![Task::new("5", "Buy milk").in_project(project_of_five)],
        )
    }

    fn commands() -> Vec<SyncCommand> {
        vec![
            SyncCommand::new(Command::ItemMove(ItemMove {
                id: "5".into(),
                target: MoveTarget::ProjectId("2".into()),
            })),
            SyncCommand::new(Command::ItemAdd(ItemAdd {
                content: "Call dairy".into(),
                ..Default::default()
            })),
        ]
    }

    #[test]
    fn planned_report_carries_args_and_before_state() {
        let report = planned_report::<TaskView>("task move", &snapshot("1"), &commands())
            .expect("report builds");

        assert!(report.dry_run);
        assert_eq!(report.changes.len(), 2);
        let first = &report.changes[0];
        assert_eq!(first.status, ChangeStatus::Planned);
        assert_eq!(first.args, json!({"id": "5", "project_id": "2"}));
        assert_eq!(
            first.before.as_ref().map(|view| view.location.as_str()),
            Some("Work")
        );
        assert!(report.changes[1].id.is_none());
    }

    #[test]
    fn applied_report_pairs_results_with_after_state() {
        let commands = commands();
        let results = vec![
            CommandResult {
                uuid: commands[0].uuid.to_string(),
                kind: "item_move",
                id: Some("5".into()),
                ok: true,
                error: None,
            },
            CommandResult {
                uuid: commands[1].uuid.to_string(),
                kind: "item_add",
                id: None,
                ok: false,
                error: Some(CommandFailure {
                    code: Some(42),
                    message: "Invalid argument".into(),
                }),
            },
        ];

        let after = snapshot("2");
        let report = applied_report::<TaskView>(
            "task move",
            &snapshot("1"),
            Some(&after),
            &commands,
            &results,
        )
        .expect("report builds");

        assert!(!report.ok);
        let moved = &report.changes[0];
        assert_eq!(moved.status, ChangeStatus::Applied);
        assert_eq!(
            moved.after.as_ref().map(|view| view.location.as_str()),
            Some("Home")
        );
        let failed = &report.changes[1];
        assert_eq!(failed.status, ChangeStatus::Failed);
        assert_eq!(failed.error.as_deref(), Some("Invalid argument"));
        assert_eq!(failed.error_code, Some(42));
        assert!(failed.after.is_none());
    }

    #[test]
    fn missing_refresh_leaves_after_empty() {
        let commands = commands();
        let results = vec![CommandResult {
            uuid: commands[0].uuid.to_string(),
            kind: "item_move",
            id: Some("5".into()),
            ok: true,
            error: None,
        }];
        let report = applied_report::<TaskView>(
            "task move",
            &snapshot("1"),
            None,
            &commands[..1],
            &results,
        )
        .expect("report builds");
        assert!(report.ok);
        assert!(report.changes[0].after.is_none());
        assert!(report.changes[0].before.is_some());
    }
}
