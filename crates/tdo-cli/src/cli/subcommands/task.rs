use clap::{Args, Subcommand};
use tdo_core::enums::Priority;

/// A single task reference and the scope it is resolved in.
#[derive(Clone, Debug, Args)]
pub struct TaskRefArgs {
    /// Task id, `id:<id>`, or content.
    pub task: String,
    /// Only consider tasks in this project.
    #[arg(long)]
    pub in_project: Option<String>,
    /// Match content exactly, never by substring.
    #[arg(long)]
    pub exact: bool,
}

/// Which tasks a batch command acts on.
#[derive(Clone, Debug, Args)]
#[group(required = true, multiple = false)]
pub struct TaskSelectorArgs {
    /// Task references, comma separated (ids, `id:<id>`, or content).
    #[arg(long, value_delimiter = ',')]
    pub ids: Vec<String>,
    /// Server-side filter query, e.g. `today & #Work`.
    #[arg(long)]
    pub filter: Option<String>,
}

/// Where a task goes. `--project` alone moves to the project root; with
/// `--section` or `--parent` it narrows their resolution.
#[derive(Clone, Debug, Args)]
#[group(required = true, multiple = true)]
pub struct DestinationArgs {
    #[arg(long)]
    pub project: Option<String>,
    #[arg(long, conflicts_with = "parent")]
    pub section: Option<String>,
    /// Parent task.
    #[arg(long)]
    pub parent: Option<String>,
}

/// Editable task fields.
#[derive(Clone, Debug, Default, Args)]
pub struct TaskFieldArgs {
    #[arg(long)]
    pub content: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    /// 1 (normal) to 4 (urgent), or p1 (urgent) to p4 (normal).
    #[arg(long)]
    pub priority: Option<Priority>,
    /// Natural-language due date, e.g. "tomorrow 5pm" or "no date".
    #[arg(long)]
    pub due: Option<String>,
    /// Replace all labels, comma separated.
    #[arg(long, value_delimiter = ',', conflicts_with_all = ["add_label", "remove_label"])]
    pub labels: Option<Vec<String>>,
    /// Add a label, keeping existing ones. Repeatable.
    #[arg(long)]
    pub add_label: Vec<String>,
    /// Remove a label. Repeatable.
    #[arg(long)]
    pub remove_label: Vec<String>,
}

impl TaskFieldArgs {
    /// Whether no field was given at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.content.is_none()
            && self.description.is_none()
            && self.priority.is_none()
            && self.due.is_none()
            && self.labels.is_none()
            && self.add_label.is_empty()
            && self.remove_label.is_empty()
    }
}

/// Task commands.
#[derive(Clone, Debug, Subcommand)]
pub enum TaskCommands {
    /// List active tasks.
    List {
        #[arg(long)]
        project: Option<String>,
        /// Requires --project when the section name is not unique.
        #[arg(long)]
        section: Option<String>,
        #[arg(long)]
        label: Option<String>,
        /// Server-side filter query.
        #[arg(long)]
        filter: Option<String>,
    },
    /// Search task content locally and show where each match lives.
    Search {
        query: String,
        #[arg(long)]
        project: Option<String>,
        #[arg(long)]
        section: Option<String>,
        /// Whole-content match instead of substring.
        #[arg(long)]
        exact: bool,
    },
    /// Create a task.
    Create {
        content: String,
        #[arg(long)]
        project: Option<String>,
        #[arg(long)]
        section: Option<String>,
        /// Parent task.
        #[arg(long)]
        parent: Option<String>,
        #[arg(long)]
        description: Option<String>,
        /// 1 (normal) to 4 (urgent), or p1 (urgent) to p4 (normal).
        #[arg(long)]
        priority: Option<Priority>,
        #[arg(long)]
        due: Option<String>,
        /// Comma separated.
        #[arg(long, value_delimiter = ',')]
        labels: Option<Vec<String>>,
    },
    /// Move a task to a project, a section, or under another task.
    Move {
        #[command(flatten)]
        target: TaskRefArgs,
        #[command(flatten)]
        destination: DestinationArgs,
    },
    /// Update task fields.
    Update {
        #[command(flatten)]
        target: TaskRefArgs,
        #[command(flatten)]
        fields: TaskFieldArgs,
    },
    /// Complete a task.
    Complete {
        #[command(flatten)]
        target: TaskRefArgs,
    },
    /// Reopen a completed task by id.
    Reopen {
        /// Task id (completed tasks are not listed, so names cannot be resolved).
        id: String,
    },
    /// Move many tasks with one sync request.
    BatchMove {
        #[command(flatten)]
        selector: TaskSelectorArgs,
        /// Only consider tasks in this project when resolving --ids.
        #[arg(long)]
        in_project: Option<String>,
        #[arg(long)]
        exact: bool,
        #[command(flatten)]
        destination: DestinationArgs,
    },
    /// Update many tasks with one sync request.
    BatchUpdate {
        #[command(flatten)]
        selector: TaskSelectorArgs,
        /// Only consider tasks in this project when resolving --ids.
        #[arg(long)]
        in_project: Option<String>,
        #[arg(long)]
        exact: bool,
        #[command(flatten)]
        fields: TaskFieldArgs,
    },
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use pretty_assertions::assert_eq;
    use tdo_core::enums::Priority;

    use crate::cli::{Cli, Commands};

    use super::TaskCommands;

    fn parse(args: &[&str]) -> Result<TaskCommands, clap::Error> {
        let cli = Cli::try_parse_from(std::iter::once("tdo").chain(args.iter().copied()))?;
        match cli.command {
            Commands::Task { action } => Ok(action),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn move_needs_a_destination() {
        assert!(parse(&["task", "move", "Buy milk"]).is_err());
        assert!(
            parse(&["task", "move", "Buy milk", "--section", "Planning", "--parent", "5"]).is_err()
        );

        let TaskCommands::Move {
            target,
            destination,
        } = parse(&[
            "task",
            "move",
            "Buy milk",
            "--in-project",
            "Work",
            "--project",
            "Work > Sprint",
            "--section",
            "Planning",
        ])
        .expect("should parse")
        else {
            panic!("expected move");
        };
        assert_eq!(target.task, "Buy milk");
        assert_eq!(target.in_project.as_deref(), Some("Work"));
        assert_eq!(destination.project.as_deref(), Some("Work > Sprint"));
        assert_eq!(destination.section.as_deref(), Some("Planning"));
    }

    #[test]
    fn priority_accepts_both_spellings() {
        let TaskCommands::Create { priority, .. } =
            parse(&["task", "create", "Ship", "--priority", "p1"]).expect("should parse")
        else {
            panic!("expected create");
        };
        assert_eq!(priority, Some(Priority::URGENT));
        assert!(parse(&["task", "create", "Ship", "--priority", "5"]).is_err());
    }

    #[test]
    fn batch_selector_is_exclusive_and_required() {
        assert!(parse(&["task", "batch-move", "--project", "Work"]).is_err());
        assert!(
            parse(&[
                "task",
                "batch-move",
                "--ids",
                "1,2",
                "--filter",
                "today",
                "--project",
                "Work"
            ])
            .is_err()
        );

        let TaskCommands::BatchMove { selector, .. } =
            parse(&["task", "batch-move", "--ids", "1,Buy milk", "--project", "Work"])
                .expect("should parse")
        else {
            panic!("expected batch-move");
        };
        assert_eq!(selector.ids, vec!["1", "Buy milk"]);
    }

    #[test]
    fn labels_replace_conflicts_with_incremental_edits() {
        assert!(
            parse(&["task", "update", "5", "--labels", "a,b", "--add-label", "c"]).is_err()
        );

        let TaskCommands::Update { fields, .. } =
            parse(&["task", "update", "5", "--add-label", "a", "--add-label", "b"])
                .expect("should parse")
        else {
            panic!("expected update");
        };
        assert_eq!(fields.add_label, vec!["a", "b"]);
        assert!(!fields.is_empty());
    }

    #[test]
    fn update_without_fields_parses_but_is_empty() {
        let TaskCommands::Update { fields, .. } =
            parse(&["task", "update", "5"]).expect("should parse")
        else {
            panic!("expected update");
        };
        assert!(fields.is_empty());
    }
}
