use clap::{Args, Subcommand, ValueEnum};

use crate::cli::subcommands::{ProjectCommands, SectionCommands, TaskCommands};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Projects and their hierarchy.
    Project {
        #[command(subcommand)]
        action: ProjectCommands,
    },
    /// Sections inside projects.
    Section {
        #[command(subcommand)]
        action: SectionCommands,
    },
    /// Tasks, single and in batches.
    Task {
        #[command(subcommand)]
        action: TaskCommands,
    },
    /// Print the JSON schema of an output record.
    Schema(SchemaArgs),
}

#[derive(Clone, Debug, Args)]
pub struct SchemaArgs {
    /// Record type to describe.
    #[arg(value_enum)]
    pub record: SchemaType,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum SchemaType {
    Project,
    Section,
    Task,
    WriteReport,
}
