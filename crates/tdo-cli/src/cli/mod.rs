use clap::Parser;
use tdo_config::GeneralConfig;

pub mod global;
pub mod root_commands;
pub mod subcommands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `tdo` binary.
#[derive(Debug, Parser)]
#[command(
    name = "tdo",
    version,
    about = "Work with Todoist projects, sections, and tasks by name or path"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (defaults to general.default_format, then text)
    #[arg(short, long, global = true)]
    pub format: Option<OutputFormat>,

    /// Shorthand for --format json
    #[arg(long, global = true, conflicts_with = "format")]
    pub json: bool,

    /// Max results to return from list and search commands
    #[arg(short, long, global = true)]
    pub limit: Option<u32>,

    /// Quiet mode (errors only on stderr)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Print the planned write commands without sending them
    #[arg(long, global = true)]
    pub dry_run: bool,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub fn global_flags(&self, general: &GeneralConfig) -> GlobalFlags {
        let format = if self.json {
            OutputFormat::Json
        } else {
            self.format
                .unwrap_or_else(|| OutputFormat::from_config(&general.default_format))
        };

        GlobalFlags {
            format,
            limit: self.limit,
            default_limit: general.default_limit,
            quiet: self.quiet,
            verbose: self.verbose,
            dry_run: self.dry_run,
        }
    }
}
