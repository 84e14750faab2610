use clap::Subcommand;

/// Section commands.
#[derive(Clone, Debug, Subcommand)]
pub enum SectionCommands {
    /// List sections with their project paths.
    List {
        /// Only sections of this project.
        #[arg(long)]
        project: Option<String>,
    },
    /// Create a section in a project.
    Create {
        name: String,
        #[arg(long)]
        project: String,
    },
    /// Move a section to another project.
    Move {
        /// Section id or name.
        section: String,
        /// Project the section currently lives in, to disambiguate by name.
        #[arg(long)]
        project: Option<String>,
        /// Destination project.
        #[arg(long)]
        to_project: String,
    },
    /// Rename a section.
    Rename {
        /// Section id or name.
        section: String,
        /// Project the section lives in, to disambiguate by name.
        #[arg(long)]
        project: Option<String>,
        /// New name.
        #[arg(long)]
        name: String,
    },
}
