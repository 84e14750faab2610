use clap::Subcommand;

/// Project commands.
#[derive(Clone, Debug, Subcommand)]
pub enum ProjectCommands {
    /// List all projects with their paths.
    List {
        /// Indent by depth instead of printing full paths.
        #[arg(long)]
        tree: bool,
    },
    /// Resolve a project reference and print its id and path.
    Path {
        /// Project id, `id:<id>`, full path (`Work > Sprint`), name, or fragment.
        project: String,
        /// Only accept an id, a full path, or a name.
        #[arg(long)]
        exact: bool,
    },
    /// Create a project.
    Create {
        name: String,
        /// Parent project.
        #[arg(long)]
        parent: Option<String>,
        #[arg(long)]
        color: Option<String>,
        #[arg(long)]
        favorite: bool,
        /// list, board, or calendar.
        #[arg(long)]
        view_style: Option<String>,
    },
    /// Move a project under another project, or to the top level.
    Move {
        project: String,
        /// New parent project.
        #[arg(long, conflicts_with = "root", required_unless_present = "root")]
        parent: Option<String>,
        /// Move to the top level.
        #[arg(long)]
        root: bool,
    },
    /// Update project attributes.
    Update {
        project: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        color: Option<String>,
        #[arg(long)]
        favorite: Option<bool>,
        /// list, board, or calendar.
        #[arg(long)]
        view_style: Option<String>,
    },
}
