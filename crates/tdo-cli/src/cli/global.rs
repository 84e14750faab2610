use clap::ValueEnum;

/// Shared output mode across all commands.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    /// Line-oriented text and aligned tables.
    Text,
    /// One pretty-printed JSON document.
    Json,
}

impl OutputFormat {
    /// Parse the configured default, falling back to text.
    #[must_use]
    pub fn from_config(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case("json") {
            Self::Json
        } else {
            Self::Text
        }
    }
}

/// Global flags available before or after subcommands.
#[derive(Clone, Debug)]
pub struct GlobalFlags {
    pub format: OutputFormat,
    pub limit: Option<u32>,
    pub default_limit: u32,
    pub quiet: bool,
    pub verbose: bool,
    pub dry_run: bool,
}
