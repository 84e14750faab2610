use std::io::IsTerminal;
use std::sync::OnceLock;

use crate::cli::{GlobalFlags, OutputFormat};

#[derive(Clone, Copy, Debug)]
pub struct UiPrefs {
    pub table_color: bool,
    pub progress: bool,
    pub term_width: Option<usize>,
}

static UI_PREFS: OnceLock<UiPrefs> = OnceLock::new();

pub fn init(flags: &GlobalFlags) {
    let _ = UI_PREFS.set(compute(
        flags,
        std::io::stdout().is_terminal(),
        std::io::stderr().is_terminal(),
        std::env::var_os("NO_COLOR").is_some(),
        std::env::var("COLUMNS").ok().as_deref(),
    ));
}

fn compute(
    flags: &GlobalFlags,
    stdout_tty: bool,
    stderr_tty: bool,
    no_color: bool,
    columns: Option<&str>,
) -> UiPrefs {
    let text = flags.format == OutputFormat::Text;

    let term_width = columns
        .and_then(|value| value.parse::<usize>().ok())
        .filter(|width| *width >= 40);

    UiPrefs {
        table_color: stdout_tty && text && !no_color,
        progress: stderr_tty && text && !flags.quiet,
        term_width,
    }
}

#[must_use]
pub fn prefs() -> UiPrefs {
    *UI_PREFS.get().unwrap_or(&UiPrefs {
        table_color: false,
        progress: false,
        term_width: None,
    })
}

#[cfg(test)]
mod tests {
    use super::compute;
    use crate::cli::{GlobalFlags, OutputFormat};

    fn flags(format: OutputFormat, quiet: bool) -> GlobalFlags {
        GlobalFlags {
            format,
            limit: None,
            default_limit: 50,
            quiet,
            verbose: false,
            dry_run: false,
        }
    }

    #[test]
    fn json_output_disables_spinner_and_color() {
        let prefs = compute(&flags(OutputFormat::Json, false), true, true, false, None);
        assert!(!prefs.progress);
        assert!(!prefs.table_color);
    }

    #[test]
    fn spinner_follows_stderr_not_stdout() {
        let prefs = compute(&flags(OutputFormat::Text, false), false, true, false, None);
        assert!(prefs.progress);
        assert!(!prefs.table_color);

        let prefs = compute(&flags(OutputFormat::Text, true), true, true, false, None);
        assert!(!prefs.progress);
    }

    #[test]
    fn narrow_or_garbage_columns_are_ignored() {
        let text = flags(OutputFormat::Text, false);
        assert_eq!(compute(&text, true, true, true, Some("120")).term_width, Some(120));
        assert_eq!(compute(&text, true, true, true, Some("20")).term_width, None);
        assert_eq!(compute(&text, true, true, true, Some("wide")).term_width, None);
        assert!(!compute(&text, true, true, true, None).table_color);
    }
}
