use serde::Serialize;

use crate::cli::OutputFormat;
use crate::ui;

pub mod table;
pub mod views;

use table::{TableOptions, render_table};
use views::{ChangeStatus, ProjectView, SectionView, Summary, TaskView, WriteReport};

/// Line-oriented rendering for `--format text`.
pub trait TextView {
    fn to_text(&self, options: TableOptions) -> String;
}

/// Render a response to a string in the requested format.
pub fn render<T: Serialize + TextView>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Text => Ok(value.to_text(table_options())),
    }
}

/// Print a response in the requested format.
pub fn output<T: Serialize + TextView>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(value, format)?;
    println!("{rendered}");
    Ok(())
}

fn table_options() -> TableOptions {
    let prefs = ui::prefs();
    TableOptions {
        max_width: prefs.term_width,
        color: prefs.table_color,
    }
}

fn or_empty(rows: &[Vec<String>], text: impl FnOnce() -> String) -> String {
    if rows.is_empty() {
        String::from("(no rows)")
    } else {
        text()
    }
}

fn opt(value: Option<&str>) -> String {
    value.unwrap_or("-").to_string()
}

impl TextView for ProjectView {
    fn to_text(&self, _options: TableOptions) -> String {
        format!("{}  {}", self.id, self.path)
    }
}

impl TextView for Vec<ProjectView> {
    fn to_text(&self, options: TableOptions) -> String {
        let rows: Vec<Vec<String>> = self
            .iter()
            .map(|view| {
                vec![
                    view.id.clone(),
                    view.path.clone(),
                    String::from(if view.is_favorite { "*" } else { "" }),
                ]
            })
            .collect();
        or_empty(&rows, || render_table(&["id", "path", "fav"], &rows, options))
    }
}

/// Projects rendered as an indented outline.
#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct ProjectTree(pub Vec<ProjectView>);

impl TextView for ProjectTree {
    fn to_text(&self, _options: TableOptions) -> String {
        if self.0.is_empty() {
            return String::from("(no rows)");
        }
        self.0
            .iter()
            .map(|view| format!("{}{}  ({})", "  ".repeat(view.depth), view.name, view.id))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl TextView for Vec<SectionView> {
    fn to_text(&self, options: TableOptions) -> String {
        let rows: Vec<Vec<String>> = self
            .iter()
            .map(|view| vec![view.id.clone(), view.name.clone(), view.project_path.clone()])
            .collect();
        or_empty(&rows, || render_table(&["id", "name", "project"], &rows, options))
    }
}

impl TextView for Vec<TaskView> {
    fn to_text(&self, options: TableOptions) -> String {
        let rows: Vec<Vec<String>> = self
            .iter()
            .map(|view| {
                vec![
                    view.id.clone(),
                    view.priority.label(),
                    view.content.clone(),
                    view.location.clone(),
                    opt(view.due.as_deref()),
                    view.labels.join(","),
                ]
            })
            .collect();
        or_empty(&rows, || {
            render_table(
                &["id", "pri", "content", "location", "due", "labels"],
                &rows,
                options,
            )
        })
    }
}

impl<V: Summary> TextView for WriteReport<V> {
    fn to_text(&self, _options: TableOptions) -> String {
        let total = self.changes.len();
        let header = if self.dry_run {
            format!("{}: dry run, {total} command(s) planned", self.operation)
        } else {
            let applied = self
                .changes
                .iter()
                .filter(|change| change.status == ChangeStatus::Applied)
                .count();
            format!("{}: {applied} of {total} command(s) applied", self.operation)
        };

        let mut lines = vec![header];
        for change in &self.changes {
            let before = change
                .before
                .as_ref()
                .map_or_else(|| String::from("-"), Summary::summary);
            let after = match (&change.after, change.status) {
                (Some(after), _) => after.summary(),
                (None, ChangeStatus::Planned) => change.args.to_string(),
                (None, _) => String::from("-"),
            };
            let mut line = format!(
                "  {:<8} {:<15} {}  {before} -> {after}",
                change.status.as_str(),
                change.command,
                change.id.as_deref().unwrap_or("(new)"),
            );
            if let Some(error) = &change.error {
                line.push_str(&format!("  ({error})"));
            }
            lines.push(line);
        }
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::views::{Change, ChangeStatus, ProjectView, SectionView, WriteReport};
    use super::{ProjectTree, TextView, render};
    use super::table::TableOptions;
    use crate::cli::OutputFormat;

    const PLAIN: TableOptions = TableOptions {
        max_width: None,
        color: false,
    };

    fn project(id: &str, name: &str, path: &str, depth: usize) -> ProjectView {
        ProjectView {
            id: id.into(),
            name: name.into(),
            path: path.into(),
            depth,
            parent_id: None,
            color: None,
            is_favorite: false,
            view_style: None,
            is_inbox: false,
        }
    }

    fn section(id: &str) -> SectionView {
        SectionView {
            id: id.into(),
            name: "Planning".into(),
            project_id: "2".into(),
            project_path: "Work » Sprint".into(),
        }
    }

    #[test]
    fn json_render_is_valid_json() {
        let views = vec![project("1", "Work", "Work", 0)];
        let out = render(&views, OutputFormat::Json).expect("json render should work");
        let parsed: serde_json::Value = serde_json::from_str(&out).expect("json should parse");
        assert_eq!(parsed[0]["path"], "Work");
    }

    #[test]
    fn tree_indents_by_depth() {
        let tree = ProjectTree(vec![
            project("1", "Work", "Work", 0),
            project("2", "Sprint", "Work » Sprint", 1),
        ]);
        assert_eq!(tree.to_text(PLAIN), "Work  (1)\n  Sprint  (2)");
    }

    #[test]
    fn empty_lists_say_so() {
        let views: Vec<SectionView> = Vec::new();
        assert_eq!(views.to_text(PLAIN), "(no rows)");
    }

    #[test]
    fn write_report_text_shows_before_and_after() {
        let report = WriteReport {
            operation: "section move".into(),
            dry_run: false,
            ok: false,
            changes: vec![
                Change {
                    command: "section_move".into(),
                    uuid: "u1".into(),
                    id: Some("11".into()),
                    status: ChangeStatus::Applied,
                    error: None,
                    error_code: None,
                    args: json!({"id": "11", "project_id": "3"}),
                    before: Some(section("11")),
                    after: Some(SectionView {
                        project_path: "Home".into(),
                        ..section("11")
                    }),
                },
                Change {
                    command: "section_move".into(),
                    uuid: "u2".into(),
                    id: Some("12".into()),
                    status: ChangeStatus::Failed,
                    error: Some("Section not found".into()),
                    error_code: Some(22),
                    args: json!({"id": "12", "project_id": "3"}),
                    before: None,
                    after: None,
                },
            ],
        };

        let text = report.to_text(PLAIN);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "section move: 1 of 2 command(s) applied");
        assert!(lines[1].contains("Planning (Work » Sprint) -> Planning (Home)"));
        assert!(lines[2].starts_with("  failed"));
        assert!(lines[2].ends_with("(Section not found)"));
    }

    #[test]
    fn dry_run_report_prints_planned_args() {
        let report: WriteReport<SectionView> = WriteReport {
            operation: "section create".into(),
            dry_run: true,
            ok: true,
            changes: vec![Change {
                command: "section_add".into(),
                uuid: "u1".into(),
                id: None,
                status: ChangeStatus::Planned,
                error: None,
                error_code: None,
                args: json!({"name": "Later", "project_id": "2"}),
                before: None,
                after: None,
            }],
        };

        let text = report.to_text(PLAIN);
        assert!(text.starts_with("section create: dry run, 1 command(s) planned"));
        assert!(text.contains("(new)  - -> {\"name\":\"Later\",\"project_id\":\"2\"}"));
    }
}
