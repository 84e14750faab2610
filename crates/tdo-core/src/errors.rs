//! Resolution error types.
//!
//! Transport and configuration errors live in `tdo-api` and `tdo-config`.
//! Everything the resolver can refuse to do is expressed here so the CLI can
//! render it identically regardless of output format.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Which record collection a token was resolved against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Project,
    Section,
    Task,
}

impl EntityKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Project => "project",
            Self::Section => "section",
            Self::Task => "task",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One record that matched an ambiguous token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Candidate {
    pub id: String,
    pub label: String,
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}  {}", self.id, self.label)
    }
}

/// Errors raised while turning a user token into a record id.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// Blank token.
    #[error("empty {kind} reference")]
    EmptyToken { kind: EntityKind },

    /// No record matched by id, exact name/path, or substring.
    #[error("{kind} not found: '{token}'")]
    NotFound { kind: EntityKind, token: String },

    /// More than one record matched and no exact match broke the tie.
    #[error("{}", render_ambiguous(.kind, .token, .candidates))]
    Ambiguous {
        kind: EntityKind,
        token: String,
        candidates: Vec<Candidate>,
    },

    /// Several tokens of a batch failed.
    #[error("{}", render_batch(.0))]
    Batch(Vec<ResolveError>),
}

impl ResolveError {
    /// Candidates carried by an ambiguity error, empty for other variants.
    #[must_use]
    pub fn candidates(&self) -> &[Candidate] {
        match self {
            Self::Ambiguous { candidates, .. } => candidates,
            _ => &[],
        }
    }

    /// The token as the user typed it, if the error refers to a single token.
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        match self {
            Self::NotFound { token, .. } | Self::Ambiguous { token, .. } => Some(token),
            Self::EmptyToken { .. } | Self::Batch(_) => None,
        }
    }
}

fn render_ambiguous(kind: &EntityKind, token: &str, candidates: &[Candidate]) -> String {
    let mut out = format!(
        "{kind} '{token}' is ambiguous ({} matches); pass one of these ids instead:",
        candidates.len()
    );
    for candidate in candidates {
        out.push_str("\n  ");
        out.push_str(&candidate.to_string());
    }
    out
}

fn render_batch(errors: &[ResolveError]) -> String {
    let mut out = format!("{} reference(s) could not be resolved:", errors.len());
    for error in errors {
        for (index, line) in error.to_string().lines().enumerate() {
            out.push('\n');
            out.push_str(if index == 0 { "- " } else { "  " });
            out.push_str(line);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ambiguous_lists_every_candidate() {
        let err = ResolveError::Ambiguous {
            kind: EntityKind::Project,
            token: "sprint".into(),
            candidates: vec![
                Candidate {
                    id: "2".into(),
                    label: "Work » Sprint".into(),
                },
                Candidate {
                    id: "7".into(),
                    label: "Home » Sprint planning".into(),
                },
            ],
        };
        let text = err.to_string();
        assert!(text.starts_with("project 'sprint' is ambiguous (2 matches)"));
        assert!(text.contains("\n  2  Work » Sprint"));
        assert!(text.contains("\n  7  Home » Sprint planning"));
    }

    #[test]
    fn not_found_carries_original_token() {
        let err = ResolveError::NotFound {
            kind: EntityKind::Section,
            token: "Backlog ".into(),
        };
        assert_eq!(err.to_string(), "section not found: 'Backlog '");
        assert_eq!(err.token(), Some("Backlog "));
    }

    #[test]
    fn batch_indents_nested_candidates() {
        let err = ResolveError::Batch(vec![
            ResolveError::NotFound {
                kind: EntityKind::Task,
                token: "x".into(),
            },
            ResolveError::Ambiguous {
                kind: EntityKind::Task,
                token: "milk".into(),
                candidates: vec![Candidate {
                    id: "5".into(),
                    label: "Buy milk".into(),
                }],
            },
        ]);
        let text = err.to_string();
        assert!(text.starts_with("2 reference(s) could not be resolved:"));
        assert!(text.contains("\n- task not found: 'x'"));
        assert!(text.contains("\n- task 'milk' is ambiguous"));
        assert!(text.contains("\n    5  Buy milk"));
    }
}
