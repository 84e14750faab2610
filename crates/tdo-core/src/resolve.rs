//! Token resolution with fixed precedence.
//!
//! A token is resolved against a list of [`Entry`] values that the caller has
//! already narrowed to the relevant scope. Rules are tried in order and the
//! first rule that yields exactly one record wins:
//!
//! ```text
//! 1. id        token (or "id:<token>") equals a record id
//! 2. exact     case-insensitive equality with an exact key, tier by tier
//! 3. partial   case-insensitive substring of the haystack
//! ```
//!
//! A rule that yields several records ends resolution with
//! [`ResolveError::Ambiguous`]; later rules are never consulted, so an exact
//! match always shields a token from substring ambiguity.

use crate::errors::{Candidate, EntityKind, ResolveError};
use crate::path::PATH_DELIMITER;

/// Prefix that forces id-only resolution.
pub const ID_PREFIX: &str = "id:";

/// Which name-based rules may run after the id rule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MatchMode {
    /// Exact, then substring.
    #[default]
    Auto,
    /// Exact only.
    Exact,
    /// Substring only.
    Substring,
}

impl MatchMode {
    const fn allows_exact(self) -> bool {
        matches!(self, Self::Auto | Self::Exact)
    }

    const fn allows_substring(self) -> bool {
        matches!(self, Self::Auto | Self::Substring)
    }
}

/// A record together with the strings the resolver compares against.
#[derive(Debug)]
pub struct Entry<'a, T> {
    pub record: &'a T,
    pub id: &'a str,
    /// Label shown when listing ambiguous candidates.
    pub display: String,
    exact_keys: Vec<String>,
    haystack: String,
}

impl<'a, T> Entry<'a, T> {
    #[must_use]
    pub fn new(record: &'a T, id: &'a str, display: impl Into<String>) -> Self {
        Self {
            record,
            id,
            display: display.into(),
            exact_keys: Vec::new(),
            haystack: String::new(),
        }
    }

    /// Add the next exact-match tier.
    #[must_use]
    pub fn exact(mut self, key: &str) -> Self {
        self.exact_keys.push(fold(key));
        self
    }

    /// Text searched by the substring rule.
    #[must_use]
    pub fn haystack(mut self, text: &str) -> Self {
        self.haystack = fold(text);
        self
    }

    fn candidate(&self) -> Candidate {
        Candidate {
            id: self.id.to_string(),
            label: self.display.clone(),
        }
    }
}

/// Resolve `token` against `entries`.
///
/// `needle` is the token after any kind-specific normalization (for project
/// paths, delimiter normalization). Name rules accept a match on either
/// `needle` or the raw `token`; errors always report the original `token`.
///
/// # Errors
///
/// [`ResolveError::EmptyToken`] for a blank token, [`ResolveError::Ambiguous`]
/// when a rule yields several records, [`ResolveError::NotFound`] when no rule
/// yields any.
pub fn resolve<'a, T>(
    kind: EntityKind,
    token: &str,
    needle: &str,
    entries: &[Entry<'a, T>],
    mode: MatchMode,
) -> Result<&'a T, ResolveError> {
    let trimmed = token.trim();
    if trimmed.is_empty() {
        return Err(ResolveError::EmptyToken { kind });
    }

    let not_found = || ResolveError::NotFound {
        kind,
        token: token.to_string(),
    };

    if let Some(explicit) = trimmed.strip_prefix(ID_PREFIX) {
        return find_by_id(entries, explicit.trim()).ok_or_else(not_found);
    }
    if let Some(record) = find_by_id(entries, trimmed) {
        return Ok(record);
    }

    // Names may contain delimiter characters themselves, so the raw token
    // is compared alongside the normalized one.
    let mut needles = vec![fold(needle)];
    let raw = fold(token);
    if !needles.contains(&raw) {
        needles.push(raw);
    }

    if mode.allows_exact() {
        let tiers = entries
            .iter()
            .map(|entry| entry.exact_keys.len())
            .max()
            .unwrap_or(0);
        for tier in 0..tiers {
            let matches: Vec<&Entry<'a, T>> = entries
                .iter()
                .filter(|entry| {
                    entry
                        .exact_keys
                        .get(tier)
                        .is_some_and(|key| needles.contains(key))
                })
                .collect();
            if let Some(record) = decide(kind, token, &matches)? {
                return Ok(record);
            }
        }
    }

    if mode.allows_substring() {
        let matches: Vec<&Entry<'a, T>> = entries
            .iter()
            .filter(|entry| {
                needles
                    .iter()
                    .any(|needle| entry.haystack.contains(needle.as_str()))
            })
            .collect();
        if let Some(record) = decide(kind, token, &matches)? {
            return Ok(record);
        }
    }

    Err(not_found())
}

fn find_by_id<'a, T>(entries: &[Entry<'a, T>], id: &str) -> Option<&'a T> {
    entries
        .iter()
        .find(|entry| entry.id == id)
        .map(|entry| entry.record)
}

/// `Ok(None)` to fall through to the next rule.
fn decide<'a, T>(
    kind: EntityKind,
    token: &str,
    matches: &[&Entry<'a, T>],
) -> Result<Option<&'a T>, ResolveError> {
    match matches {
        [] => Ok(None),
        [single] => Ok(Some(single.record)),
        many => {
            let mut candidates: Vec<Candidate> = many.iter().map(|entry| entry.candidate()).collect();
            candidates.sort_by(|a, b| a.label.cmp(&b.label).then_with(|| a.id.cmp(&b.id)));
            Err(ResolveError::Ambiguous {
                kind,
                token: token.to_string(),
                candidates,
            })
        }
    }
}

fn fold(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Rewrite a user-typed path so `Work>Sprint` and `Work » Sprint` compare equal
/// to the rendered breadcrumb. Tokens without a delimiter pass through.
#[must_use]
pub fn normalize_path_token(token: &str) -> String {
    let trimmed = token.trim();
    if !trimmed.contains(['>', '»']) {
        return trimmed.to_string();
    }
    trimmed
        .split(['>', '»'])
        .map(str::trim)
        .collect::<Vec<_>>()
        .join(PATH_DELIMITER)
}
