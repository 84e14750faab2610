use serde::de::DeserializeOwned;
use tdo_core::resolve::ID_PREFIX;

/// Parse a snake_case enum value using serde-deserialization.
pub fn parse_enum<T>(raw: &str, field: &str) -> anyhow::Result<T>
where
    T: DeserializeOwned,
{
    let normalized = raw.trim().to_lowercase().replace('-', "_");
    let json = format!("\"{normalized}\"");
    serde_json::from_str(&json).map_err(|error| anyhow::anyhow!("invalid {field} '{raw}': {error}"))
}

/// Trim label names and drop empty ones, keeping first occurrences.
#[must_use]
pub fn clean_labels(labels: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(labels.len());
    for label in labels {
        let label = label.trim().trim_start_matches('@');
        if !label.is_empty() && !out.iter().any(|seen| seen == label) {
            out.push(label.to_string());
        }
    }
    out
}

/// Raw id from a token that may carry the `id:` prefix.
pub fn bare_id(token: &str) -> anyhow::Result<String> {
    let token = token.trim();
    let id = token.strip_prefix(ID_PREFIX).unwrap_or(token).trim();
    if id.is_empty() {
        anyhow::bail!("empty id");
    }
    Ok(id.to_string())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tdo_core::enums::ViewStyle;

    use super::{bare_id, clean_labels, parse_enum};

    #[test]
    fn parses_snake_case_enum() {
        let style: ViewStyle = parse_enum("Board", "view-style").expect("view style should parse");
        assert_eq!(style, ViewStyle::Board);
    }

    #[test]
    fn errors_on_invalid_enum() {
        let err = parse_enum::<ViewStyle>("grid", "view-style").expect_err("should fail");
        assert!(err.to_string().contains("invalid view-style 'grid'"));
    }

    #[test]
    fn labels_are_trimmed_and_deduplicated() {
        let raw = vec![" work ".to_string(), "@home".into(), String::new(), "work".into()];
        assert_eq!(clean_labels(&raw), vec!["work", "home"]);
    }

    #[test]
    fn bare_id_strips_prefix() {
        assert_eq!(bare_id("id:42").expect("id"), "42");
        assert_eq!(bare_id(" 42 ").expect("id"), "42");
        assert!(bare_id("id: ").is_err());
    }
}
