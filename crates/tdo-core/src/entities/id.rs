//! Identifiers arrive as strings from current endpoints and as integers from
//! older ones. Both decode to the same `String`.

use serde::{Deserialize, Deserializer};

/// An id as it appears on the wire.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawId {
    Text(String),
    Number(u64),
}

impl From<RawId> for String {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Text(text) => text,
            RawId::Number(number) => number.to_string(),
        }
    }
}

/// `deserialize_with` helper for `String` id fields.
///
/// # Errors
///
/// Fails when the value is neither a string nor an unsigned integer.
pub fn required<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    RawId::deserialize(deserializer).map(String::from)
}

/// `deserialize_with` helper for `Option<String>` id fields.
///
/// # Errors
///
/// Fails when the value is neither null, a string, nor an unsigned integer.
pub fn optional<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<RawId>::deserialize(deserializer).map(|raw| raw.map(String::from))
}
