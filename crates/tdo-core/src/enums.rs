//! Value enums shared by entities, commands, and CLI arguments.
//!
//! All enums serialize the way the task service spells them on the wire.

use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize, de};
use std::fmt;
use std::str::FromStr;

// ---------------------------------------------------------------------------
// ViewStyle
// ---------------------------------------------------------------------------

/// How the service renders a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ViewStyle {
    List,
    Board,
    Calendar,
}

impl ViewStyle {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Board => "board",
            Self::Calendar => "calendar",
        }
    }
}

impl fmt::Display for ViewStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Priority
// ---------------------------------------------------------------------------

/// Task priority in API numbering: 1 is normal, 4 is urgent.
///
/// The service's UI labels run the other way (`p1` is urgent), so parsing
/// accepts both spellings:
///
/// ```text
/// "4" | "p1"  →  Priority(4)
/// "1" | "p4"  →  Priority(1)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, JsonSchema)]
#[serde(transparent)]
pub struct Priority(u8);

impl Priority {
    pub const NORMAL: Self = Self(1);
    pub const URGENT: Self = Self(4);

    /// Build a priority from its API value, `None` outside `1..=4`.
    #[must_use]
    pub const fn new(value: u8) -> Option<Self> {
        if value >= 1 && value <= 4 {
            Some(Self(value))
        } else {
            None
        }
    }

    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// UI label, `p1` for urgent through `p4` for normal.
    #[must_use]
    pub fn label(self) -> String {
        format!("p{}", 5 - self.0.clamp(1, 4))
    }
}

impl<'de> Deserialize<'de> for Priority {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = u8::deserialize(deserializer)?;
        Self::new(value)
            .ok_or_else(|| de::Error::custom(format!("invalid priority {value}: expected 1-4")))
    }
}

impl Default for Priority {
    fn default() -> Self {
        Self::NORMAL
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        let parsed = if let Some(ui) = trimmed.strip_prefix(['p', 'P']) {
            ui.parse::<u8>()
                .ok()
                .filter(|value| (1..=4).contains(value))
                .map(|value| 5 - value)
        } else {
            trimmed.parse::<u8>().ok()
        };

        parsed
            .and_then(Self::new)
            .ok_or_else(|| format!("invalid priority '{raw}': expected 1-4 or p1-p4"))
    }
}
