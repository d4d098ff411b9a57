//! Completion flags stored in more than one shape
//!
//! Older records store completion markers as booleans, newer ones as `"Yes"`
//! or `"No"`, and some as the strings `"true"`/`"false"`.

use serde::{Deserialize, Serialize};

/// A completion marker as it was stored
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CompletionFlag {
    /// Stored as a JSON boolean
    Bool(bool),
    /// Stored as text (`"Yes"`, `"No"`, `"true"`, ...)
    Text(String),
    /// Not recorded
    #[default]
    Absent,
}

impl CompletionFlag {
    /// Canonical `"Yes"`/`"No"` flag
    #[must_use]
    pub fn yes_no(set: bool) -> Self {
        Self::Text(if set { "Yes" } else { "No" }.to_string())
    }

    /// Canonical reading: `Some(true)` when set, `Some(false)` when explicitly
    /// unset, `None` when absent or unrecognised
    #[must_use]
    pub fn normalize(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            Self::Text(text) => match text.trim().to_lowercase().as_str() {
                "yes" | "true" => Some(true),
                "no" | "false" => Some(false),
                _ => None,
            },
            Self::Absent => None,
        }
    }

    /// Whether the flag reads as set
    #[must_use]
    pub fn is_set(&self) -> bool {
        self.normalize() == Some(true)
    }

    /// Whether nothing was recorded
    #[must_use]
    pub fn is_absent(&self) -> bool {
        match self {
            Self::Absent => true,
            Self::Text(text) => text.trim().is_empty(),
            Self::Bool(_) => false,
        }
    }
}

impl From<bool> for CompletionFlag {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}
