//! Flash message categories.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Category of a one-time status message shown after a redirect.
///
/// The serialized names double as CSS modifier classes in the templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashLevel {
    /// Something went wrong.
    Danger,
    /// An action completed.
    Success,
    /// Neutral notice.
    Info,
}

impl FlashLevel {
    /// Lowercase category name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Danger => "danger",
            Self::Success => "success",
            Self::Info => "info",
        }
    }
}

impl fmt::Display for FlashLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
