use std::fmt;

use serde::Serialize;

/// What a sync call did to its destination
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncOutcome {
    /// Destination did not exist and was written
    Created,
    /// Destination existed and was replaced with new content
    Updated,
    /// Destination already matched the rendered document
    Unchanged,
}

impl SyncOutcome {
    /// Whether dependent services need a restart or reload
    pub fn changed(self) -> bool {
        !matches!(self, Self::Unchanged)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Updated => "updated",
            Self::Unchanged => "unchanged",
        }
    }
}

impl fmt::Display for SyncOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
