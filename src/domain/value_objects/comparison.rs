//! Comparison Value Object
//!
//! Outcome of comparing a remote file with a freshly uploaded candidate.

use super::remote_command::STATUS_MARKER;

/// Result of the remote `diff` invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Comparison {
    /// Files are byte-identical (`diff` exit 0)
    Identical,
    /// Files differ (`diff` exit 1); carries the unified diff
    Different(String),
    /// The comparison could not be made (missing tool, unreadable file, ...)
    Unavailable(String),
}

impl Comparison {
    /// Interpret the stdout of `RemoteCommand::Compare`
    pub fn from_output(stdout: &str) -> Self {
        let Some((body, status)) = stdout.rsplit_once(STATUS_MARKER) else {
            return Self::Unavailable("comparison reported no exit status".to_string());
        };
        match status.trim().parse::<i32>() {
            Ok(0) => Self::Identical,
            Ok(1) => Self::Different(body.trim_end_matches('\n').to_string()),
            Ok(127) => Self::Unavailable("diff is not installed on the remote host".to_string()),
            Ok(code) => Self::Unavailable(format!("diff exited with status {}", code)),
            Err(_) => Self::Unavailable(format!("unparseable diff status '{}'", status.trim())),
        }
    }

    /// Whether the destination must be replaced
    ///
    /// An unavailable comparison counts as a difference so drift is never
    /// hidden behind a broken `diff`.
    pub fn requires_replace(&self) -> bool {
        !matches!(self, Self::Identical)
    }
}
