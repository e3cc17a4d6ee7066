//! Error types for bundle-sync
//!
//! Library errors use `thiserror`; the binary wraps them in `anyhow` at the edge.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::ports::{HostError, RenderError};

/// Result type alias for bundle-sync operations
pub type BundleResult<T> = Result<T, BundleError>;

/// Exit code used when an internal invariant is violated (EX_SOFTWARE).
pub const EXIT_INVARIANT_VIOLATION: i32 = 70;

/// Main error type for bundle-sync operations
#[derive(Error, Debug)]
pub enum BundleError {
    /// Template could not be resolved or rendered
    #[error(transparent)]
    Render(#[from] RenderError),

    /// Remote host operation failed (transport or command)
    #[error(transparent)]
    Host(#[from] HostError),

    /// Destination is not an absolute remote path
    #[error("destination '{path}' must be an absolute path")]
    RelativeDestination { path: String },

    /// A scratch file about to be deleted is not under the scratch prefix.
    ///
    /// This is a defect in scratch path construction, never an operational error.
    #[error("refusing to delete '{path}': not under scratch prefix '{prefix}'")]
    ScratchPathEscape { path: String, prefix: String },

    /// Scratch directory is unusable (relative, or the filesystem root)
    #[error("invalid scratch directory '{path}': {reason}")]
    InvalidScratchDir { path: String, reason: String },

    /// Config file could not be parsed
    #[error("invalid config in {file}: {message}")]
    InvalidConfig { file: PathBuf, message: String },

    /// A `--set key=value` override could not be applied
    #[error("invalid context override '{assignment}': {reason}")]
    InvalidOverride { assignment: String, reason: String },

    /// No SSH destination was given on the command line, env or config file
    #[error("no remote host configured (use --host, BUNDLE_SYNC_HOST or [host] destination)")]
    NoHost,

    /// An `on_change` hook failed after its file was updated
    ///
    /// `pending` holds the failed hook and every hook after it, none of which
    /// completed. A retry sees the file as unchanged and skips them unless
    /// hooks are forced.
    #[error("on_change hook '{command}' for {destination} failed: {source}")]
    HookFailed {
        command: String,
        destination: String,
        #[source]
        source: HostError,
        pending: Vec<String>,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl BundleError {
    /// True when the error signals a programming defect rather than bad input
    /// or a flaky transport.
    pub fn is_invariant_violation(&self) -> bool {
        matches!(self, BundleError::ScratchPathEscape { .. })
    }

    /// Process exit code for this error
    pub fn exit_code(&self) -> i32 {
        if self.is_invariant_violation() {
            EXIT_INVARIANT_VIOLATION
        } else {
            1
        }
    }
}
