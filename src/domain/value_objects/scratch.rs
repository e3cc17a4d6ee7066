//! Scratch Path Value Objects
//!
//! Transient upload targets live under a single remote directory so that
//! cleanup can verify a path belongs there before deleting it.

use std::fmt;

use uuid::Uuid;

use crate::error::{BundleError, BundleResult};

/// File name prefix of every scratch artifact
pub const SCRATCH_FILE_PREFIX: &str = "bundle-sync-";

/// Remote directory reserved for transient synchronization artifacts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScratchDir(String);

impl ScratchDir {
    pub const DEFAULT: &'static str = "/tmp";

    /// Validate and wrap a scratch directory
    ///
    /// The directory must be absolute, must not be `/` and must not contain
    /// `.` or `..` segments.
    pub fn new(path: &str) -> BundleResult<Self> {
        let invalid = |reason: &str| BundleError::InvalidScratchDir {
            path: path.to_string(),
            reason: reason.to_string(),
        };

        if !path.starts_with('/') {
            return Err(invalid("must be an absolute path"));
        }
        let trimmed = path.trim_end_matches('/');
        if trimmed.is_empty() {
            return Err(invalid("the filesystem root cannot be used"));
        }
        if trimmed
            .split('/')
            .skip(1)
            .any(|segment| segment.is_empty() || segment == "." || segment == "..")
        {
            return Err(invalid("must be a normalized path"));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// A fresh scratch path with a random 32-character hex suffix
    ///
    /// Every call draws from the OS random source; no generator state is
    /// shared between calls.
    pub fn fresh_path(&self) -> ScratchPath {
        ScratchPath(format!(
            "{}/{}{}",
            self.0,
            SCRATCH_FILE_PREFIX,
            Uuid::new_v4().simple()
        ))
    }

    /// Whether `path` is a direct child of this directory
    pub fn contains(&self, path: &str) -> bool {
        let Some(name) = path
            .strip_prefix(self.0.as_str())
            .and_then(|rest| rest.strip_prefix('/'))
        else {
            return false;
        };
        !name.is_empty() && !name.contains('/') && name != "." && name != ".."
    }

    /// Fail with `ScratchPathEscape` unless `path` lives in this directory
    pub fn ensure_contains(&self, path: &str) -> BundleResult<()> {
        if self.contains(path) {
            Ok(())
        } else {
            Err(BundleError::ScratchPathEscape {
                path: path.to_string(),
                prefix: self.0.clone(),
            })
        }
    }
}

impl Default for ScratchDir {
    fn default() -> Self {
        Self(Self::DEFAULT.to_string())
    }
}

impl fmt::Display for ScratchDir {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A path generated by `ScratchDir::fresh_path`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScratchPath(String);

impl ScratchPath {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ScratchPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
