//! Configuration type definitions

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::application::ManagedFile;
use crate::domain::value_objects::{Context, ScratchDir};
use crate::error::{BundleError, BundleResult};
use crate::infrastructure::remote::SshHost;

use super::defaults::with_deploy_defaults;
use super::loader::{self, ConfigWarning};

/// `[host]`: how to reach the remote host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct HostConfig {
    /// SSH destination (`user@host` or an alias from `~/.ssh/config`)
    #[serde(default)]
    pub destination: Option<String>,

    #[serde(default)]
    pub port: Option<u16>,

    /// Private key passed to `ssh -i`; a leading `~/` expands to the home dir
    #[serde(default)]
    pub identity: Option<PathBuf>,

    /// Extra `-o` options
    #[serde(default)]
    pub options: Vec<String>,

    /// `ConnectTimeout` in seconds
    #[serde(default)]
    pub connect_timeout: Option<u32>,
}

impl HostConfig {
    /// Login user from a `user@host` destination
    pub fn user(&self) -> Option<&str> {
        self.destination
            .as_deref()
            .and_then(|d| d.split_once('@'))
            .map(|(user, _)| user)
            .filter(|user| !user.is_empty())
    }
}

/// `[sync]`: synchronizer settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncConfig {
    #[serde(default = "default_scratch_dir")]
    pub scratch_dir: String,

    /// Directory of templates overriding or extending the built-in ones
    #[serde(default)]
    pub templates: Option<PathBuf>,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            scratch_dir: default_scratch_dir(),
            templates: None,
        }
    }
}

fn default_scratch_dir() -> String {
    ScratchDir::DEFAULT.to_string()
}

/// One `[[files]]` entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    pub template: String,
    pub destination: String,

    #[serde(default)]
    pub elevated: bool,

    #[serde(default)]
    pub on_change: Vec<String>,
}

impl From<&FileEntry> for ManagedFile {
    fn from(entry: &FileEntry) -> Self {
        ManagedFile {
            template: entry.template.clone(),
            destination: entry.destination.clone(),
            elevated: entry.elevated,
            on_change: entry.on_change.clone(),
        }
    }
}

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub host: HostConfig,

    #[serde(default)]
    pub sync: SyncConfig,

    /// Template context, kept as raw TOML until a run builds a `Context`
    #[serde(default)]
    pub context: toml::Table,

    #[serde(default)]
    pub files: Vec<FileEntry>,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> BundleResult<Self> {
        let (config, _warnings) = loader::load_with_warnings(path)?;
        Ok(config)
    }

    /// Load configuration and collect non-fatal warnings (e.g. unknown keys).
    pub fn load_with_warnings(path: &Path) -> BundleResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }

    /// Load from project config, user config, or defaults
    pub fn load_or_default(project_root: Option<&Path>) -> BundleResult<(Self, Vec<ConfigWarning>)> {
        loader::load_or_default(project_root)
    }

    /// Apply environment variable overrides (BUNDLE_SYNC_* prefix)
    pub fn with_env_overrides(self) -> Self {
        loader::with_env_overrides(self)
    }

    pub fn scratch_dir(&self) -> BundleResult<ScratchDir> {
        ScratchDir::new(&self.sync.scratch_dir)
    }

    /// SSH adapter for the configured host
    pub fn ssh_host(&self) -> BundleResult<SshHost> {
        let destination = self
            .host
            .destination
            .as_deref()
            .filter(|d| !d.trim().is_empty())
            .ok_or(BundleError::NoHost)?;

        let mut host = SshHost::new(destination);
        if let Some(port) = self.host.port {
            host = host.with_port(port);
        }
        if let Some(identity) = &self.host.identity {
            host = host.with_identity(loader::expand_home(identity));
        }
        if let Some(timeout) = self.host.connect_timeout {
            host = host.with_connect_timeout(timeout);
        }
        for option in &self.host.options {
            host = host.with_option(option.as_str());
        }
        Ok(host)
    }

    /// Build the rendering context
    ///
    /// `overrides` are `key=value` assignments applied over `[context]`
    /// before the deploy defaults are derived, so `--set http_host=...` also
    /// moves `app`, `bundle_root` and the other derived keys.
    pub fn context(&self, overrides: &[String]) -> BundleResult<Context> {
        let mut context = Context::from_toml(&self.context);
        for assignment in overrides {
            context = context
                .with_assignment(assignment)
                .map_err(|reason| BundleError::InvalidOverride {
                    assignment: assignment.clone(),
                    reason,
                })?;
        }
        Ok(with_deploy_defaults(&context, self.host.user()))
    }

    /// `[[files]]` entries as managed files, in declaration order
    pub fn managed_files(&self) -> Vec<ManagedFile> {
        self.files.iter().map(ManagedFile::from).collect()
    }
}
