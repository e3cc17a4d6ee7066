//! Configuration module for bundle-sync
//!
//! Implements the configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (BUNDLE_SYNC_*)
//! 3. Project config (./bundle-sync.toml, or `--config`)
//! 4. User config (<config dir>/bundle-sync/config.toml)
//! 5. Built-in defaults (lowest priority)

mod defaults;
mod loader;
mod types;

pub use defaults::with_deploy_defaults;
pub use loader::{
    expand_home, user_config_path, with_overrides_from, ConfigWarning, PROJECT_CONFIG_FILE,
};
pub use types::{Config, FileEntry, HostConfig, SyncConfig};
