//! Configuration loading

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{BundleError, BundleResult};

use super::types::Config;

/// Project config file name, looked up in the working directory
pub const PROJECT_CONFIG_FILE: &str = "bundle-sync.toml";

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
///
/// A relative `[sync] templates` path is resolved against the directory
/// holding the config file.
pub fn load_with_warnings(path: &Path) -> BundleResult<(Config, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path)?;

    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(&content);

    let mut config: Config = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| BundleError::InvalidConfig {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    if let (Some(templates), Some(base)) = (config.sync.templates.as_ref(), path.parent()) {
        if templates.is_relative() {
            config.sync.templates = Some(base.join(templates));
        }
    }

    let warnings = unknown_paths
        .into_iter()
        // `[context]` is free-form; serde_ignored never reports into it.
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                key: key.clone(),
                file: path.to_path_buf(),
                line: find_line_number(&content, &key),
                suggestion: suggest_key(&key),
            }
        })
        .collect();

    Ok((config, warnings))
}

/// Load from project config, user config, or defaults
///
/// A config file that exists but does not parse is an error; a missing one
/// falls through to the next layer.
pub fn load_or_default(project_root: Option<&Path>) -> BundleResult<(Config, Vec<ConfigWarning>)> {
    if let Some(root) = project_root {
        let project_config = root.join(PROJECT_CONFIG_FILE);
        if project_config.exists() {
            let (config, warnings) = load_with_warnings(&project_config)?;
            return Ok((with_env_overrides(config), warnings));
        }
    }

    if let Some(user_config) = user_config_path() {
        if user_config.exists() {
            let (config, warnings) = load_with_warnings(&user_config)?;
            return Ok((with_env_overrides(config), warnings));
        }
    }

    Ok((with_env_overrides(Config::default()), Vec::new()))
}

/// Apply environment variable overrides (BUNDLE_SYNC_* prefix)
pub fn with_env_overrides(config: Config) -> Config {
    with_overrides_from(config, |name| std::env::var(name).ok())
}

/// Apply overrides from an arbitrary variable lookup
pub fn with_overrides_from(mut config: Config, lookup: impl Fn(&str) -> Option<String>) -> Config {
    // BUNDLE_SYNC_HOST
    if let Some(host) = lookup("BUNDLE_SYNC_HOST").filter(|v| !v.trim().is_empty()) {
        config.host.destination = Some(host);
    }

    // BUNDLE_SYNC_SSH_PORT
    if let Some(port) = lookup("BUNDLE_SYNC_SSH_PORT") {
        match port.trim().parse::<u16>() {
            Ok(port) => config.host.port = Some(port),
            Err(_) => tracing::warn!(value = %port, "ignoring invalid BUNDLE_SYNC_SSH_PORT"),
        }
    }

    // BUNDLE_SYNC_SCRATCH_DIR
    if let Some(dir) = lookup("BUNDLE_SYNC_SCRATCH_DIR").filter(|v| !v.is_empty()) {
        config.sync.scratch_dir = dir;
    }

    // BUNDLE_SYNC_TEMPLATES
    if let Some(dir) = lookup("BUNDLE_SYNC_TEMPLATES").filter(|v| !v.is_empty()) {
        config.sync.templates = Some(PathBuf::from(dir));
    }

    config
}

/// `<config dir>/bundle-sync/config.toml`
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("bundle-sync").join("config.toml"))
}

/// Expand a leading `~/` to the home directory
pub fn expand_home(path: &Path) -> PathBuf {
    match path.strip_prefix("~") {
        Ok(rest) => match dirs::home_dir() {
            Some(home) => home.join(rest),
            None => path.to_path_buf(),
        },
        Err(_) => path.to_path_buf(),
    }
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    for (i, line) in content.lines().enumerate() {
        if line.contains(needle) {
            return Some(i + 1);
        }
    }
    None
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "host",
        "destination",
        "port",
        "identity",
        "options",
        "connect_timeout",
        "sync",
        "scratch_dir",
        "templates",
        "context",
        "files",
        "template",
        "elevated",
        "on_change",
    ];

    let mut best: Option<(&str, usize)> = None;
    for candidate in CANDIDATES {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr = vec![0usize; b_bytes.len() + 1];

    for (i, &ac) in a_bytes.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_bytes.iter().enumerate() {
            let cost = if ac == bc { 0 } else { 1 };
            curr[j + 1] =
                std::cmp::min(std::cmp::min(prev[j + 1] + 1, curr[j] + 1), prev[j] + cost);
        }
        prev.clone_from_slice(&curr);
    }

    prev[b_bytes.len()]
}
