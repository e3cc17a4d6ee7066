//! CLI Argument Parsing
//!
//! This module defines the CLI interface using clap.
//!
//! ## Design Notes
//!
//! - Global flags (--config, --host, --set, --color, --verbose) are inherited by all subcommands
//! - `render` and `templates` never contact the remote host

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorWhen {
    #[default]
    Auto,
    Always,
    Never,
}

/// bundle-sync - render deploy templates and keep remote copies in sync
#[derive(Parser, Debug)]
#[command(name = "bundle-sync")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file (default: ./bundle-sync.toml, then the user config)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// SSH destination, e.g. deploy@example.com
    #[arg(long, global = true, value_name = "HOST")]
    pub host: Option<String>,

    /// Directory of templates overriding the built-in ones
    #[arg(long, global = true, value_name = "DIR")]
    pub templates: Option<PathBuf>,

    /// Set a context value (repeatable), e.g. --set http_host=example.com
    #[arg(long = "set", global = true, value_name = "KEY=VALUE")]
    pub set: Vec<String>,

    /// Color output mode
    #[arg(long, global = true, value_enum, default_value_t = ColorWhen::Auto)]
    pub color: ColorWhen,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print a rendered template to stdout
    Render {
        /// Template name, e.g. nginx.conf
        template: String,
    },

    /// Render a template and sync it to a remote path
    Sync {
        /// Template name, e.g. nginx.conf
        template: String,

        /// Absolute path on the remote host
        destination: String,

        /// Run every remote operation through sudo
        #[arg(long)]
        sudo: bool,

        /// Print the outcome as JSON
        #[arg(long)]
        json: bool,
    },

    /// Preview what sync would change, without writing
    Diff {
        /// Template name, e.g. nginx.conf
        template: String,

        /// Absolute path on the remote host
        destination: String,

        /// Read the remote file through sudo
        #[arg(long)]
        sudo: bool,
    },

    /// Sync every [[files]] entry of the config and run on_change hooks
    Apply {
        /// Print one JSON event per file
        #[arg(long)]
        json: bool,

        /// Run every file's on_change hooks, even for unchanged files
        #[arg(long)]
        run_hooks: bool,
    },

    /// List available templates
    Templates,
}

impl Commands {
    /// Whether machine-readable output was requested
    pub fn json(&self) -> bool {
        matches!(
            self,
            Commands::Sync { json: true, .. } | Commands::Apply { json: true, .. }
        )
    }
}
