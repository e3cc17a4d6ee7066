//! Command handlers
//!
//! Each handler loads a `Session`, calls one use case and renders the result.

pub mod apply;
pub mod diff;
pub mod render;
pub mod sync;
pub mod templates;

use anyhow::{Context as _, Result};

use bundle_sync::application::TemplateSynchronizer;
use bundle_sync::config::Config;
use bundle_sync::domain::value_objects::Context;
use bundle_sync::infrastructure::{HandlebarsRenderer, SshHost};
use bundle_sync::presentation::{Cli, Commands};

use crate::ui::context::UiContext;
use crate::ui::output::print_config_warnings;

/// Everything a command needs: merged config, context and templates
pub struct Session {
    pub config: Config,
    pub context: Context,
    pub renderer: HandlebarsRenderer,
}

impl Session {
    pub fn load(cli: &Cli, ui: &UiContext) -> Result<Self> {
        let (mut config, warnings) = match &cli.config {
            Some(path) => {
                let (config, warnings) = Config::load_with_warnings(path)
                    .with_context(|| format!("loading {}", path.display()))?;
                (config.with_env_overrides(), warnings)
            }
            None => {
                let cwd = std::env::current_dir()?;
                Config::load_or_default(Some(&cwd))?
            }
        };
        print_config_warnings(ui, &warnings);

        if let Some(host) = &cli.host {
            config.host.destination = Some(host.clone());
        }
        if let Some(dir) = &cli.templates {
            config.sync.templates = Some(dir.clone());
        }

        let mut renderer = HandlebarsRenderer::with_builtins()?;
        if let Some(dir) = &config.sync.templates {
            let loaded = renderer
                .load_directory(dir)
                .with_context(|| format!("loading templates from {}", dir.display()))?;
            tracing::info!(dir = %dir.display(), loaded, "loaded template overrides");
        }

        let context = config.context(&cli.set)?;

        Ok(Self {
            config,
            context,
            renderer,
        })
    }

    /// Synchronizer bound to the configured host and scratch directory
    pub fn synchronizer(&self) -> Result<TemplateSynchronizer<SshHost, &HandlebarsRenderer>> {
        let host = self.config.ssh_host()?;
        let scratch = self.config.scratch_dir()?;
        Ok(TemplateSynchronizer::new(host, &self.renderer).with_scratch_dir(scratch))
    }
}

pub fn run(cli: &Cli, ui: &UiContext) -> Result<()> {
    let session = Session::load(cli, ui)?;

    match &cli.command {
        Commands::Render { template } => render::cmd_render(&session, template),
        Commands::Sync {
            template,
            destination,
            sudo,
            ..
        } => sync::cmd_sync(&session, ui, template, destination, *sudo),
        Commands::Diff {
            template,
            destination,
            sudo,
        } => diff::cmd_diff(&session, ui, template, destination, *sudo),
        Commands::Apply { run_hooks, .. } => apply::cmd_apply(&session, ui, *run_hooks),
        Commands::Templates => templates::cmd_templates(&session, ui),
    }
}
