//! Apply Use Case
//!
//! Syncs every managed file in declaration order and runs each file's
//! `on_change` hooks when that file changed, or for every file when hooks
//! are forced. Stops at the first failure; files already synced stay as they
//! are.
//!
//! A hook that fails after its file was replaced leaves the remote converged
//! but the service not reloaded. The next plain apply sees the file as
//! unchanged, so recovery is a forced-hooks run.

use serde::Serialize;

use crate::domain::ports::{RemoteHost, RenderError, TemplateRenderer};
use crate::domain::value_objects::{Context, SyncOutcome};
use crate::error::{BundleError, BundleResult};

use super::synchronizer::TemplateSynchronizer;

/// A file kept in sync by `apply`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManagedFile {
    pub template: String,
    pub destination: String,
    pub elevated: bool,
    /// Commands run after the file changed. A leading `sudo ` runs the rest
    /// of the command through the host's privileged executor.
    pub on_change: Vec<String>,
}

/// Result for one managed file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileReport {
    pub template: String,
    pub destination: String,
    pub outcome: SyncOutcome,
    pub changed: bool,
    /// Hooks that ran, in order
    pub hooks: Vec<String>,
}

pub struct ApplyUseCase<'a, H, R>
where
    H: RemoteHost,
    R: TemplateRenderer,
{
    synchronizer: &'a TemplateSynchronizer<H, R>,
    force_hooks: bool,
}

impl<'a, H, R> ApplyUseCase<'a, H, R>
where
    H: RemoteHost,
    R: TemplateRenderer,
{
    pub fn new(synchronizer: &'a TemplateSynchronizer<H, R>) -> Self {
        Self {
            synchronizer,
            force_hooks: false,
        }
    }

    /// Run every file's hooks, changed or not
    pub fn with_forced_hooks(mut self, force: bool) -> Self {
        self.force_hooks = force;
        self
    }

    /// Sync `files` in order, calling `on_report` as each one finishes
    ///
    /// Every template is resolved before the first remote operation.
    pub fn execute(
        &self,
        context: &Context,
        files: &[ManagedFile],
        mut on_report: impl FnMut(&FileReport),
    ) -> BundleResult<Vec<FileReport>> {
        let renderer = self.synchronizer.renderer();
        if let Some(missing) = files.iter().find(|f| !renderer.has_template(&f.template)) {
            return Err(RenderError::TemplateNotFound {
                name: missing.template.clone(),
            }
            .into());
        }

        let mut reports = Vec::with_capacity(files.len());

        for file in files {
            let outcome = self.synchronizer.sync(
                context,
                &file.template,
                &file.destination,
                file.elevated,
            )?;

            let mut hooks = Vec::new();
            if outcome.changed() || self.force_hooks {
                for (i, hook) in file.on_change.iter().enumerate() {
                    self.run_hook(hook, &file.destination, &file.on_change[i..])?;
                    hooks.push(hook.clone());
                }
            }

            let report = FileReport {
                template: file.template.clone(),
                destination: file.destination.clone(),
                outcome,
                changed: outcome.changed(),
                hooks,
            };
            on_report(&report);
            reports.push(report);
        }

        Ok(reports)
    }

    /// `pending` is this hook and the ones after it
    fn run_hook(&self, hook: &str, destination: &str, pending: &[String]) -> BundleResult<()> {
        let host = self.synchronizer.host();
        tracing::info!(%destination, %hook, "running on_change hook");
        let result = match hook.strip_prefix("sudo ") {
            Some(privileged) => host.sudo(privileged.trim_start()),
            None => host.run(hook),
        };
        result.map(|_| ()).map_err(|source| BundleError::HookFailed {
            command: hook.to_string(),
            destination: destination.to_string(),
            source,
            pending: pending.to_vec(),
        })
    }
}
