//! Template Synchronizer
//!
//! Renders a template against a context and makes the remote destination
//! match it with as little remote I/O as possible:
//!
//! 1. Render (fails before any remote I/O)
//! 2. Destination absent: upload directly, report `Created`
//! 3. Destination present: upload to a scratch path, compare remotely, then
//!    either rename the scratch file over the destination (`Updated`) or
//!    delete it (`Unchanged`)
//!
//! Repeating a call with the same inputs converges on the same end state, so
//! callers retry by simply calling again.

use crate::domain::ports::{RemoteHost, TemplateRenderer};
use crate::domain::value_objects::{
    Comparison, ContentHash, Context, RemoteCommand, ScratchDir, ScratchPath, SyncOutcome,
};
use crate::error::{BundleError, BundleResult};

/// Synchronizes rendered templates onto a single remote host
///
/// Parameterized by its ports so tests can run it against `MemoryHost`.
pub struct TemplateSynchronizer<H, R>
where
    H: RemoteHost,
    R: TemplateRenderer,
{
    host: H,
    renderer: R,
    scratch: ScratchDir,
}

impl<H, R> TemplateSynchronizer<H, R>
where
    H: RemoteHost,
    R: TemplateRenderer,
{
    /// Synchronizer using the default `/tmp` scratch directory
    pub fn new(host: H, renderer: R) -> Self {
        Self {
            host,
            renderer,
            scratch: ScratchDir::default(),
        }
    }

    /// Use a different scratch directory
    ///
    /// Renames are only atomic when the scratch directory and the destination
    /// share a filesystem.
    pub fn with_scratch_dir(mut self, scratch: ScratchDir) -> Self {
        self.scratch = scratch;
        self
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn scratch_dir(&self) -> &ScratchDir {
        &self.scratch
    }

    /// Render `template` with `context` and sync it to `destination`
    ///
    /// `outcome.changed()` tells callers whether dependent services need a
    /// reload.
    pub fn sync(
        &self,
        context: &Context,
        template: &str,
        destination: &str,
        elevated: bool,
    ) -> BundleResult<SyncOutcome> {
        ensure_absolute(destination)?;
        let document = self.renderer.render(template, context)?;

        let outcome = self.sync_document(document.as_bytes(), destination, elevated)?;
        let digest = ContentHash::from_content(document.as_bytes());
        tracing::info!(
            host = %self.host.display_name(),
            template,
            destination,
            digest = digest.short(),
            outcome = %outcome,
            "synced template"
        );
        Ok(outcome)
    }

    /// Sync an already rendered document to `destination`
    pub fn sync_document(
        &self,
        document: &[u8],
        destination: &str,
        elevated: bool,
    ) -> BundleResult<SyncOutcome> {
        ensure_absolute(destination)?;

        if !self.host.exists(destination, elevated)? {
            self.host.put(document, destination, elevated)?;
            return Ok(SyncOutcome::Created);
        }

        let scratch = self.scratch.fresh_path();
        self.host.put(document, scratch.as_str(), elevated)?;

        let compare = RemoteCommand::Compare {
            existing: destination.to_string(),
            candidate: scratch.to_string(),
        };
        let comparison = Comparison::from_output(&self.host.execute(&compare.to_shell(), elevated)?);

        match &comparison {
            Comparison::Identical => {}
            Comparison::Different(diff) => {
                tracing::debug!(destination, %diff, "destination differs");
            }
            Comparison::Unavailable(reason) => {
                tracing::warn!(
                    destination,
                    %reason,
                    "remote comparison unavailable; replacing destination"
                );
            }
        }

        if comparison.requires_replace() {
            self.replace(&scratch, destination, elevated)?;
            Ok(SyncOutcome::Updated)
        } else {
            self.discard(&scratch, elevated)?;
            Ok(SyncOutcome::Unchanged)
        }
    }

    fn replace(&self, scratch: &ScratchPath, destination: &str, elevated: bool) -> BundleResult<()> {
        let mv = RemoteCommand::Move {
            from: scratch.to_string(),
            to: destination.to_string(),
        };
        self.host.execute(&mv.to_shell(), elevated)?;
        Ok(())
    }

    fn discard(&self, scratch: &ScratchPath, elevated: bool) -> BundleResult<()> {
        self.scratch.ensure_contains(scratch.as_str())?;
        let rm = RemoteCommand::Remove {
            path: scratch.to_string(),
        };
        self.host.execute(&rm.to_shell(), elevated)?;
        Ok(())
    }
}

fn ensure_absolute(destination: &str) -> BundleResult<()> {
    if destination.starts_with('/') {
        Ok(())
    } else {
        Err(BundleError::RelativeDestination {
            path: destination.to_string(),
        })
    }
}
