//! Preview Use Case
//!
//! Shows what a sync would change without writing anything remotely.

use crate::domain::ports::{RemoteHost, TemplateRenderer};
use crate::domain::services::{DiffResult, Differ};
use crate::domain::value_objects::{Context, RemoteCommand};
use crate::error::{BundleError, BundleResult};

/// What `sync` would do to one destination
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preview {
    pub template: String,
    pub destination: String,
    /// Whether the destination currently exists
    pub exists: bool,
    /// The freshly rendered document
    pub rendered: String,
    /// Remote content against the rendered document
    pub diff: DiffResult,
}

impl Preview {
    /// Whether a sync would report a change
    pub fn would_change(&self) -> bool {
        !self.exists || self.diff.has_changes()
    }
}

/// Render `template` and diff it against the current remote `destination`
///
/// Only read operations reach the host: an existence check and, when the
/// destination exists, a `cat`.
pub fn preview<H, R>(
    host: &H,
    renderer: &R,
    context: &Context,
    template: &str,
    destination: &str,
    elevated: bool,
) -> BundleResult<Preview>
where
    H: RemoteHost + ?Sized,
    R: TemplateRenderer + ?Sized,
{
    if !destination.starts_with('/') {
        return Err(BundleError::RelativeDestination {
            path: destination.to_string(),
        });
    }
    let rendered = renderer.render(template, context)?;

    let exists = host.exists(destination, elevated)?;
    let current = if exists {
        let read = RemoteCommand::Read {
            path: destination.to_string(),
        };
        host.execute(&read.to_shell(), elevated)?
    } else {
        String::new()
    };

    let new_label = format!("{} (rendered)", template);
    let diff = Differ::new().diff(&current, &rendered, destination, &new_label);

    Ok(Preview {
        template: template.to_string(),
        destination: destination.to_string(),
        exists,
        rendered,
        diff,
    })
}
