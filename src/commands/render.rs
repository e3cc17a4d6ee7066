use std::io::Write;

use anyhow::Result;

use bundle_sync::domain::ports::TemplateRenderer;
use bundle_sync::BundleError;

use super::Session;

pub fn cmd_render(session: &Session, template: &str) -> Result<()> {
    let document = session
        .renderer
        .render(template, &session.context)
        .map_err(BundleError::from)?;
    let mut out = std::io::stdout().lock();
    out.write_all(document.as_bytes())?;
    out.flush()?;
    Ok(())
}
