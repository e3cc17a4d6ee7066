use anyhow::Result;

use crate::ui::context::UiContext;
use crate::ui::primitives::text::ColoredText;

use super::Session;

pub fn cmd_templates(session: &Session, ui: &UiContext) -> Result<()> {
    let width = session
        .renderer
        .templates()
        .map(|info| info.name.len())
        .max()
        .unwrap_or(0);

    for info in session.renderer.templates() {
        println!(
            "{:<width$}  {}  {}",
            info.name,
            ColoredText::dim(info.hash.short()).render(ui.color),
            info.source,
            width = width
        );
    }
    Ok(())
}
