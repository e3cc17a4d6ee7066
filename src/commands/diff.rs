use anyhow::Result;

use bundle_sync::application::preview;
use bundle_sync::domain::ports::RemoteHost;

use crate::ui::components::diff::render_unified_diff;
use crate::ui::context::UiContext;
use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;

use super::Session;

pub fn cmd_diff(
    session: &Session,
    ui: &UiContext,
    template: &str,
    destination: &str,
    sudo: bool,
) -> Result<()> {
    let host = session.config.ssh_host()?;
    let preview = preview(
        &host,
        &session.renderer,
        &session.context,
        template,
        destination,
        sudo,
    )?;

    let target = format!("{}:{}", host.display_name(), destination);
    if !preview.would_change() {
        println!(
            "{} {}",
            Icon::Unchanged.colored(ui.color, ui.unicode),
            ColoredText::dim(format!("{} is up to date", target)).render(ui.color)
        );
        return Ok(());
    }

    let summary = if preview.exists {
        format!("{} ({})", target, preview.diff.summary())
    } else {
        format!("{} (new file, {} lines)", target, preview.diff.additions)
    };
    println!(
        "{} {}",
        Icon::Diff.colored(ui.color, ui.unicode),
        ColoredText::info(summary).bold().render(ui.color)
    );
    print!("{}", render_unified_diff(&preview.diff, ui.color));
    Ok(())
}
