use bundle_sync::config::ConfigWarning;
use bundle_sync::domain::value_objects::SyncOutcome;

use crate::ui::context::UiContext;
use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;

/// One status line per synced file, e.g. `✓ updated  /srv/site/conf/nginx.conf`
pub fn format_outcome_line(ui: &UiContext, outcome: SyncOutcome, destination: &str) -> String {
    let label = format!("{:<9}", outcome.as_str());
    let (icon, label) = if outcome.changed() {
        (Icon::Success, ColoredText::success(label))
    } else {
        (Icon::Unchanged, ColoredText::dim(label))
    };
    format!(
        "{} {} {}",
        icon.colored(ui.color, ui.unicode),
        label.render(ui.color),
        destination
    )
}

pub fn format_hook_line(ui: &UiContext, hook: &str) -> String {
    format!(
        "  {} {}",
        Icon::Arrow.colored(ui.color, ui.unicode),
        ColoredText::dim(hook).render(ui.color)
    )
}

pub fn print_config_warnings(ui: &UiContext, warnings: &[ConfigWarning]) {
    for w in warnings {
        tracing::warn!(key = %w.key, file = %w.file.display(), "unknown config key");
        if ui.json {
            continue;
        }

        let location = match w.line {
            Some(line) => format!("{}:{}", w.file.display(), line),
            None => w.file.display().to_string(),
        };
        eprintln!(
            "{} {}",
            Icon::Warning.colored(ui.err_color, ui.unicode),
            ColoredText::warning(format!("Unknown config key '{}' in {}", w.key, location))
                .render(ui.err_color)
        );

        if let Some(suggestion) = &w.suggestion {
            eprintln!("   Did you mean '{}'?", suggestion);
        }
    }
}
