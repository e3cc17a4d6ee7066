use crossterm::style::Stylize;

use bundle_sync::domain::services::DiffResult;

use crate::ui::theme;

/// Color a unified diff line by line
///
/// File headers are cyan, hunk headers dim, removals red, additions green.
pub fn render_unified_diff(diff: &DiffResult, supports_color: bool) -> String {
    let mut out = String::with_capacity(diff.unified.len());
    for line in diff.unified.lines() {
        out.push_str(&color_line(line, supports_color));
        out.push('\n');
    }
    out
}

fn color_line(line: &str, supports_color: bool) -> String {
    if !supports_color {
        return line.to_string();
    }

    if line.starts_with("---") || line.starts_with("+++") {
        format!("{}", line.with(theme::colors::INFO))
    } else if line.starts_with("@@") {
        format!("{}", line.with(theme::colors::DIM))
    } else if line.starts_with('-') {
        format!("{}", line.with(theme::colors::ERROR))
    } else if line.starts_with('+') {
        format!("{}", line.with(theme::colors::SUCCESS))
    } else {
        line.to_string()
    }
}
