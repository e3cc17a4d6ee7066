use anyhow::{bail, Result};
use serde::Serialize;

use bundle_sync::application::{ApplyUseCase, FileReport};

use crate::ui::context::UiContext;
use crate::ui::json;
use crate::ui::output::{format_hook_line, format_outcome_line};
use crate::ui::primitives::text::ColoredText;

use super::Session;

#[derive(Debug, Serialize)]
struct FileEvent<'a> {
    event: &'static str,
    #[serde(flatten)]
    report: &'a FileReport,
}

#[derive(Debug, Serialize)]
struct SummaryEvent {
    event: &'static str,
    files: usize,
    changed: usize,
}

pub fn cmd_apply(session: &Session, ui: &UiContext, run_hooks: bool) -> Result<()> {
    let files = session.config.managed_files();
    if files.is_empty() {
        bail!("no [[files]] entries in the config; nothing to apply");
    }

    let synchronizer = session.synchronizer()?;
    let mut write_error = None;
    let apply = ApplyUseCase::new(&synchronizer).with_forced_hooks(run_hooks);
    let reports = apply.execute(&session.context, &files, |report| {
        if ui.json {
            let event = FileEvent {
                event: "file",
                report,
            };
            if let Err(err) = json::emit(&event) {
                write_error.get_or_insert(err);
            }
            return;
        }
        println!("{}", format_outcome_line(ui, report.outcome, &report.destination));
        for hook in &report.hooks {
            println!("{}", format_hook_line(ui, hook));
        }
    })?;
    if let Some(err) = write_error {
        return Err(err.into());
    }

    let changed = reports.iter().filter(|r| r.changed).count();
    if ui.json {
        json::emit(&SummaryEvent {
            event: "summary",
            files: reports.len(),
            changed,
        })?;
    } else {
        println!(
            "{}",
            ColoredText::dim(format!("{} files, {} changed", reports.len(), changed)).render(ui.color)
        );
    }
    Ok(())
}
