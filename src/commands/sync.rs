use anyhow::Result;
use serde::Serialize;

use bundle_sync::domain::value_objects::SyncOutcome;

use crate::ui::context::UiContext;
use crate::ui::json;
use crate::ui::output::format_outcome_line;

use super::Session;

#[derive(Debug, Serialize)]
struct SyncEvent<'a> {
    event: &'static str,
    template: &'a str,
    destination: &'a str,
    outcome: SyncOutcome,
    changed: bool,
}

pub fn cmd_sync(
    session: &Session,
    ui: &UiContext,
    template: &str,
    destination: &str,
    sudo: bool,
) -> Result<()> {
    let synchronizer = session.synchronizer()?;
    let outcome = synchronizer.sync(&session.context, template, destination, sudo)?;

    if ui.json {
        json::emit(&SyncEvent {
            event: "sync",
            template,
            destination,
            outcome,
            changed: outcome.changed(),
        })?;
    } else {
        println!("{}", format_outcome_line(ui, outcome, destination));
    }
    Ok(())
}
