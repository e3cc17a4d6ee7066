//! bundle-sync CLI
//!
//! Usage: bundle-sync [OPTIONS] <COMMAND>
//!
//! Commands:
//!   render     Print a rendered template to stdout
//!   sync       Render a template and sync it to a remote path
//!   diff       Preview what sync would change, without writing
//!   apply      Sync every [[files]] entry of the config
//!   templates  List available templates

mod commands;
mod ui;

use clap::Parser;

use bundle_sync::presentation::Cli;

use ui::context::UiContext;

fn main() {
    let cli = Cli::parse();
    let ui = UiContext::new(cli.command.json(), cli.verbose, cli.color);

    if let Err(err) = bundle_sync::logging::init(ui.verbose, ui.err_color) {
        eprintln!("warning: logging disabled: {}", err);
    }

    if let Err(err) = commands::run(&cli, &ui) {
        ui::error::print_error(&err, &ui);
        std::process::exit(ui::error::exit_code(&err));
    }
}
