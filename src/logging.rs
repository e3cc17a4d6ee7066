//! Diagnostic logging
//!
//! `tracing` events go to stderr so stdout stays clean for rendered
//! documents and `--json` output.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Default filter directive for a `-v` count
pub fn default_directive(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Initialize the global subscriber
///
/// `RUST_LOG` takes precedence over the `-v` count when it is set.
pub fn init(verbose: u8, ansi: bool) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(verbose >= 2)
        .with_level(true)
        .with_ansi(ansi)
        .compact();

    let filter_layer = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_directive(verbose)))?;

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
