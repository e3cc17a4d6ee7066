use bundle_sync::presentation::ColorWhen;

use crate::ui::terminal::{detect_capabilities, detect_stderr_capabilities, TerminalCapabilities};

/// Output settings for one CLI invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiContext {
    pub json: bool,
    pub verbose: u8,
    /// Color on stdout
    pub color: bool,
    /// Color on stderr
    pub err_color: bool,
    pub unicode: bool,
}

impl UiContext {
    pub fn new(json: bool, verbose: u8, cli_color: ColorWhen) -> Self {
        Self::from_streams(
            json,
            verbose,
            cli_color,
            detect_capabilities(),
            detect_stderr_capabilities(),
        )
    }

    /// Same capabilities for stdout and stderr
    #[cfg(test)]
    pub(crate) fn from_caps(
        json: bool,
        verbose: u8,
        cli_color: ColorWhen,
        caps: TerminalCapabilities,
    ) -> Self {
        Self::from_streams(json, verbose, cli_color, caps, caps)
    }

    pub(crate) fn from_streams(
        json: bool,
        verbose: u8,
        cli_color: ColorWhen,
        stdout: TerminalCapabilities,
        stderr: TerminalCapabilities,
    ) -> Self {
        Self {
            json,
            verbose,
            color: color_enabled(cli_color, stdout),
            err_color: color_enabled(cli_color, stderr),
            unicode: stdout.supports_unicode,
        }
    }
}

fn color_enabled(cli_color: ColorWhen, caps: TerminalCapabilities) -> bool {
    match cli_color {
        ColorWhen::Never => false,
        ColorWhen::Always => true,
        ColorWhen::Auto => caps.supports_color && !caps.is_ci,
    }
}
