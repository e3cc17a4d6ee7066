use bundle_sync::domain::ports::{HostError, RenderError};
use bundle_sync::BundleError;

use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;
use crate::ui::context::UiContext;

/// Process exit code for an error reaching the binary edge
pub fn exit_code(err: &anyhow::Error) -> i32 {
    err.downcast_ref::<BundleError>()
        .map(BundleError::exit_code)
        .unwrap_or(1)
}

pub fn format_error_with(err: &anyhow::Error, supports_color: bool, supports_unicode: bool) -> String {
    let mut out = format!(
        "{} {}\n",
        Icon::Error.colored(supports_color, supports_unicode),
        ColoredText::error(format!("error: {}", err))
            .bold()
            .render(supports_color)
    );

    for cause in err.chain().skip(1) {
        out.push_str(&format!("  caused by: {}\n", cause));
    }

    if let Some(BundleError::HookFailed { pending, .. }) = err.downcast_ref::<BundleError>() {
        for hook in pending {
            out.push_str(&format!("  not run: {}\n", hook));
        }
    }

    if let Some(fix) = hint_for(err) {
        out.push_str(&format!(
            "  {} {}\n",
            Icon::Arrow.render(supports_unicode),
            ColoredText::dim(fix).render(supports_color)
        ));
    }

    out
}

fn hint_for(err: &anyhow::Error) -> Option<&'static str> {
    if let Some(err) = err.downcast_ref::<BundleError>() {
        return fix_hint(err);
    }
    if let Some(err) = err.downcast_ref::<RenderError>() {
        return render_hint(err);
    }
    err.downcast_ref::<HostError>().and_then(host_hint)
}

fn fix_hint(err: &BundleError) -> Option<&'static str> {
    match err {
        BundleError::NoHost => Some("Pass --host user@example.com or set [host] destination."),
        BundleError::Render(err) => render_hint(err),
        BundleError::Host(err) => host_hint(err),
        BundleError::HookFailed { .. } => Some(
            "The file is already updated; rerun 'bundle-sync apply --run-hooks' to run its hooks.",
        ),
        BundleError::RelativeDestination { .. } => Some("Remote destinations must start with '/'."),
        BundleError::ScratchPathEscape { .. } => {
            Some("This is a bug in bundle-sync; nothing was deleted.")
        }
        _ => None,
    }
}

fn render_hint(err: &RenderError) -> Option<&'static str> {
    match err {
        RenderError::TemplateNotFound { .. } => {
            Some("Run 'bundle-sync templates' to list available templates.")
        }
        RenderError::Render { .. } => {
            Some("Add the missing key to [context] or pass --set key=value.")
        }
        _ => None,
    }
}

fn host_hint(err: &HostError) -> Option<&'static str> {
    match err {
        HostError::Connection { .. } => {
            Some("Check that 'ssh <host> true' works without a password prompt.")
        }
        _ => None,
    }
}

pub fn print_error(err: &anyhow::Error, ui: &UiContext) {
    if ui.json {
        let output = serde_json::json!({
            "event": "error",
            "message": err.to_string(),
            "exit_code": exit_code(err),
        });
        let _ = crate::ui::json::emit(&output);
        return;
    }

    eprint!("{}", format_error_with(err, ui.err_color, ui.unicode));
}
