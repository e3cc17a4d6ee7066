//! Derived deploy context
//!
//! Fills in the keys the built-in templates expect but a config rarely sets
//! by hand. Keys already present are never overwritten.

use serde_json::Value;

use crate::domain::value_objects::Context;

/// Keys the built-in templates test with `{{#if}}`; absent means off
const OPTIONAL_KEYS: &[&str] = &["ssl_cert", "sentry_dsn", "email", "settings"];

/// Optional members of an `email` table
const OPTIONAL_EMAIL_KEYS: &[&str] = &["user", "password", "port", "tls"];

/// Add derived keys to `context`
///
/// - `app`: `http_host` with the dots removed
/// - `user`: the SSH login user
/// - `bundle_root`: `<home>/bundles/<http_host>`
/// - `path`, `media_root`, `static_root`: under `bundle_root`
/// - `staticfiles = true`, `cache = 0` (redis DB), `workers = 2`,
///   `celery = false`, `admins = []`
pub fn with_deploy_defaults(context: &Context, remote_user: Option<&str>) -> Context {
    let mut ctx = context.clone();

    if let Some(host) = ctx.get_str("http_host").map(str::to_string) {
        ctx = ctx.with_default("app", host.replace('.', ""));
    }
    if let Some(user) = remote_user {
        ctx = ctx.with_default("user", user);
    }
    if let (Some(host), Some(user)) = (
        ctx.get_str("http_host").map(str::to_string),
        ctx.get_str("user").map(str::to_string),
    ) {
        ctx = ctx.with_default("bundle_root", format!("{}/bundles/{}", home_of(&user), host));
    }
    if let Some(root) = ctx.get_str("bundle_root").map(str::to_string) {
        ctx = ctx
            .with_default("path", root.as_str())
            .with_default("media_root", format!("{}/public/media", root))
            .with_default("static_root", format!("{}/public/static", root));
    }

    ctx = ctx
        .with_default("staticfiles", true)
        .with_default("cache", 0)
        .with_default("workers", 2)
        .with_default("celery", false)
        .with_default("admins", Value::Array(Vec::new()));

    for key in OPTIONAL_KEYS {
        ctx = ctx.with_default(key, Value::Null);
    }
    if ctx.get("email").is_some_and(Value::is_object) {
        for key in OPTIONAL_EMAIL_KEYS {
            ctx = ctx.with_default(&format!("email.{}", key), Value::Null);
        }
    }

    ctx
}

fn home_of(user: &str) -> String {
    if user == "root" {
        "/root".to_string()
    } else {
        format!("/home/{}", user)
    }
}
