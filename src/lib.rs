//! bundle-sync - idempotent remote template synchronization
//!
//! Renders per-site configuration files (nginx vhosts, supervisor programs,
//! Django settings) from Handlebars templates and a deployment context, and
//! keeps the copies on a remote host in sync with them. Every sync reports
//! whether the destination changed so callers know when to reload services.
//!
//! ```no_run
//! use bundle_sync::{Context, HandlebarsRenderer, SshHost, TemplateSynchronizer};
//!
//! # fn main() -> bundle_sync::BundleResult<()> {
//! let host = SshHost::new("deploy@example.com");
//! let renderer = HandlebarsRenderer::with_builtins()?;
//! let sync = TemplateSynchronizer::new(host, renderer);
//!
//! let context = Context::new()
//!     .with("http_host", "example.com")
//!     .with("app", "examplecom")
//!     .with("bundle_root", "/home/deploy/bundles/example.com");
//! let outcome = sync.sync(&context, "nginx.conf", "/home/deploy/bundles/example.com/conf/nginx.conf", false)?;
//! if outcome.changed() {
//!     // reload nginx
//! }
//! # Ok(())
//! # }
//! ```

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod logging;
pub mod presentation;

// Re-exports for convenience
pub use application::{ApplyUseCase, FileReport, ManagedFile, Preview, TemplateSynchronizer};
pub use config::Config;
pub use domain::ports::{HostError, RemoteHost, RenderError, TemplateRenderer};
pub use domain::value_objects::{Context, SyncOutcome};
pub use error::{BundleError, BundleResult};
pub use infrastructure::{HandlebarsRenderer, MemoryHost, SshHost};
