//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `remote/` - Remote host implementations (Ssh, Memory)
//! - `templates/` - Handlebars renderer and built-in templates

pub mod remote;
pub mod templates;

// Re-export for convenience
pub use remote::{MemoryHost, SshHost};
pub use templates::{HandlebarsRenderer, TemplateInfo, TemplateSource};
