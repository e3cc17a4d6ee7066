//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod remote_host;
pub mod template_renderer;

pub use remote_host::{HostError, HostResult, RemoteHost};
pub use template_renderer::{RenderError, TemplateRenderer};
