//! Domain Layer
//!
//! Pure types and rules for template synchronization, without I/O.
//!
//! ## Structure
//!
//! - `value_objects/` - Immutable value types (Context, ScratchDir, Comparison)
//! - `services/` - Domain services (Differ)
//! - `ports/` - Interface definitions for infrastructure (RemoteHost, TemplateRenderer)

pub mod ports;
pub mod services;
pub mod value_objects;
