//! Application Layer
//!
//! Use cases that orchestrate the business flow.
//! This layer:
//! - Depends on Domain layer (value objects, services, ports)
//! - Does NOT perform I/O itself (that goes through ports)
//! - Coordinates between Infrastructure and Domain
//!
//! ## Use Cases
//!
//! - `TemplateSynchronizer` - Render a template and make a remote file match it
//! - `preview` - Diff a rendered template against the remote file, read-only
//! - `ApplyUseCase` - Sync every managed file and run `on_change` hooks

pub mod apply;
pub mod preview;
pub mod synchronizer;

pub use apply::{ApplyUseCase, FileReport, ManagedFile};
pub use preview::{preview, Preview};
pub use synchronizer::TemplateSynchronizer;
