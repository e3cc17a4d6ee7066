//! Domain Value Objects
//!
//! Immutable value types that represent domain concepts.

mod comparison;
mod context;
mod hash;
mod remote_command;
mod scratch;
mod sync_outcome;

pub use comparison::Comparison;
pub use context::Context;
pub use hash::ContentHash;
pub use remote_command::{shell_quote, RemoteCommand, STATUS_MARKER};
pub use scratch::{ScratchDir, ScratchPath, SCRATCH_FILE_PREFIX};
pub use sync_outcome::SyncOutcome;
