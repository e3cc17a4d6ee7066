//! Remote Host Adapters
//!
//! - `SshHost` drives the system `ssh` binary
//! - `MemoryHost` keeps files in memory and interprets the synchronizer's commands

mod memory;
mod ssh;

pub use memory::{Fault, MemoryHost, Operation};
pub use ssh::SshHost;
