//! Common test utilities for bundle-sync integration tests.
//!
//! This module provides:
//! - `TestEnv`: isolated project/home directories plus a CLI runner
//! - `FakeRemote` (unix): a fake `ssh` that runs remote commands locally
//! - Fixtures: reusable template and context snippets

#![allow(dead_code)]

pub mod env;
pub mod fixtures;
#[cfg(unix)]
pub mod remote;

pub use env::*;
pub use fixtures::*;
#[cfg(unix)]
pub use remote::*;
