//! Domain Services
//!
//! Pure business logic services with no I/O dependencies.

mod differ;

pub use differ::{DiffResult, DiffTag, Differ};
