//! Terminal output for the CLI
//!
//! Command results (status lines, rendered documents, `--json` events) go to
//! stdout; warnings and errors go to stderr.

pub mod components;
pub mod context;
pub mod error;
pub mod json;
pub mod output;
pub mod primitives;
pub mod terminal;
pub mod theme;
