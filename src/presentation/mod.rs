//! Presentation Layer
//!
//! This layer handles CLI argument parsing (via clap). Wiring the parsed
//! arguments to use cases and terminal output lives in the binary.

pub mod cli;

pub use cli::{Cli, ColorWhen, Commands};
