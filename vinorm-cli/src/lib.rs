//! vinorm CLI library
//!
//! This library provides the command-line interface for the vinorm
//! Vietnamese text normalization engine.

pub mod cli;
pub mod error;

pub use error::{CliError, CliResult};
