//! CLI module for dtaus
//!
//! Provides command-line interface for:
//! - info: Print format, headers and checksums
//! - check: Scan a file, strict or lenient
//! - create: Start a file with one logical file
//! - add: Append a transaction

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command, FormatArg};
pub use commands::{add, check, create, info, run, run_command};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{read_document, write_response};
