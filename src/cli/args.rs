//! CLI argument definitions using clap
//!
//! Commands:
//! - dtaus info <file>
//! - dtaus check <file> [--lenient] [--config <path>]
//! - dtaus create <file> --format disk|tape --header <path>
//! - dtaus add <file> --transaction <path> [--logical-file N]

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::layout::Format;

/// dtaus - read, check and edit DTAUS payment files
#[derive(Parser, Debug)]
#[command(name = "dtaus")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Log INFO events to stderr
    #[arg(long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print format, headers and checksums
    Info {
        file: PathBuf,

        /// Path to configuration file
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Scan a file and report every problem found
    Check {
        file: PathBuf,

        /// Collect diagnostics instead of stopping at the first problem
        #[arg(long)]
        lenient: bool,

        /// Path to configuration file
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Create a file holding one empty logical file
    Create {
        file: PathBuf,

        #[arg(long, value_enum, default_value_t = FormatArg::Disk)]
        format: FormatArg,

        /// JSON file with the header
        #[arg(long)]
        header: PathBuf,

        /// Path to configuration file
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Append one transaction to a logical file
    Add {
        file: PathBuf,

        /// JSON file with the transaction
        #[arg(long)]
        transaction: PathBuf,

        #[arg(long, default_value_t = 0)]
        logical_file: usize,

        /// Path to configuration file
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatArg {
    Disk,
    Tape,
}

impl From<FormatArg> for Format {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Disk => Format::Disk,
            FormatArg::Tape => Format::Tape,
        }
    }
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
