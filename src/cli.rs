//! Command line interface definitions.
//!
//! Lives in the library so the xtask man page generator can reuse the
//! same clap command tree as the binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

use crate::convert::BackendKind;

/// Convert documents to Markdown and sweep out boilerplate sections.
#[derive(Parser, Debug)]
#[command(name = "mdsweep", version = crate::VERSION)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Convert a folder of documents into cleaned Markdown
    Convert {
        /// Folder containing the source documents
        input_dir: PathBuf,

        /// Folder that receives the converted Markdown tree
        output_dir: PathBuf,

        /// Converter backend (overrides the config file)
        #[arg(long, value_enum)]
        backend: Option<BackendKind>,

        /// Seconds to wait for the converter on one file
        #[arg(long, value_name = "SECS")]
        timeout_secs: Option<u64>,

        /// Number of files converted in parallel
        #[arg(short, long, default_value_t = 1)]
        jobs: usize,

        /// Write converter output verbatim, skipping the section cleaner
        #[arg(long)]
        no_clean: bool,

        /// Write a JSON report of per-file outcomes to this path
        #[arg(long, value_name = "FILE")]
        report: Option<PathBuf>,
    },

    /// Clean a single Markdown document (stdin to stdout by default)
    Clean {
        /// Markdown file to clean; read from stdin when omitted
        file: Option<PathBuf>,

        /// Write output here instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Manage the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print the active configuration as TOML
    Show,
    /// Write a config file with default settings
    Init,
    /// Open the config file in $EDITOR
    Edit,
    /// Add missing keys to an existing config file
    Migrate {
        /// Apply changes without prompting
        #[arg(long)]
        yes: bool,
    },
}
