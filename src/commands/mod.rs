//! Subcommand handlers for the mdsweep binary.

pub mod clean;
pub mod config;
pub mod convert;

use anyhow::Result;
use clap::CommandFactory;
use clap_complete::Shell;

use mdsweep::cli::Cli;

/// Print shell completions for the requested shell to stdout.
#[cfg(not(tarpaulin_include))]
pub fn handle_completions(shell: Shell) -> Result<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
    Ok(())
}
