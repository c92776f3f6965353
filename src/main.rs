//! mdsweep binary entry point.

mod commands;

use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use mdsweep::cli::{Cli, Commands, ConfigAction};

/// Set up the tracing subscriber on stderr.
///
/// `RUST_LOG` wins when set; otherwise the level comes from the
/// `--verbose`/`--quiet` flags. Logs go to stderr so `clean` output on
/// stdout stays pipeable.
fn init_logging(verbose: u8, quiet: bool) {
    let level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("mdsweep={}", level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[cfg(not(tarpaulin_include))]
fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Convert {
            input_dir,
            output_dir,
            backend,
            timeout_secs,
            jobs,
            no_clean,
            report,
        } => commands::convert::handle_convert(commands::convert::ConvertArgs {
            input_dir,
            output_dir,
            backend,
            timeout_secs,
            jobs,
            no_clean,
            report,
        }),
        Commands::Clean { file, output } => {
            commands::clean::handle_clean(file.as_deref(), output.as_deref())
        }
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::handle_show(),
            ConfigAction::Init => commands::config::handle_init(),
            ConfigAction::Edit => commands::config::handle_edit(),
            ConfigAction::Migrate { yes } => commands::config::handle_migrate(yes),
        },
        Commands::Completions { shell } => commands::handle_completions(shell),
    }
}

#[cfg(not(tarpaulin_include))]
fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    if let Err(err) = run(cli) {
        eprintln!("Error: {:#}", err);
        process::exit(1);
    }
}
