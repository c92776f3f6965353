//! Convert command handler - batch conversion of a document folder.

use std::fs;
use std::path::PathBuf;
use std::sync::atomic::Ordering;

use anyhow::{bail, Context, Result};
use humansize::{format_size, DECIMAL};

use mdsweep::batch::{BatchOptions, BatchRunner};
use mdsweep::cleaner::SectionCleaner;
use mdsweep::convert::{self, BackendKind};
use mdsweep::Config;

/// Arguments collected from the `convert` subcommand.
pub struct ConvertArgs {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub backend: Option<BackendKind>,
    pub timeout_secs: Option<u64>,
    pub jobs: usize,
    pub no_clean: bool,
    pub report: Option<PathBuf>,
}

/// Convert every file under `input_dir` into cleaned Markdown under
/// `output_dir`. CLI flags override the config file.
#[cfg(not(tarpaulin_include))]
pub fn handle_convert(args: ConvertArgs) -> Result<()> {
    if !args.input_dir.is_dir() {
        bail!(
            "input folder '{}' does not exist or is not a directory",
            args.input_dir.display()
        );
    }

    let config = Config::load()?;
    let backend = args.backend.unwrap_or(config.converter.backend);
    let timeout_secs = args.timeout_secs.unwrap_or(config.converter.timeout_secs);

    let converter = convert::resolve(backend, timeout_secs)?;
    let cleaner = SectionCleaner::new(&config.cleaner);
    let runner = BatchRunner::new(converter, cleaner);

    // First Ctrl-C finishes the in-flight file and stops; partial output
    // files are never left behind.
    let cancelled = runner.cancel_flag();
    ctrlc::set_handler(move || {
        cancelled.store(true, Ordering::SeqCst);
        eprintln!("\nStopping after the current file...");
    })
    .context("failed to install Ctrl-C handler")?;

    let options = BatchOptions {
        input_dir: args.input_dir,
        output_dir: args.output_dir,
        clean: !args.no_clean,
        jobs: args.jobs.max(1),
    };
    let summary = runner.run(&options)?;

    if let Some(path) = &args.report {
        let json = serde_json::to_string_pretty(&summary)?;
        fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
    }

    if summary.total == 0 {
        println!("No files found in the input folder.");
        return Ok(());
    }

    println!(
        "Processed {} files in {:.1}s: {} converted, {} skipped, {} written.",
        summary.total,
        summary.duration_secs,
        summary.converted,
        summary.skipped,
        format_size(summary.bytes_written, DECIMAL)
    );
    Ok(())
}
