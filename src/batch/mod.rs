//! Batch conversion driver.
//!
//! Walks an input tree, converts every file to Markdown, runs the section
//! cleaner over the result, and writes the cleaned documents to mirrored
//! paths in the output tree. A failing file is recorded and skipped; it
//! never stops the batch. Entries the walk itself cannot read (dangling
//! symlinks, unreadable directories) are recorded the same way.
//!
//! Progress goes to an interactive bar when stderr is a terminal and to
//! plain log lines otherwise, so batch runs stay readable in CI output.

mod report;

pub use report::{BatchSummary, FileReport, Outcome};

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use chrono::Local;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::cleaner::SectionCleaner;
use crate::convert::Converter;
use crate::files::paths::mirror_path;

/// Options for one batch run.
pub struct BatchOptions {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    /// Run the section cleaner over converted output.
    pub clean: bool,
    /// Files converted in parallel; 1 means serial.
    pub jobs: usize,
}

/// Runs batch conversions with per-file failure isolation.
pub struct BatchRunner {
    converter: Box<dyn Converter>,
    cleaner: SectionCleaner,
    cancelled: Arc<AtomicBool>,
}

impl BatchRunner {
    pub fn new(converter: Box<dyn Converter>, cleaner: SectionCleaner) -> Self {
        Self {
            converter,
            cleaner,
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Flag checked between files; set it from a Ctrl-C handler to stop
    /// after the in-flight file.
    pub fn cancel_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancelled)
    }

    /// Convert everything under `options.input_dir`.
    pub fn run(&self, options: &BatchOptions) -> Result<BatchSummary> {
        let started_at = Local::now();
        let timer = Instant::now();

        let (files, mut reports) = collect_files(&options.input_dir);
        if files.is_empty() && reports.is_empty() {
            return Ok(BatchSummary::from_reports(started_at, 0.0, Vec::new()));
        }

        info!(
            total = files.len(),
            backend = self.converter.name(),
            "starting conversion"
        );
        let progress = Progress::new(files.len());

        let processed: Vec<FileReport> = if options.jobs > 1 {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(options.jobs)
                .build()
                .context("failed to build worker pool")?;
            pool.install(|| {
                files
                    .par_iter()
                    .map(|file| self.process_file(file, options, &progress))
                    .collect()
            })
        } else {
            files
                .iter()
                .map(|file| self.process_file(file, options, &progress))
                .collect()
        };

        progress.finish();
        reports.extend(processed);
        Ok(BatchSummary::from_reports(
            started_at,
            timer.elapsed().as_secs_f64(),
            reports,
        ))
    }

    fn process_file(
        &self,
        input: &Path,
        options: &BatchOptions,
        progress: &Progress,
    ) -> FileReport {
        let name = display_name(input, &options.input_dir);

        if self.cancelled.load(Ordering::SeqCst) {
            progress.file_done(&name);
            return FileReport::skipped(input.to_path_buf(), "cancelled");
        }

        progress.start_file(&name);
        let report = match self.convert_one(input, options) {
            Ok((output, bytes)) => {
                debug!(file = %name, bytes, "converted");
                FileReport::converted(input.to_path_buf(), output, bytes)
            }
            Err(err) => {
                progress.note_skip(&name, &format!("{:#}", err));
                FileReport::skipped(input.to_path_buf(), format!("{:#}", err))
            }
        };
        progress.file_done(&name);
        report
    }

    fn convert_one(&self, input: &Path, options: &BatchOptions) -> Result<(PathBuf, u64)> {
        let markdown = self.converter.convert(input)?;
        let text = if options.clean {
            self.cleaner.clean(&markdown)
        } else {
            markdown
        };

        let dest = mirror_path(input, &options.input_dir, &options.output_dir)
            .context("input file escaped the input folder")?;
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        fs::write(&dest, &text).with_context(|| format!("failed to write {}", dest.display()))?;
        Ok((dest, text.len() as u64))
    }
}

/// Enumerate every regular file under `root`, in stable sorted order.
///
/// An entry the walk cannot read (dangling symlink, unreadable
/// directory, link loop) becomes a skip report rather than a failed
/// run; the rest of the tree is still converted.
fn collect_files(root: &Path) -> (Vec<PathBuf>, Vec<FileReport>) {
    let mut files = Vec::new();
    let mut unreadable = Vec::new();
    for entry in WalkDir::new(root).follow_links(true).sort_by_file_name() {
        match entry {
            Ok(entry) => {
                if entry.file_type().is_file() {
                    files.push(entry.into_path());
                }
            }
            Err(err) => {
                let path = err
                    .path()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| root.to_path_buf());
                let reason = match err.io_error() {
                    Some(io) => format!("cannot read entry: {}", io),
                    None => err.to_string(),
                };
                warn!(file = %path.display(), reason = %reason, "unreadable entry");
                unreadable.push(FileReport::skipped(path, reason));
            }
        }
    }
    (files, unreadable)
}

fn display_name(input: &Path, root: &Path) -> String {
    input
        .strip_prefix(root)
        .unwrap_or(input)
        .display()
        .to_string()
}

/// Progress reporting: a bar on a terminal, log lines otherwise.
enum Progress {
    Bar(ProgressBar),
    Log { done: AtomicUsize, total: usize },
}

impl Progress {
    fn new(total: usize) -> Self {
        if atty::is(atty::Stream::Stderr) {
            let bar = ProgressBar::new(total as u64);
            bar.set_style(
                ProgressStyle::with_template("{pos}/{len} [{bar:30}] {msg}")
                    .expect("progress template is valid")
                    .progress_chars("=> "),
            );
            Progress::Bar(bar)
        } else {
            Progress::Log {
                done: AtomicUsize::new(0),
                total,
            }
        }
    }

    fn start_file(&self, name: &str) {
        if let Progress::Bar(bar) = self {
            bar.set_message(name.to_string());
        }
    }

    fn file_done(&self, name: &str) {
        match self {
            Progress::Bar(bar) => bar.inc(1),
            Progress::Log { done, total } => {
                let n = done.fetch_add(1, Ordering::SeqCst) + 1;
                info!("processed {}/{}: {}", n, total, name);
            }
        }
    }

    fn note_skip(&self, name: &str, reason: &str) {
        match self {
            // println keeps the message above a live bar
            Progress::Bar(bar) => bar.println(format!("skipped {} ({})", name, reason)),
            Progress::Log { .. } => warn!(file = %name, reason = %reason, "skipped"),
        }
    }

    fn finish(&self) {
        if let Progress::Bar(bar) = self {
            bar.finish_and_clear();
        }
    }
}
