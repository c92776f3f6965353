//! Document-to-Markdown converter backends.
//!
//! Conversion is delegated to external CLI tools behind the [`Converter`]
//! trait: one capability, "turn the file at this path into a Markdown
//! string, or fail". Failures are always scoped to a single input file so
//! the batch driver can skip and continue.
//!
//! Backends:
//! - [`DoclingConverter`] - rich documents (PDF, DOCX, PPTX, images)
//! - [`PandocConverter`] - markup formats (DOCX, HTML, EPUB, ODT, RST)
//! - [`MarkdownPassthrough`] - files that already are Markdown or text

mod docling;
mod pandoc;
mod passthrough;

pub use docling::DoclingConverter;
pub use passthrough::MarkdownPassthrough;
pub use pandoc::PandocConverter;

use std::path::{Path, PathBuf};
use std::process::{Child, Command, Output, Stdio};
use std::time::{Duration, Instant};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Errors from a converter backend, always about one input file.
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("'{tool}' not found in PATH")]
    NotAvailable { tool: &'static str },

    #[error("{tool} does not handle '{path}'")]
    Unsupported { tool: &'static str, path: PathBuf },

    #[error("{tool} exited with code {code}: {stderr}")]
    Failed {
        tool: &'static str,
        code: i32,
        stderr: String,
    },

    #[error("{tool} timed out after {timeout_secs}s")]
    Timeout { tool: &'static str, timeout_secs: u64 },

    #[error("{tool} produced no output file at {path}")]
    MissingOutput { tool: &'static str, path: PathBuf },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ConvertResult<T> = Result<T, ConvertError>;

/// A tool that can turn a document into Markdown text.
pub trait Converter: Send + Sync {
    /// Backend name for logs and reports.
    fn name(&self) -> &'static str;

    /// Check that the backing CLI is on PATH. Should be fast.
    fn is_available(&self) -> bool;

    /// Whether this backend understands the file's extension.
    fn supports(&self, path: &Path) -> bool;

    /// Convert the document at `path` to a Markdown string.
    fn convert(&self, path: &Path) -> ConvertResult<String>;
}

/// Converter backend selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BackendKind {
    /// First available of docling and pandoc, else passthrough.
    #[default]
    Auto,
    /// The docling CLI.
    Docling,
    /// The pandoc CLI.
    Pandoc,
    /// Read Markdown and plain text files as-is.
    Passthrough,
}

/// Resolve a backend choice to a concrete converter.
///
/// `Auto` probes docling then pandoc and falls back to the passthrough
/// with a warning. A named backend that is not installed is an error, a
/// missing tool must never silently degrade the output.
pub fn resolve(kind: BackendKind, timeout_secs: u64) -> ConvertResult<Box<dyn Converter>> {
    match kind {
        BackendKind::Auto => {
            let docling = DoclingConverter::new(timeout_secs);
            if docling.is_available() {
                return Ok(Box::new(docling));
            }
            let pandoc = PandocConverter::new(timeout_secs);
            if pandoc.is_available() {
                return Ok(Box::new(pandoc));
            }
            warn!("neither docling nor pandoc found in PATH; only Markdown and plain text inputs will be handled");
            Ok(Box::new(MarkdownPassthrough))
        }
        BackendKind::Docling => {
            let backend = DoclingConverter::new(timeout_secs);
            if !backend.is_available() {
                return Err(ConvertError::NotAvailable { tool: "docling" });
            }
            Ok(Box::new(backend))
        }
        BackendKind::Pandoc => {
            let backend = PandocConverter::new(timeout_secs);
            if !backend.is_available() {
                return Err(ConvertError::NotAvailable { tool: "pandoc" });
            }
            Ok(Box::new(backend))
        }
        BackendKind::Passthrough => Ok(Box::new(MarkdownPassthrough)),
    }
}

/// Check if a command exists by running `<cmd> --version`.
fn command_exists(cmd: &str) -> bool {
    Command::new(cmd)
        .arg("--version")
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|status| status.success())
        .unwrap_or(false)
}

/// Case-insensitive extension lookup against a supported-extension table.
fn extension_in(path: &Path, supported: &[&str]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            supported.iter().any(|s| *s == ext)
        })
        .unwrap_or(false)
}

/// Wait for a child process with a timeout.
///
/// Uses a simple polling approach since std::process doesn't have
/// native timeout support. On timeout the child is left running; the
/// caller kills and reaps it.
fn wait_with_timeout(child: &mut Child, timeout_secs: u64) -> std::io::Result<Output> {
    use std::thread;

    let start = Instant::now();
    let poll_interval = Duration::from_millis(100);

    loop {
        match child.try_wait() {
            Ok(Some(status)) => {
                let stdout = child
                    .stdout
                    .take()
                    .map(|mut s| {
                        let mut buf = Vec::new();
                        std::io::Read::read_to_end(&mut s, &mut buf).ok();
                        buf
                    })
                    .unwrap_or_default();

                let stderr = child
                    .stderr
                    .take()
                    .map(|mut s| {
                        let mut buf = Vec::new();
                        std::io::Read::read_to_end(&mut s, &mut buf).ok();
                        buf
                    })
                    .unwrap_or_default();

                return Ok(Output {
                    status,
                    stdout,
                    stderr,
                });
            }
            Ok(None) => {
                if start.elapsed().as_secs() >= timeout_secs {
                    return Err(std::io::Error::new(
                        std::io::ErrorKind::TimedOut,
                        "process timed out",
                    ));
                }
                thread::sleep(poll_interval);
            }
            Err(e) => return Err(e),
        }
    }
}
