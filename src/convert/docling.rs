//! Docling backend.
//!
//! Invokes the `docling` CLI for rich document conversion, including PDF
//! layout analysis and OCR on scanned pages. Output is written into a
//! temporary directory (`docling --to md --output DIR FILE` names the
//! result after the input stem) and read back from there.

use std::path::Path;
use std::process::{Command, Stdio};

use tempfile::TempDir;
use tracing::debug;

use super::{ConvertError, ConvertResult, Converter};

/// Extensions the docling CLI accepts.
const SUPPORTED: &[&str] = &[
    "pdf", "docx", "pptx", "xlsx", "html", "htm", "md", "markdown", "csv", "adoc", "asciidoc",
    "png", "jpg", "jpeg", "tiff", "bmp",
];

/// Backend for the docling CLI.
pub struct DoclingConverter {
    timeout_secs: u64,
}

impl DoclingConverter {
    pub fn new(timeout_secs: u64) -> Self {
        Self { timeout_secs }
    }

    fn command() -> &'static str {
        "docling"
    }
}

impl Converter for DoclingConverter {
    fn name(&self) -> &'static str {
        Self::command()
    }

    fn is_available(&self) -> bool {
        super::command_exists(Self::command())
    }

    fn supports(&self, path: &Path) -> bool {
        super::extension_in(path, SUPPORTED)
    }

    fn convert(&self, path: &Path) -> ConvertResult<String> {
        if !self.supports(path) {
            return Err(ConvertError::Unsupported {
                tool: Self::command(),
                path: path.to_path_buf(),
            });
        }

        let out_dir = TempDir::new()?;
        let mut child = Command::new(Self::command())
            .args(["--to", "md", "--output"])
            .arg(out_dir.path())
            .arg(path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()?;

        let output = match super::wait_with_timeout(&mut child, self.timeout_secs) {
            Ok(output) => output,
            Err(e) if e.kind() == std::io::ErrorKind::TimedOut => {
                let _ = child.kill();
                let _ = child.wait();
                return Err(ConvertError::Timeout {
                    tool: Self::command(),
                    timeout_secs: self.timeout_secs,
                });
            }
            Err(e) => return Err(e.into()),
        };

        if !output.status.success() {
            return Err(ConvertError::Failed {
                tool: Self::command(),
                code: output.status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        // docling names the output after the input stem
        let stem = match path.file_stem() {
            Some(stem) => stem,
            None => {
                return Err(ConvertError::Unsupported {
                    tool: Self::command(),
                    path: path.to_path_buf(),
                })
            }
        };
        let mut file_name = stem.to_os_string();
        file_name.push(".md");
        let produced = out_dir.path().join(file_name);

        if !produced.exists() {
            return Err(ConvertError::MissingOutput {
                tool: Self::command(),
                path: produced,
            });
        }

        let markdown = std::fs::read_to_string(&produced)?;
        debug!(
            input = %path.display(),
            bytes = markdown.len(),
            "docling conversion finished"
        );
        Ok(markdown)
    }
}
