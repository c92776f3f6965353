//! Pandoc backend.
//!
//! Converts markup formats to GitHub-flavored Markdown with `--wrap=none`
//! so the cleaner sees whole paragraphs on single lines. Output goes
//! through a temporary file rather than stdout; a large document piped
//! through a full stdout buffer would deadlock the timeout polling.

use std::path::Path;
use std::process::{Command, Stdio};

use tempfile::TempDir;
use tracing::debug;

use super::{ConvertError, ConvertResult, Converter};

/// Extensions pandoc can read.
const SUPPORTED: &[&str] = &[
    "docx", "odt", "html", "htm", "epub", "rst", "org", "tex", "latex", "rtf", "ipynb", "typ",
    "md", "markdown",
];

/// Backend for the pandoc CLI.
pub struct PandocConverter {
    timeout_secs: u64,
}

impl PandocConverter {
    pub fn new(timeout_secs: u64) -> Self {
        Self { timeout_secs }
    }

    fn command() -> &'static str {
        "pandoc"
    }
}

impl Converter for PandocConverter {
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
        let out_file = out_dir.path().join("converted.md");
        let mut child = Command::new(Self::command())
            .arg(path)
            .args(["-t", "gfm", "--wrap=none", "-o"])
            .arg(&out_file)
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

        if !out_file.exists() {
            return Err(ConvertError::MissingOutput {
                tool: Self::command(),
                path: out_file,
            });
        }

        let markdown = std::fs::read_to_string(&out_file)?;
        debug!(
            input = %path.display(),
            bytes = markdown.len(),
            "pandoc conversion finished"
        );
        Ok(markdown)
    }
}
