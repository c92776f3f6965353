//! Passthrough backend for files that need no conversion.
//!
//! Reads Markdown and plain text directly. Always available, which makes
//! it the last resort of automatic backend selection and the backend the
//! integration tests run against.

use std::path::Path;

use super::{ConvertError, ConvertResult, Converter};

const SUPPORTED: &[&str] = &["md", "markdown", "txt", "text"];

/// Reads Markdown/plain text files as-is.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownPassthrough;

impl Converter for MarkdownPassthrough {
    fn name(&self) -> &'static str {
        "passthrough"
    }

    fn is_available(&self) -> bool {
        true
    }

    fn supports(&self, path: &Path) -> bool {
        super::extension_in(path, SUPPORTED)
    }

    fn convert(&self, path: &Path) -> ConvertResult<String> {
        if !self.supports(path) {
            return Err(ConvertError::Unsupported {
                tool: "passthrough",
                path: path.to_path_buf(),
            });
        }
        Ok(std::fs::read_to_string(path)?)
    }
}
