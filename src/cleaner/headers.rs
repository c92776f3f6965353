//! Section header detection in bold Markdown markup.
//!
//! Converted status reports mark their section headers as bold runs like
//! `**Status Update:**` rather than `#` headings. Detection is purely
//! syntactic: any bold run whose text fits on one line counts as a header,
//! including bold emphasis inside a sentence. For report input that trades
//! a rare false positive for never missing a real section.

use std::ops::Range;
use std::sync::OnceLock;

use regex::Regex;

/// A section header located in a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    /// Emphasized text, trimmed, with at most one trailing colon removed.
    pub title: String,
    /// Byte range of the whole marker, starting at the first asterisk.
    pub span: Range<usize>,
}

impl Header {
    /// Title lowered for case-insensitive comparisons.
    pub fn normalized_title(&self) -> String {
        self.title.to_lowercase()
    }
}

/// Strategy for locating section headers.
///
/// The cleaning stages only ever see [`Header`] values, so a different
/// header grammar (say `## heading` lines) plugs in here without touching
/// them. Implementations must report headers in document order with titles
/// already trimmed.
pub trait HeaderFinder: Send + Sync {
    /// Find every header in `text`, ordered by position.
    fn find_headers(&self, text: &str) -> Vec<Header>;
}

// Two asterisks, optional whitespace, title without newlines or asterisks,
// optional whitespace, optional trailing colon, two asterisks. The lazy
// title group leaves the trailing colon for the `:?` to consume.
fn bold_header_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\*\*\s*([^*\n]+?)\s*:?\s*\*\*").unwrap())
}

/// Default finder: bold runs like `**Project Alpha Progress:**`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BoldHeaderFinder;

impl HeaderFinder for BoldHeaderFinder {
    fn find_headers(&self, text: &str) -> Vec<Header> {
        bold_header_re()
            .captures_iter(text)
            .filter_map(|caps| {
                let whole = caps.get(0)?;
                let title = caps.get(1)?.as_str().trim();
                if title.is_empty() {
                    return None;
                }
                Some(Header {
                    title: title.to_string(),
                    span: whole.range(),
                })
            })
            .collect()
    }
}
