//! The individual cleaning stages.
//!
//! Each stage owns the rule list it needs and transforms a whole document.
//! They are applied in a fixed order by
//! [`SectionCleaner`](crate::cleaner::SectionCleaner): preamble cut, tail
//! cut, section filter, spacing normalization. Every stage degrades to a
//! no-op when its pattern is absent, so no input can make a stage fail.

use tracing::debug;

use super::headers::{Header, HeaderFinder};
use super::rules::fold_title;
use super::Stage;

/// Drops everything before the first substantive section header.
///
/// Routing headers (To, From, ...) are exempt and never start the content;
/// they disappear with the rest of the preamble once a real header is
/// found. A document with no qualifying header passes through unchanged.
pub struct CutPreamble {
    exempt: Vec<String>,
}

impl CutPreamble {
    /// Create the stage; `exempt` entries are matched case-insensitively.
    pub fn new(exempt: &[String]) -> Self {
        Self {
            exempt: exempt.iter().map(|h| h.to_lowercase()).collect(),
        }
    }

    fn is_exempt(&self, header: &Header) -> bool {
        let title = header.normalized_title();
        self.exempt.iter().any(|h| *h == title)
    }
}

impl Stage for CutPreamble {
    fn apply(&self, text: &str, finder: &dyn HeaderFinder) -> String {
        for header in finder.find_headers(text) {
            if self.is_exempt(&header) {
                continue;
            }
            if header.span.start > 0 {
                debug!(
                    offset = header.span.start,
                    title = %header.title,
                    "cutting preamble before first content header"
                );
            }
            return text[header.span.start..].trim_start().to_string();
        }
        text.to_string()
    }
}

/// Truncates the document at an end-of-content marker section.
///
/// Everything from the marker header on is discarded, the marker section
/// included. Runs before the section filter and fires regardless of it.
pub struct TruncateAtMarker {
    markers: Vec<String>,
}

impl TruncateAtMarker {
    /// Create the stage; `markers` are whole titles, case-insensitive.
    pub fn new(markers: &[String]) -> Self {
        Self {
            markers: markers.iter().map(|m| m.to_lowercase()).collect(),
        }
    }

    fn is_marker(&self, header: &Header) -> bool {
        let title = header.normalized_title();
        self.markers.iter().any(|m| *m == title)
    }
}

impl Stage for TruncateAtMarker {
    fn apply(&self, text: &str, finder: &dyn HeaderFinder) -> String {
        for header in finder.find_headers(text) {
            if self.is_marker(&header) {
                debug!(
                    offset = header.span.start,
                    title = %header.title,
                    "truncating at end-of-content marker"
                );
                return text[..header.span.start].trim_end().to_string();
            }
        }
        text.to_string()
    }
}

/// Removes whole sections whose title matches a blocked keyword.
///
/// A section runs from its header to the next header (or the end). The
/// folded title is matched by substring, so `**Weekly Personnel Update**`
/// is caught by the keyword `personnel`. Survivors are re-joined in their
/// original order; text before the first header is not part of any section
/// and does not survive the rejoin.
pub struct DropBlockedSections {
    blocked: Vec<String>,
}

impl DropBlockedSections {
    /// Create the stage; `blocked` entries are folded once up front.
    /// Entries that fold to nothing are ignored, an empty needle would
    /// match every title.
    pub fn new(blocked: &[String]) -> Self {
        Self {
            blocked: blocked
                .iter()
                .map(|k| fold_title(k))
                .filter(|k| !k.is_empty())
                .collect(),
        }
    }

    fn is_blocked(&self, header: &Header) -> bool {
        let folded = fold_title(&header.title);
        self.blocked.iter().any(|k| folded.contains(k.as_str()))
    }
}

impl Stage for DropBlockedSections {
    fn apply(&self, text: &str, finder: &dyn HeaderFinder) -> String {
        let headers = finder.find_headers(text);
        if headers.is_empty() {
            return text.trim_start().to_string();
        }

        let mut kept = String::with_capacity(text.len());
        for (i, header) in headers.iter().enumerate() {
            let end = headers
                .get(i + 1)
                .map_or(text.len(), |next| next.span.start);
            if self.is_blocked(header) {
                debug!(title = %header.title, "dropping blocked section");
                continue;
            }
            kept.push_str(&text[header.span.start..end]);
        }
        kept.trim_start().to_string()
    }
}

/// Re-spaces the document: exactly one blank line between sections.
///
/// The text is split immediately before every header, chunks are trimmed,
/// empty chunks dropped, and the rest joined with a single blank line.
/// Idempotent, since a second pass splits at the same headers and finds
/// nothing left to trim.
pub struct NormalizeSpacing;

impl Stage for NormalizeSpacing {
    fn apply(&self, text: &str, finder: &dyn HeaderFinder) -> String {
        let headers = finder.find_headers(text);

        let mut chunks: Vec<&str> = Vec::with_capacity(headers.len() + 1);
        let mut prev = 0;
        for header in &headers {
            if header.span.start > prev {
                chunks.push(&text[prev..header.span.start]);
                prev = header.span.start;
            }
        }
        chunks.push(&text[prev..]);

        let trimmed: Vec<&str> = chunks
            .iter()
            .map(|chunk| chunk.trim())
            .filter(|chunk| !chunk.is_empty())
            .collect();
        trimmed.join("\n\n")
    }
}
