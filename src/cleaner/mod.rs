//! Markdown section cleaning pipeline.
//!
//! Converted weekly status reports carry boilerplate an LLM should never
//! see: routing lines, personnel and meeting sections, standby rosters.
//! This module strips all of it and keeps the substantive content.
//!
//! The pipeline runs four stages in a fixed order:
//!
//! 1. [`CutPreamble`] - drop everything before the first real section
//! 2. [`TruncateAtMarker`] - cut the document at an end-of-content marker
//! 3. [`DropBlockedSections`] - remove sections with blocklisted topics
//! 4. [`NormalizeSpacing`] - one blank line between the survivors
//!
//! Cleaning is a pure string transformation: no I/O, no shared state, and
//! no failure modes. When a pattern is absent the matching stage passes the
//! text through, so the worst case is less-transformed output, never an
//! error. [`SectionCleaner`] may be shared across threads and invoked
//! concurrently on independent documents.
//!
//! # Module Structure
//!
//! - [`headers`] - header detection strategy over bold markup
//! - [`rules`] - the exempt/blocked/marker rule lists
//! - [`stages`] - the four stage implementations

mod headers;
mod rules;
mod stages;

pub use headers::{BoldHeaderFinder, Header, HeaderFinder};
pub use rules::{fold_title, CleanRules};
pub use stages::{CutPreamble, DropBlockedSections, NormalizeSpacing, TruncateAtMarker};

/// One cleaning pass over a whole document.
///
/// Stages receive the header finder explicitly so custom finders apply to
/// every stage at once.
pub trait Stage: Send + Sync {
    /// Transform `text`, locating section headers through `finder`.
    fn apply(&self, text: &str, finder: &dyn HeaderFinder) -> String;
}

/// Applies the cleaning stages in order.
pub struct SectionCleaner {
    stages: Vec<Box<dyn Stage>>,
    finder: Box<dyn HeaderFinder>,
}

impl SectionCleaner {
    /// Build the standard pipeline over bold-markup headers.
    pub fn new(rules: &CleanRules) -> Self {
        Self::with_finder(rules, Box::new(BoldHeaderFinder))
    }

    /// Build the standard pipeline with a custom header grammar.
    pub fn with_finder(rules: &CleanRules, finder: Box<dyn HeaderFinder>) -> Self {
        let stages: Vec<Box<dyn Stage>> = vec![
            Box::new(CutPreamble::new(&rules.exempt_headers)),
            Box::new(TruncateAtMarker::new(&rules.truncation_markers)),
            Box::new(DropBlockedSections::new(&rules.blocked_keywords)),
            Box::new(NormalizeSpacing),
        ];
        Self { stages, finder }
    }

    /// Clean one document.
    pub fn clean(&self, text: &str) -> String {
        let mut current = text.to_string();
        for stage in &self.stages {
            current = stage.apply(&current, self.finder.as_ref());
        }
        current
    }
}

impl Default for SectionCleaner {
    fn default() -> Self {
        Self::new(&CleanRules::default())
    }
}
