//! Rule lists that drive the cleaning stages.

use serde::{Deserialize, Serialize};

/// Which headers to keep, drop, and stop at.
///
/// The defaults target weekly status reports; the config file can override
/// every list. All comparisons are case-insensitive. Keyword matching also
/// ignores punctuation, see [`fold_title`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CleanRules {
    /// Routing headers (To/From/...) that never count as the first content
    /// section. Matched against the whole title.
    pub exempt_headers: Vec<String>,
    /// A section whose folded title contains one of these phrases is dropped.
    pub blocked_keywords: Vec<String>,
    /// A header with exactly this title ends the document; it and everything
    /// after it is cut.
    pub truncation_markers: Vec<String>,
}

impl Default for CleanRules {
    fn default() -> Self {
        let owned = |items: &[&str]| items.iter().map(|s| s.to_string()).collect();
        Self {
            exempt_headers: owned(&["to", "from", "date", "subject"]),
            blocked_keywords: owned(&[
                "personnel",
                "meeting",
                "training",
                "safety",
                "compliance",
                "kudos",
                "webinar",
                "standby",
                "automation standby",
                "automation overtime",
                "six months goals",
            ]),
            truncation_markers: owned(&["standby", "automation standby"]),
        }
    }
}

/// Fold a title for keyword matching: every run of non-alphanumeric
/// characters becomes a single space, edges are trimmed, and the result is
/// lowercased. `"Automation - Standby!"` folds to `"automation standby"`.
pub fn fold_title(title: &str) -> String {
    let mut folded = String::with_capacity(title.len());
    let mut pending_gap = false;
    for c in title.chars() {
        if c.is_alphanumeric() {
            if pending_gap && !folded.is_empty() {
                folded.push(' ');
            }
            pending_gap = false;
            folded.extend(c.to_lowercase());
        } else {
            pending_gap = true;
        }
    }
    folded
}
