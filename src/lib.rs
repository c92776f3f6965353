//! mdsweep - batch document conversion with boilerplate removal.
//!
//! Converts folders of documents (PDF, DOCX, HTML, ...) to Markdown via
//! external CLI tools and strips recurring status-report boilerplate
//! from the result: preamble before the first real section, blocklisted
//! sections, and everything after a truncation marker.
//!
//! The library is organized around four pieces:
//! - [`cleaner`] - the pure text pipeline ([`SectionCleaner`])
//! - [`convert`] - converter backends behind the [`convert::Converter`] trait
//! - [`batch`] - the folder walker that ties the two together
//! - [`config`] - the TOML configuration file

pub mod batch;
pub mod cleaner;
pub mod cli;
pub mod config;
pub mod convert;
pub mod files;

pub use cleaner::{CleanRules, SectionCleaner};
pub use config::Config;

/// Version string with git commit hash and build date (dev builds).
#[cfg(not(feature = "release"))]
pub const VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("VERGEN_GIT_SHA"),
    " ",
    env!("MDSWEEP_BUILD_DATE"),
    ")"
);

/// Clean version string for official release builds.
#[cfg(feature = "release")]
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
