//! Clean command handler - run the section cleaner on one document.

use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

use anyhow::{Context, Result};

use mdsweep::cleaner::SectionCleaner;
use mdsweep::Config;

/// Clean a single Markdown document.
///
/// Reads `file` (or stdin) and writes the result to `output` (or
/// stdout). File output matches the batch driver byte for byte; stdout
/// gains a trailing newline when missing so prompts stay on their own
/// line.
#[cfg(not(tarpaulin_include))]
pub fn handle_clean(file: Option<&Path>, output: Option<&Path>) -> Result<()> {
    let text = match file {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            buf
        }
    };

    let config = Config::load()?;
    let cleaned = SectionCleaner::new(&config.cleaner).clean(&text);

    match output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create {}", parent.display()))?;
            }
            fs::write(path, &cleaned)
                .with_context(|| format!("failed to write {}", path.display()))?;
        }
        None => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            out.write_all(cleaned.as_bytes())?;
            if !cleaned.ends_with('\n') {
                out.write_all(b"\n")?;
            }
        }
    }
    Ok(())
}
