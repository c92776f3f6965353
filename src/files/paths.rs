//! Output path mirroring for converted documents.

use std::path::{Path, PathBuf, StripPrefixError};

/// Compute where a converted document lands in the output tree.
///
/// The input's path relative to `input_root` is mirrored under
/// `output_root` with the extension replaced by `md`:
/// `reports/week1.docx` becomes `<out>/reports/week1.md`. A file without
/// an extension gains one (`README` becomes `README.md`); only the last
/// extension of a multi-dot name is replaced.
pub fn mirror_path(
    input: &Path,
    input_root: &Path,
    output_root: &Path,
) -> Result<PathBuf, StripPrefixError> {
    let relative = input.strip_prefix(input_root)?;
    Ok(output_root.join(relative.with_extension("md")))
}
