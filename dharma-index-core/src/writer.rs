//! Output page writing.

use std::fs;
use std::path::Path;

use crate::Result;

/// Writes `page` to `path`, replacing any existing file.
///
/// The write is not atomic; an interrupted build can leave a truncated
/// page that the next build overwrites. Returns the number of bytes written.
///
/// # Errors
/// - `IndexError::Io` - Parent directory missing or file not writable
pub fn write_output(path: &Path, page: &str) -> Result<u64> {
    fs::write(path, page)?;

    let bytes = page.len() as u64;
    tracing::info!(path = %path.display(), bytes, "Wrote page");

    Ok(bytes)
}

/// Formats a byte count as whole KiB, rounding down.
pub fn format_kib(bytes: u64) -> String {
    format!("{} KB", bytes / 1024)
}
