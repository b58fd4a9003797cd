//! Path and directory management.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::fs::naming::sanitize_filename;

/// Suffix of a file that is still being written.
///
/// `~` never survives [`sanitize_filename`], so no downloaded file can be
/// named like another download's partial file.
pub const PARTIAL_SUFFIX: &str = "~part";

/// Get the directory for a course under the download root.
pub fn course_directory(root: &Path, course_name: &str) -> Result<PathBuf> {
    Ok(root.join(sanitize_filename(course_name)?))
}

/// Path a download is streamed to before it is moved onto `target`.
pub fn partial_path(target: &Path) -> PathBuf {
    let mut name = target
        .file_name()
        .map(OsString::from)
        .unwrap_or_default();
    name.push(PARTIAL_SUFFIX);
    target.with_file_name(name)
}

/// Ensure a directory exists, creating it if necessary.
///
/// Safe to call concurrently for the same path.
pub async fn ensure_dir(path: &Path) -> Result<()> {
    tokio::fs::create_dir_all(path).await?;
    Ok(())
}
