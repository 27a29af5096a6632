//! File size helpers used for progress accounting.

use std::fs::{self, File};
use std::path::PathBuf;

use crate::error::Result;

/// Returns the size in bytes of the already-open `file`.
///
/// Returns `0` if the underlying handle does not refer to a regular file;
/// a zero total routes the caller onto its empty-input path.
pub fn open_file_size(file: &File) -> u64 {
    file.metadata()
        .ok()
        .filter(|m| m.file_type().is_file())
        .map(|m| m.len())
        .unwrap_or(0)
}

/// Returns the total size in bytes across `paths`.
///
/// Unlike [`open_file_size`], a path that cannot be stat-ted is an error:
/// the joiner needs an exact total before it starts writing, and a vanished
/// part must abort the operation rather than skew the percentage.
pub fn total_file_size(paths: &[PathBuf]) -> Result<u64> {
    let mut total: u64 = 0;
    for path in paths {
        total += fs::metadata(path)?.len();
    }
    Ok(total)
}
