//! Part-file naming and discovery.
//!
//! Part names follow `{prefix}{NNNN}.part` with a zero-based index padded to
//! [`INDEX_WIDTH`] digits. Padding makes lexicographic name order equal to
//! numeric index order for up to [`MAX_ORDERED_PARTS`] parts, which is the
//! only ordering the joiner relies on.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{FsplitError, Result};

/// Part-name prefix used when the caller supplies none.
pub const DEFAULT_PREFIX: &str = "part_";

/// Extension appended to every part file.
pub const PART_SUFFIX: &str = ".part";

/// Zero-pad width of the part index.
pub const INDEX_WIDTH: usize = 4;

/// Highest part count for which lexicographic name order equals numeric
/// index order. Beyond this the formatted index widens to five digits and
/// reassembly order is no longer defined.
pub const MAX_ORDERED_PARTS: u64 = 10_000;

/// Builds the file name of part `index`: `{prefix}{index:04}.part`.
pub fn part_file_name(prefix: &str, index: u32) -> String {
    format!("{prefix}{index:0width$}{PART_SUFFIX}", width = INDEX_WIDTH)
}

/// Lists the entries of `dir` whose name starts with `prefix`, sorted
/// lexicographically by file name.
///
/// Matching is by prefix alone. Extension and index are not validated, so a
/// stray entry sharing the prefix is returned along with real parts; the
/// prefix is the caller's uniqueness key.
pub fn discover_parts(dir: &Path, prefix: &str) -> Result<Vec<PathBuf>> {
    let mut parts = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(walk_error)?;
        if entry.file_name().to_string_lossy().starts_with(prefix) {
            parts.push(entry.into_path());
        }
    }
    Ok(parts)
}

fn walk_error(e: walkdir::Error) -> FsplitError {
    FsplitError::Io(
        e.into_io_error()
            .unwrap_or_else(|| std::io::Error::other("directory walk failed")),
    )
}
