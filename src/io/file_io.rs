//! File open/create primitives shared by the split and join operations.

use std::fs::{self, File};
use std::path::Path;

use crate::error::{FsplitError, Result};
use crate::util::is_regular_file;

/// Opens a source file for sequential reading.
///
/// The path must name an existing regular file; directories and missing
/// paths return [`FsplitError::FileNotFound`].
pub fn open_source_file(path: &Path) -> Result<File> {
    if !is_regular_file(path) {
        return Err(FsplitError::FileNotFound(path.to_path_buf()));
    }
    Ok(File::open(path)?)
}

/// Creates (or truncates) a destination file for writing.
///
/// The parent directory must already exist.
pub fn create_dest_file(path: &Path) -> Result<File> {
    Ok(File::create(path)?)
}

/// Creates `dir` and any missing ancestors. Existing directories are fine.
pub fn ensure_output_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn open_source_file_missing_is_file_not_found() {
        let result = open_source_file(Path::new("/nonexistent/__fsplit_io_test__.bin"));
        assert!(matches!(result, Err(FsplitError::FileNotFound(_))));
    }

    #[test]
    fn open_source_file_directory_is_file_not_found() {
        let dir = TempDir::new().unwrap();
        let result = open_source_file(dir.path());
        assert!(matches!(result, Err(FsplitError::FileNotFound(_))));
    }

    #[test]
    fn open_source_file_regular_file_succeeds() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("input.bin");
        fs::write(&path, b"data").unwrap();
        assert!(open_source_file(&path).is_ok());
    }

    #[test]
    fn create_dest_file_truncates_existing_contents() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.bin");
        fs::write(&path, b"old contents").unwrap();
        drop(create_dest_file(&path).unwrap());
        assert_eq!(fs::metadata(&path).unwrap().len(), 0);
    }

    #[test]
    fn create_dest_file_without_parent_is_io_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("out.bin");
        assert!(matches!(create_dest_file(&path), Err(FsplitError::Io(_))));
    }

    #[test]
    fn ensure_output_dir_creates_nested_ancestors() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("a").join("b").join("c");
        ensure_output_dir(&nested).unwrap();
        assert!(nested.is_dir());
        // Idempotent on an existing directory.
        ensure_output_dir(&nested).unwrap();
    }
}
