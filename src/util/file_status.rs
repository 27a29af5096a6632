//! File type probes.
//!
//! Thin wrappers over `std::fs::metadata` that collapse "absent" and
//! "wrong type" into `false`, which is the only distinction the validation
//! paths need.

use std::fs;
use std::path::Path;

/// Returns `true` if `path` names an existing regular file.
pub fn is_regular_file(path: &Path) -> bool {
    fs::metadata(path)
        .map(|m| m.file_type().is_file())
        .unwrap_or(false)
}

/// Returns `true` if `path` names an existing directory.
pub fn is_directory(path: &Path) -> bool {
    fs::metadata(path)
        .map(|m| m.file_type().is_dir())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn regular_file_is_detected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("plain.bin");
        fs::write(&path, b"x").unwrap();
        assert!(is_regular_file(&path));
        assert!(!is_directory(&path));
    }

    #[test]
    fn directory_is_detected() {
        let dir = TempDir::new().unwrap();
        assert!(is_directory(dir.path()));
        assert!(!is_regular_file(dir.path()));
    }

    #[test]
    fn missing_path_is_neither() {
        let path = Path::new("/nonexistent/__fsplit_status_test__");
        assert!(!is_regular_file(path));
        assert!(!is_directory(path));
    }
}
