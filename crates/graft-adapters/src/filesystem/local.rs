//! Local filesystem adapter using std::fs.

use std::io;
use std::path::Path;

use graft_core::{
    application::{ApplicationError, ports::Filesystem},
    error::{GraftError, GraftResult},
};
use tracing::trace;

/// Production filesystem implementation using `std::fs`.
#[derive(Debug, Clone, Copy)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for LocalFilesystem {
    fn create_dir_all(&self, path: &Path) -> GraftResult<()> {
        std::fs::create_dir_all(path).map_err(|e| map_io_error(path, e, "create directory"))
    }

    fn read_to_string(&self, path: &Path) -> GraftResult<String> {
        trace!(path = %path.display(), "read");
        std::fs::read_to_string(path).map_err(|e| map_io_error(path, e, "read file"))
    }

    fn write_file(&self, path: &Path, content: &str) -> GraftResult<()> {
        trace!(path = %path.display(), bytes = content.len(), "write");
        std::fs::write(path, content).map_err(|e| map_io_error(path, e, "write file"))
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> GraftError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: format!("Failed to {}: {}", operation, e),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use graft_core::error::ErrorCategory;

    #[test]
    fn write_then_read_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let fs = LocalFilesystem::new();
        let nested = dir.path().join("x/blog/client/cli");

        fs.create_dir_all(&nested).unwrap();
        let file = nested.join("query.go");
        fs.write_file(&file, "package cli\n").unwrap();

        assert!(fs.exists(&file));
        assert_eq!(fs.read_to_string(&file).unwrap(), "package cli\n");
    }

    #[test]
    fn missing_file_is_an_io_error_with_path() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.proto");

        let err = LocalFilesystem.read_to_string(&missing).unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Io);
        assert!(err.to_string().contains("nope.proto"));
    }
}
