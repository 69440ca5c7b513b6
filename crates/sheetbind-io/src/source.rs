//! Where sheet data comes from and where it goes.

use std::path::{Path, PathBuf};

/// Input for a read call: a file on disk or an in-memory byte buffer.
#[derive(Debug, Clone)]
pub enum SheetSource {
    Path(PathBuf),
    Bytes(Vec<u8>),
}

impl From<PathBuf> for SheetSource {
    fn from(path: PathBuf) -> Self {
        Self::Path(path)
    }
}

impl From<&Path> for SheetSource {
    fn from(path: &Path) -> Self {
        Self::Path(path.to_path_buf())
    }
}

impl From<&str> for SheetSource {
    fn from(path: &str) -> Self {
        Self::Path(PathBuf::from(path))
    }
}

impl From<Vec<u8>> for SheetSource {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Bytes(bytes)
    }
}

/// Output for a write call.
///
/// `Buffer` makes the writer return the encoded bytes instead of touching
/// the filesystem.
#[derive(Debug, Clone)]
pub enum SheetDestination {
    Path(PathBuf),
    Buffer,
}

impl From<PathBuf> for SheetDestination {
    fn from(path: PathBuf) -> Self {
        Self::Path(path)
    }
}

impl From<&Path> for SheetDestination {
    fn from(path: &Path) -> Self {
        Self::Path(path.to_path_buf())
    }
}

impl From<&str> for SheetDestination {
    fn from(path: &str) -> Self {
        Self::Path(PathBuf::from(path))
    }
}
