//! Errors raised while ensuring a scaffold.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Filesystem operation that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FsOp {
    CreateDir,
    CreateFile,
    Inspect,
}

impl FsOp {
    fn describe(self) -> &'static str {
        match self {
            FsOp::CreateDir => "create directory",
            FsOp::CreateFile => "create file",
            FsOp::Inspect => "inspect",
        }
    }
}

/// Fatal failure that aborts a scaffold run.
#[derive(Debug, Error)]
pub enum ScaffoldError {
    #[error("{entry}: {} {}", .op.describe(), .path.display())]
    Io {
        entry: String,
        op: FsOp,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{entry}: {} exists but is not a directory", .path.display())]
    NotADirectory { entry: String, path: PathBuf },

    #[error("invalid entries: {}", .0.join("; "))]
    InvalidEntries(Vec<String>),
}

impl ScaffoldError {
    pub(crate) fn io(entry: &str, op: FsOp, path: impl Into<PathBuf>, source: io::Error) -> Self {
        ScaffoldError::Io {
            entry: entry.to_string(),
            op,
            path: path.into(),
            source,
        }
    }

    /// Entry that was being processed when the run stopped.
    ///
    /// `None` when the list was rejected before any entry was processed.
    pub fn entry(&self) -> Option<&str> {
        match self {
            ScaffoldError::Io { entry, .. } | ScaffoldError::NotADirectory { entry, .. } => {
                Some(entry)
            }
            ScaffoldError::InvalidEntries(_) => None,
        }
    }

    /// I/O error kind, when the failure came from the filesystem.
    pub fn io_kind(&self) -> Option<io::ErrorKind> {
        match self {
            ScaffoldError::Io { source, .. } => Some(source.kind()),
            ScaffoldError::NotADirectory { .. } | ScaffoldError::InvalidEntries(_) => None,
        }
    }
}
