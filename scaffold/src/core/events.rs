//! Events reported while ensuring a scaffold, and the run summary.

use std::fmt;
use std::path::{Path, PathBuf};

/// One observable action taken (or skipped) by the scaffolder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScaffoldEvent {
    DirCreated(PathBuf),
    DirExists(PathBuf),
    FileCreated(PathBuf),
    FileExists(PathBuf),
}

impl fmt::Display for ScaffoldEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScaffoldEvent::DirCreated(path) => write!(f, "Created directory: {}", path.display()),
            ScaffoldEvent::DirExists(path) => {
                write!(f, "Directory {} already exists.", path.display())
            }
            ScaffoldEvent::FileCreated(path) => {
                write!(f, "Created empty file: {}", path.display())
            }
            ScaffoldEvent::FileExists(path) => {
                write!(f, "File already exists: {}", path.display())
            }
        }
    }
}

impl ScaffoldEvent {
    pub fn path(&self) -> &Path {
        match self {
            ScaffoldEvent::DirCreated(path)
            | ScaffoldEvent::DirExists(path)
            | ScaffoldEvent::FileCreated(path)
            | ScaffoldEvent::FileExists(path) => path,
        }
    }

    /// Short verb used when listing planned actions.
    pub fn plan_label(&self) -> &'static str {
        match self {
            ScaffoldEvent::DirCreated(_) => "create dir",
            ScaffoldEvent::DirExists(_) => "keep dir",
            ScaffoldEvent::FileCreated(_) => "create file",
            ScaffoldEvent::FileExists(_) => "keep file",
        }
    }
}

/// Counts of what a completed run did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScaffoldSummary {
    pub dirs_created: usize,
    pub dirs_existing: usize,
    pub files_created: usize,
    pub files_existing: usize,
}

impl ScaffoldSummary {
    pub fn record(&mut self, event: &ScaffoldEvent) {
        match event {
            ScaffoldEvent::DirCreated(_) => self.dirs_created += 1,
            ScaffoldEvent::DirExists(_) => self.dirs_existing += 1,
            ScaffoldEvent::FileCreated(_) => self.files_created += 1,
            ScaffoldEvent::FileExists(_) => self.files_existing += 1,
        }
    }

    /// True when the run changed nothing on disk.
    pub fn is_noop(&self) -> bool {
        self.dirs_created == 0 && self.files_created == 0
    }
}
