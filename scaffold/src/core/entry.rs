//! Scaffold entries and their file/directory classification.

use std::fmt;
use std::path::{Component, Path};

use serde::{Deserialize, Serialize};

/// Whether an entry denotes a file or a directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Dir,
}

impl EntryKind {
    pub fn label(self) -> &'static str {
        match self {
            EntryKind::File => "file",
            EntryKind::Dir => "dir",
        }
    }
}

/// One path from the scaffold list, relative to the project root.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PathEntry {
    raw: String,
}

impl PathEntry {
    pub fn new(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn path(&self) -> &Path {
        Path::new(&self.raw)
    }

    /// Classify by the leaf's extension.
    ///
    /// `notes.txt` and `gpt-4o.ipynb` are files; `images`, `.gitignore` and
    /// `trailing.` are directories.
    pub fn kind(&self) -> EntryKind {
        let has_suffix = self
            .path()
            .extension()
            .is_some_and(|extension| !extension.is_empty());
        if has_suffix {
            EntryKind::File
        } else {
            EntryKind::Dir
        }
    }

    pub fn is_file(&self) -> bool {
        self.kind() == EntryKind::File
    }

    /// Final path segment, if any.
    pub fn leaf_name(&self) -> Option<&str> {
        self.path().file_name().and_then(|name| name.to_str())
    }

    /// All segments except the leaf. `None` when the entry sits at the root.
    pub fn parent_dir(&self) -> Option<&Path> {
        self.path().parent().filter(|parent| is_meaningful(parent))
    }

    /// Directory that must exist before the leaf can be ensured.
    ///
    /// File entries need their parent; directory entries are their own
    /// target.
    pub fn dir_target(&self) -> Option<&Path> {
        match self.kind() {
            EntryKind::File => self.parent_dir(),
            EntryKind::Dir => Some(self.path()).filter(|path| is_meaningful(path)),
        }
    }
}

impl fmt::Display for PathEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl From<&str> for PathEntry {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

fn is_meaningful(path: &Path) -> bool {
    path.components()
        .any(|component| !matches!(component, Component::CurDir))
}

/// Check an entry list before any filesystem work.
///
/// Returns one message per problem; an empty vec means the list is usable.
pub fn validate_entries(entries: &[PathEntry]) -> Vec<String> {
    let mut errors = Vec::new();
    if entries.is_empty() {
        errors.push("entry list is empty".to_string());
        return errors;
    }

    for (index, entry) in entries.iter().enumerate() {
        if entry.as_str().trim().is_empty() {
            errors.push(format!("entry #{index} is empty"));
            continue;
        }
        let path = entry.path();
        if path.has_root()
            || path
                .components()
                .any(|component| matches!(component, Component::Prefix(_)))
        {
            errors.push(format!("entry '{entry}' must be relative"));
        }
        if path
            .components()
            .any(|component| matches!(component, Component::ParentDir))
        {
            errors.push(format!("entry '{entry}' must not contain '..'"));
        }
        if !is_meaningful(path) {
            errors.push(format!("entry '{entry}' does not name anything below the root"));
        }
    }
    errors
}
