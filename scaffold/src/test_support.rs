//! Test-only filesystems, sinks and temp roots.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use anyhow::{Context, Result};
use tempfile::TempDir;

use crate::core::events::ScaffoldEvent;
use crate::io::fs::{Filesystem, LocalFs, NodeKind};
use crate::io::sink::EventSink;

/// Mutating call made against a [`MemoryFs`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FsCall {
    CreateDirAll(PathBuf),
    CreateFile(PathBuf),
}

/// In-memory filesystem with a call log and permission failures.
#[derive(Debug, Default)]
pub struct MemoryFs {
    nodes: BTreeMap<PathBuf, NodeKind>,
    denied: BTreeSet<PathBuf>,
    calls: Vec<FsCall>,
}

impl MemoryFs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a directory (and its ancestors).
    pub fn with_dir(mut self, path: &str) -> Self {
        for ancestor in ancestors(&normalize(Path::new(path))) {
            self.nodes.insert(ancestor, NodeKind::Dir);
        }
        self
    }

    /// Seed an existing file. Its parent must already be seeded.
    pub fn with_file(mut self, path: &str) -> Self {
        self.nodes.insert(normalize(Path::new(path)), NodeKind::File);
        self
    }

    /// Make any creation at or below `path` fail with `PermissionDenied`.
    pub fn deny(mut self, path: &str) -> Self {
        self.denied.insert(normalize(Path::new(path)));
        self
    }

    pub fn kind(&self, path: &str) -> Option<NodeKind> {
        self.nodes.get(&normalize(Path::new(path))).copied()
    }

    pub fn calls(&self) -> &[FsCall] {
        &self.calls
    }

    /// Every node currently present, sorted by path.
    pub fn snapshot(&self) -> Vec<(PathBuf, NodeKind)> {
        self.nodes
            .iter()
            .map(|(path, kind)| (path.clone(), *kind))
            .collect()
    }

    fn check_allowed(&self, path: &Path) -> io::Result<()> {
        if self.denied.iter().any(|denied| path.starts_with(denied)) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("permission denied: {}", path.display()),
            ));
        }
        Ok(())
    }
}

impl Filesystem for MemoryFs {
    fn probe(&self, path: &Path) -> io::Result<Option<NodeKind>> {
        Ok(self.nodes.get(&normalize(path)).copied())
    }

    fn create_dir_all(&mut self, path: &Path) -> io::Result<()> {
        let path = normalize(path);
        self.calls.push(FsCall::CreateDirAll(path.clone()));
        self.check_allowed(&path)?;
        for ancestor in ancestors(&path) {
            match self.nodes.get(&ancestor) {
                Some(NodeKind::Dir) => {}
                Some(_) => {
                    return Err(io::Error::new(
                        io::ErrorKind::NotADirectory,
                        format!("not a directory: {}", ancestor.display()),
                    ));
                }
                None => {
                    self.nodes.insert(ancestor, NodeKind::Dir);
                }
            }
        }
        Ok(())
    }

    fn create_empty_file(&mut self, path: &Path) -> io::Result<()> {
        let path = normalize(path);
        self.calls.push(FsCall::CreateFile(path.clone()));
        self.check_allowed(&path)?;
        if self.nodes.contains_key(&path) {
            return Err(io::Error::from(io::ErrorKind::AlreadyExists));
        }
        let parent = path
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty());
        if let Some(parent) = parent {
            if self.nodes.get(parent) != Some(&NodeKind::Dir) {
                return Err(io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("missing parent directory {}", parent.display()),
                ));
            }
        }
        self.nodes.insert(path, NodeKind::File);
        Ok(())
    }
}

fn normalize(path: &Path) -> PathBuf {
    path.components()
        .filter(|component| matches!(component, Component::Normal(_)))
        .collect()
}

/// Non-empty ancestors of `path`, outermost first, including `path` itself.
fn ancestors(path: &Path) -> Vec<PathBuf> {
    let mut out: Vec<PathBuf> = path
        .ancestors()
        .filter(|ancestor| !ancestor.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .collect();
    out.reverse();
    out
}

/// Sink that keeps every event for later assertions.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub events: Vec<ScaffoldEvent>,
}

impl RecordingSink {
    /// Events rendered the way the CLI logs them.
    pub fn messages(&self) -> Vec<String> {
        self.events.iter().map(ToString::to_string).collect()
    }
}

impl EventSink for RecordingSink {
    fn record(&mut self, event: &ScaffoldEvent) {
        self.events.push(event.clone());
    }
}

/// Temporary project root on the real disk.
pub struct TempRoot {
    dir: TempDir,
}

impl TempRoot {
    pub fn new() -> Result<Self> {
        let dir = tempfile::tempdir().context("create temp root")?;
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn local_fs(&self) -> LocalFs {
        LocalFs::new(self.path())
    }

    /// Write `contents` to a root-relative path, creating parents.
    pub fn write(&self, relative: &str, contents: &str) -> Result<()> {
        let path = self.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("create directory {}", parent.display()))?;
        }
        fs::write(&path, contents).with_context(|| format!("write {}", path.display()))
    }

    pub fn read(&self, relative: &str) -> Result<String> {
        let path = self.path().join(relative);
        fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))
    }
}
