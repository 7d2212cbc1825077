//! Filesystem abstraction for scaffold runs.
//!
//! The [`Filesystem`] trait decouples the scaffolder from the real disk.
//! [`LocalFs`] resolves entries against a project root; tests use an
//! in-memory implementation that records every mutation.

use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

/// What currently occupies a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Dir,
    File,
    /// Sockets, devices and similar objects.
    Other,
}

/// Operations the scaffolder needs from a filesystem.
///
/// Paths are relative to the implementation's root.
pub trait Filesystem {
    /// Inspect `path`. `Ok(None)` when nothing exists there.
    fn probe(&self, path: &Path) -> io::Result<Option<NodeKind>>;

    /// Create `path` and every missing ancestor. Succeeds if it already exists.
    fn create_dir_all(&mut self, path: &Path) -> io::Result<()>;

    /// Create an empty file. Fails with `AlreadyExists` if anything is there.
    fn create_empty_file(&mut self, path: &Path) -> io::Result<()>;
}

impl<F: Filesystem + ?Sized> Filesystem for &mut F {
    fn probe(&self, path: &Path) -> io::Result<Option<NodeKind>> {
        (**self).probe(path)
    }

    fn create_dir_all(&mut self, path: &Path) -> io::Result<()> {
        (**self).create_dir_all(path)
    }

    fn create_empty_file(&mut self, path: &Path) -> io::Result<()> {
        (**self).create_empty_file(path)
    }
}

/// Filesystem backed by the local disk, rooted at a project directory.
#[derive(Debug, Clone)]
pub struct LocalFs {
    root: PathBuf,
}

impl LocalFs {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        self.root.join(path)
    }
}

impl Filesystem for LocalFs {
    fn probe(&self, path: &Path) -> io::Result<Option<NodeKind>> {
        match fs::metadata(self.resolve(path)) {
            Ok(meta) if meta.is_dir() => Ok(Some(NodeKind::Dir)),
            Ok(meta) if meta.is_file() => Ok(Some(NodeKind::File)),
            Ok(_) => Ok(Some(NodeKind::Other)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err),
        }
    }

    fn create_dir_all(&mut self, path: &Path) -> io::Result<()> {
        let resolved = self.resolve(path);
        debug!(path = %resolved.display(), "create_dir_all");
        fs::create_dir_all(resolved)
    }

    fn create_empty_file(&mut self, path: &Path) -> io::Result<()> {
        let resolved = self.resolve(path);
        debug!(path = %resolved.display(), "create_new");
        OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(resolved)
            .map(|_| ())
    }
}
