//! Scaffold manifests: alternate entry lists stored as TOML.
//!
//! ```toml
//! entries = [
//!     "configs/project_config.yml",
//!     "images",
//! ]
//! ```

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::entry::{PathEntry, validate_entries};
use crate::core::layout::default_entries;

/// Ordered list of entries to ensure.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    pub entries: Vec<PathEntry>,
}

impl Default for Manifest {
    fn default() -> Self {
        Self {
            entries: default_entries(),
        }
    }
}

impl Manifest {
    pub fn validate(&self) -> Result<()> {
        let errors = validate_entries(&self.entries);
        if errors.is_empty() {
            return Ok(());
        }
        Err(anyhow!("invalid entries: {}", errors.join("; ")))
    }
}

/// Load and validate a manifest from a TOML file.
pub fn load_manifest(path: &Path) -> Result<Manifest> {
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let manifest: Manifest =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    manifest
        .validate()
        .with_context(|| format!("validate {}", path.display()))?;
    debug!(path = %path.display(), entries = manifest.entries.len(), "manifest loaded");
    Ok(manifest)
}

/// Use the manifest at `path` when given, otherwise the built-in layout.
pub fn resolve_manifest(path: Option<&Path>) -> Result<Manifest> {
    match path {
        Some(path) => load_manifest(path),
        None => {
            let manifest = Manifest::default();
            manifest.validate()?;
            Ok(manifest)
        }
    }
}

/// Atomically write a manifest to disk (temp file + rename).
pub fn write_manifest(path: &Path, manifest: &Manifest) -> Result<()> {
    manifest.validate()?;
    let mut buf = toml::to_string_pretty(manifest).context("serialize manifest toml")?;
    if !buf.ends_with('\n') {
        buf.push('\n');
    }
    write_atomic(path, &buf)
}

fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("create directory {}", parent.display()))?;
    }
    let tmp_path = path.with_extension("toml.tmp");
    fs::write(&tmp_path, contents)
        .with_context(|| format!("write temp manifest {}", tmp_path.display()))?;
    fs::rename(&tmp_path, path).with_context(|| format!("replace manifest {}", path.display()))?;
    Ok(())
}
