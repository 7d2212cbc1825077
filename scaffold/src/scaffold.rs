//! Ensure a scaffold exists on disk.
//!
//! Entries are processed strictly in order. For each entry the directory it
//! needs is ensured first (with all ancestors), then the leaf itself. The
//! first fatal error stops the run; whatever was created before it stays.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::core::entry::{PathEntry, validate_entries};
use crate::core::events::{ScaffoldEvent, ScaffoldSummary};
use crate::error::{FsOp, ScaffoldError};
use crate::io::fs::{Filesystem, NodeKind};
use crate::io::sink::EventSink;

/// Applies entry lists to a filesystem, reporting to an event sink.
pub struct Scaffolder<F, S> {
    fs: F,
    sink: S,
}

impl<F: Filesystem, S: EventSink> Scaffolder<F, S> {
    pub fn new(fs: F, sink: S) -> Self {
        Self { fs, sink }
    }

    /// Ensure every entry exists, creating only what is missing.
    ///
    /// Existing files are never opened for writing, so re-running over a
    /// populated tree leaves every byte in place. The list is rejected as a
    /// whole, before any filesystem call, if any entry could leave the root.
    pub fn ensure_structure(
        &mut self,
        entries: &[PathEntry],
    ) -> Result<ScaffoldSummary, ScaffoldError> {
        check_entries(entries)?;
        let mut summary = ScaffoldSummary::default();
        for entry in entries {
            self.ensure_entry(entry, &mut summary)?;
        }
        Ok(summary)
    }

    fn ensure_entry(
        &mut self,
        entry: &PathEntry,
        summary: &mut ScaffoldSummary,
    ) -> Result<(), ScaffoldError> {
        if let Some(dir) = entry.dir_target() {
            let event = self.ensure_dir(entry, dir)?;
            self.emit(event, summary);
        }
        if entry.is_file() {
            let event = self.ensure_file(entry)?;
            self.emit(event, summary);
        }
        Ok(())
    }

    fn ensure_dir(&mut self, entry: &PathEntry, dir: &Path) -> Result<ScaffoldEvent, ScaffoldError> {
        match probe(&self.fs, entry, dir)? {
            Some(NodeKind::Dir) => Ok(ScaffoldEvent::DirExists(dir.to_path_buf())),
            Some(_) => Err(ScaffoldError::NotADirectory {
                entry: entry.to_string(),
                path: dir.to_path_buf(),
            }),
            None => {
                self.fs
                    .create_dir_all(dir)
                    .map_err(|err| ScaffoldError::io(entry.as_str(), FsOp::CreateDir, dir, err))?;
                Ok(ScaffoldEvent::DirCreated(dir.to_path_buf()))
            }
        }
    }

    fn ensure_file(&mut self, entry: &PathEntry) -> Result<ScaffoldEvent, ScaffoldError> {
        let path = entry.path();
        if probe(&self.fs, entry, path)?.is_some() {
            return Ok(ScaffoldEvent::FileExists(path.to_path_buf()));
        }
        match self.fs.create_empty_file(path) {
            Ok(()) => Ok(ScaffoldEvent::FileCreated(path.to_path_buf())),
            // Created by someone else since the probe.
            Err(err) if err.kind() == std::io::ErrorKind::AlreadyExists => {
                Ok(ScaffoldEvent::FileExists(path.to_path_buf()))
            }
            Err(err) => Err(ScaffoldError::io(entry.as_str(), FsOp::CreateFile, path, err)),
        }
    }

    fn emit(&mut self, event: ScaffoldEvent, summary: &mut ScaffoldSummary) {
        summary.record(&event);
        self.sink.record(&event);
    }
}

/// Describe what [`Scaffolder::ensure_structure`] would do, without mutating.
///
/// Directories an earlier entry would create count as present for later
/// entries, so the plan matches the events a real run reports.
pub fn plan_structure<F: Filesystem>(
    fs: &F,
    entries: &[PathEntry],
) -> Result<Vec<ScaffoldEvent>, ScaffoldError> {
    check_entries(entries)?;
    let mut planned_dirs: HashSet<PathBuf> = HashSet::new();
    let mut planned_files: HashSet<PathBuf> = HashSet::new();
    let mut actions = Vec::new();

    for entry in entries {
        if let Some(dir) = entry.dir_target() {
            let kind = if planned_dirs.contains(dir) {
                Some(NodeKind::Dir)
            } else if dir
                .ancestors()
                .any(|ancestor| planned_files.contains(ancestor))
            {
                Some(NodeKind::File)
            } else {
                probe(fs, entry, dir)?
            };
            match kind {
                Some(NodeKind::Dir) => actions.push(ScaffoldEvent::DirExists(dir.to_path_buf())),
                Some(_) => {
                    return Err(ScaffoldError::NotADirectory {
                        entry: entry.to_string(),
                        path: dir.to_path_buf(),
                    });
                }
                None => {
                    planned_dirs.extend(
                        dir.ancestors()
                            .filter(|ancestor| !ancestor.as_os_str().is_empty())
                            .map(Path::to_path_buf),
                    );
                    actions.push(ScaffoldEvent::DirCreated(dir.to_path_buf()));
                }
            }
        }

        if entry.is_file() {
            let path = entry.path();
            let present = planned_files.contains(path)
                || planned_dirs.contains(path)
                || probe(fs, entry, path)?.is_some();
            if present {
                actions.push(ScaffoldEvent::FileExists(path.to_path_buf()));
            } else {
                planned_files.insert(path.to_path_buf());
                actions.push(ScaffoldEvent::FileCreated(path.to_path_buf()));
            }
        }
    }
    Ok(actions)
}

fn check_entries(entries: &[PathEntry]) -> Result<(), ScaffoldError> {
    let errors = validate_entries(entries);
    if errors.is_empty() {
        return Ok(());
    }
    Err(ScaffoldError::InvalidEntries(errors))
}

fn probe<F: Filesystem>(
    fs: &F,
    entry: &PathEntry,
    path: &Path,
) -> Result<Option<NodeKind>, ScaffoldError> {
    fs.probe(path)
        .map_err(|err| ScaffoldError::io(entry.as_str(), FsOp::Inspect, path, err))
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::*;
    use crate::core::layout::default_entries;
    use crate::io::fs::LocalFs;
    use crate::test_support::{FsCall, MemoryFs, RecordingSink, TempRoot};

    fn entries(raw: &[&str]) -> Vec<PathEntry> {
        raw.iter().copied().map(PathEntry::from).collect()
    }

    #[test]
    fn creates_all_ancestors_before_the_file() {
        let mut fs = MemoryFs::new();
        let mut sink = RecordingSink::default();
        let summary = Scaffolder::new(&mut fs, &mut sink)
            .ensure_structure(&entries(&["a/b/c/file.txt"]))
            .expect("ensure");

        assert_eq!(fs.kind("a"), Some(NodeKind::Dir));
        assert_eq!(fs.kind("a/b"), Some(NodeKind::Dir));
        assert_eq!(fs.kind("a/b/c"), Some(NodeKind::Dir));
        assert_eq!(fs.kind("a/b/c/file.txt"), Some(NodeKind::File));
        assert_eq!(
            fs.calls(),
            &[
                FsCall::CreateDirAll(PathBuf::from("a/b/c")),
                FsCall::CreateFile(PathBuf::from("a/b/c/file.txt")),
            ]
        );
        assert_eq!(summary.dirs_created, 1);
        assert_eq!(summary.files_created, 1);
    }

    #[test]
    fn suffixless_entry_becomes_a_directory() {
        let mut fs = MemoryFs::new();
        let mut sink = RecordingSink::default();
        Scaffolder::new(&mut fs, &mut sink)
            .ensure_structure(&entries(&["images"]))
            .expect("ensure");

        assert_eq!(fs.kind("images"), Some(NodeKind::Dir));
        assert_eq!(
            sink.events,
            vec![ScaffoldEvent::DirCreated(PathBuf::from("images"))]
        );
    }

    #[test]
    fn file_entry_reports_parent_then_file() {
        let mut fs = MemoryFs::new();
        let mut sink = RecordingSink::default();
        Scaffolder::new(&mut fs, &mut sink)
            .ensure_structure(&entries(&["src/app.py", "src/prepare_vector_db.py"]))
            .expect("ensure");

        assert_eq!(
            sink.messages(),
            vec![
                "Created directory: src",
                "Created empty file: src/app.py",
                "Directory src already exists.",
                "Created empty file: src/prepare_vector_db.py",
            ]
        );
    }

    #[test]
    fn root_level_file_skips_directory_step() {
        let mut fs = MemoryFs::new();
        let mut sink = RecordingSink::default();
        Scaffolder::new(&mut fs, &mut sink)
            .ensure_structure(&entries(&["requirements.txt"]))
            .expect("ensure");

        assert_eq!(
            sink.events,
            vec![ScaffoldEvent::FileCreated(PathBuf::from("requirements.txt"))]
        );
    }

    #[test]
    fn existing_files_are_left_alone_regardless_of_size() {
        let mut fs = MemoryFs::new().with_dir("src").with_file("src/app.py");
        let mut sink = RecordingSink::default();
        let summary = Scaffolder::new(&mut fs, &mut sink)
            .ensure_structure(&entries(&["src/app.py"]))
            .expect("ensure");

        assert!(fs.calls().is_empty());
        assert!(summary.is_noop());
        assert_eq!(
            sink.events,
            vec![
                ScaffoldEvent::DirExists(PathBuf::from("src")),
                ScaffoldEvent::FileExists(PathBuf::from("src/app.py")),
            ]
        );
    }

    #[test]
    fn permission_failure_stops_before_later_entries() {
        let mut fs = MemoryFs::new().deny("locked");
        let mut sink = RecordingSink::default();
        let err = Scaffolder::new(&mut fs, &mut sink)
            .ensure_structure(&entries(&["open/a.txt", "locked/b.txt", "later/c.txt"]))
            .expect_err("should fail");

        assert_eq!(err.entry(), Some("locked/b.txt"));
        assert_eq!(err.io_kind(), Some(io::ErrorKind::PermissionDenied));
        assert_eq!(fs.kind("open/a.txt"), Some(NodeKind::File));
        assert_eq!(fs.kind("later"), None);
        assert!(
            !fs.calls()
                .iter()
                .any(|call| matches!(call, FsCall::CreateDirAll(path) if path == Path::new("later")))
        );
    }

    #[test]
    fn file_blocking_a_directory_is_fatal() {
        let mut fs = MemoryFs::new().with_file("images");
        let mut sink = RecordingSink::default();
        let err = Scaffolder::new(&mut fs, &mut sink)
            .ensure_structure(&entries(&["images", "memory"]))
            .expect_err("should fail");

        assert!(matches!(err, ScaffoldError::NotADirectory { .. }));
        assert_eq!(fs.kind("memory"), None);
        assert!(sink.events.is_empty());
    }

    #[test]
    fn second_run_is_a_noop() {
        let mut fs = MemoryFs::new();
        let layout = default_entries();

        let first = Scaffolder::new(&mut fs, RecordingSink::default())
            .ensure_structure(&layout)
            .expect("first run");
        let calls_after_first = fs.calls().len();
        let snapshot = fs.snapshot();

        let second = Scaffolder::new(&mut fs, RecordingSink::default())
            .ensure_structure(&layout)
            .expect("second run");

        assert!(!first.is_noop());
        assert!(second.is_noop());
        assert_eq!(fs.calls().len(), calls_after_first);
        assert_eq!(fs.snapshot(), snapshot);
    }

    #[test]
    fn local_run_preserves_existing_contents() {
        let temp = TempRoot::new().expect("temp root");
        temp.write("src/app.py", "print('hi')\n").expect("seed");

        let mut sink = RecordingSink::default();
        Scaffolder::new(temp.local_fs(), &mut sink)
            .ensure_structure(&entries(&["src/app.py", "src/utils", "requirements.txt"]))
            .expect("ensure");

        assert_eq!(temp.read("src/app.py").expect("read"), "print('hi')\n");
        assert!(temp.path().join("src/utils").is_dir());
        assert_eq!(temp.read("requirements.txt").expect("read"), "");
    }

    #[test]
    fn plan_matches_events_of_a_real_run() {
        let layout = default_entries();
        let planned = plan_structure(&MemoryFs::new(), &layout).expect("plan");

        let mut fs = MemoryFs::new();
        let mut sink = RecordingSink::default();
        Scaffolder::new(&mut fs, &mut sink)
            .ensure_structure(&layout)
            .expect("ensure");

        assert_eq!(planned, sink.events);
    }

    #[test]
    fn plan_and_run_both_fail_below_a_planned_file() {
        let layout = entries(&["a.txt", "a.txt/sub"]);
        let err = plan_structure(&MemoryFs::new(), &layout).expect_err("plan should fail");
        assert!(matches!(err, ScaffoldError::NotADirectory { ref path, .. } if path == Path::new("a.txt/sub")));

        let mut fs = MemoryFs::new();
        let mut sink = RecordingSink::default();
        let err = Scaffolder::new(&mut fs, &mut sink)
            .ensure_structure(&layout)
            .expect_err("run should fail");
        assert_eq!(err.entry(), Some("a.txt/sub"));
    }

    #[test]
    fn rejects_unsafe_entries_before_touching_the_filesystem() {
        let cases: [&[&str]; 3] = [
            &["ok.txt", "/tmp/escaped.txt"],
            &["ok.txt", "../sibling.txt"],
            &[],
        ];
        for raw in cases {
            let mut fs = MemoryFs::new();
            let mut sink = RecordingSink::default();
            let err = Scaffolder::new(&mut fs, &mut sink)
                .ensure_structure(&entries(raw))
                .expect_err("should reject");
            assert!(matches!(err, ScaffoldError::InvalidEntries(_)), "{raw:?}: {err}");
            assert!(fs.calls().is_empty(), "{raw:?}");
            assert!(sink.events.is_empty(), "{raw:?}");

            let err = plan_structure(&MemoryFs::new(), &entries(raw)).expect_err("plan should reject");
            assert!(matches!(err, ScaffoldError::InvalidEntries(_)), "{raw:?}: {err}");
        }
    }

    #[test]
    fn local_run_never_leaves_the_root() {
        let temp = TempRoot::new().expect("temp root");
        temp.write("project/keep.txt", "").expect("seed");
        let outside = TempRoot::new().expect("outside root");
        let absolute = outside.path().join("escaped.txt");

        let layout = vec![
            PathEntry::new("../sibling.txt"),
            PathEntry::new(absolute.to_string_lossy()),
        ];
        let err = Scaffolder::new(LocalFs::new(temp.path().join("project")), RecordingSink::default())
            .ensure_structure(&layout)
            .expect_err("should reject");

        match err {
            ScaffoldError::InvalidEntries(errors) => assert_eq!(errors.len(), 2, "{errors:?}"),
            other => panic!("unexpected error: {other}"),
        }
        assert!(!temp.path().join("sibling.txt").exists());
        assert!(!absolute.exists());
    }

    #[test]
    fn plan_does_not_mutate() {
        let fs = MemoryFs::new().with_dir("src");
        let planned = plan_structure(&fs, &entries(&["src/app.py"])).expect("plan");
        assert_eq!(
            planned,
            vec![
                ScaffoldEvent::DirExists(PathBuf::from("src")),
                ScaffoldEvent::FileCreated(PathBuf::from("src/app.py")),
            ]
        );
        assert!(fs.calls().is_empty());
        assert_eq!(fs.kind("src/app.py"), None);
    }
}
