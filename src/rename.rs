//! Batch renames.
//!
//! Directories move before files, in input order, and every item succeeds
//! or fails on its own: a conflict or an I/O error is recorded and the
//! batch carries on. An existing target is never overwritten.
//!
//! Mutations inside one target directory are serialized through a
//! process-wide lock table, so concurrent batches can share a library.

mod locks;
mod plan;

use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::error::Error;
use crate::library::Filesystem;

use locks::with_dir_lock;
use plan::rebase;

pub use plan::{RenamePair, RenamePlan, plan_renames};

#[derive(Debug)]
pub enum RenameOutcome {
    Renamed,
    /// Source and target were already the same.
    Unchanged,
    /// The file reached its target when its directory was moved.
    MovedWithDirectory,
    /// A directory move that was not attempted; its files move one by one.
    Skipped(&'static str),
    Failed(Error),
}

impl RenameOutcome {
    pub fn error(&self) -> Option<&Error> {
        match self {
            RenameOutcome::Failed(e) => Some(e),
            _ => None,
        }
    }
}

#[derive(Debug)]
pub struct RenameResult {
    pub from: PathBuf,
    pub to: PathBuf,
    pub outcome: RenameOutcome,
}

#[derive(Debug, Default)]
pub struct RenameReport {
    pub directories: Vec<RenameResult>,
    pub files: Vec<RenameResult>,
}

impl RenameReport {
    pub fn errors(&self) -> impl Iterator<Item = &Error> {
        self.directories
            .iter()
            .chain(&self.files)
            .filter_map(|r| r.outcome.error())
    }

    /// Files now at their target that were not there before.
    pub fn moved_files(&self) -> usize {
        self.files
            .iter()
            .filter(|r| {
                matches!(
                    r.outcome,
                    RenameOutcome::Renamed | RenameOutcome::MovedWithDirectory
                )
            })
            .count()
    }

    pub fn is_clean(&self) -> bool {
        self.errors().next().is_none()
    }
}

pub struct Renamer<'a> {
    fs: &'a dyn Filesystem,
    deadline: Option<Instant>,
}

impl<'a> Renamer<'a> {
    pub fn new(fs: &'a dyn Filesystem) -> Self {
        Self { fs, deadline: None }
    }

    /// Items not started by `deadline` are reported as abandoned.
    pub fn with_deadline(mut self, deadline: Option<Instant>) -> Self {
        self.deadline = deadline;
        self
    }

    /// Plan and run `pairs`.
    pub fn execute(&self, pairs: &[RenamePair]) -> RenameReport {
        self.apply(&plan_renames(pairs))
    }

    pub fn apply(&self, plan: &RenamePlan) -> RenameReport {
        let mut report = RenameReport::default();
        // Directory moves already done, used to re-base later sources.
        let mut moved: Vec<(PathBuf, PathBuf)> = Vec::new();

        for dir in &plan.directories {
            let from = current_location(&dir.from, &moved);
            let outcome = self.move_directory(&from, &dir.to);
            if matches!(outcome, RenameOutcome::Renamed) {
                moved.push((from.clone(), dir.to.clone()));
            }
            report.directories.push(RenameResult {
                from,
                to: dir.to.clone(),
                outcome,
            });
        }

        for file in &plan.files {
            let from = current_location(&file.from, &moved);
            let outcome = if file.is_noop() {
                RenameOutcome::Unchanged
            } else if from == file.to {
                RenameOutcome::MovedWithDirectory
            } else {
                self.move_file(&from, &file.to)
            };
            report.files.push(RenameResult {
                from: file.from.clone(),
                to: file.to.clone(),
                outcome,
            });
        }
        report
    }

    fn expired(&self) -> bool {
        self.deadline.is_some_and(|d| Instant::now() >= d)
    }

    fn move_directory(&self, from: &Path, to: &Path) -> RenameOutcome {
        if self.expired() {
            return RenameOutcome::Failed(Error::Abandoned {
                path: from.to_path_buf(),
            });
        }
        if !self.fs.exists(from) {
            return RenameOutcome::Skipped("source directory is gone");
        }
        let parent = to.parent().unwrap_or(Path::new(""));
        with_dir_lock(parent, || {
            if self.fs.exists(to) && !self.is_case_alias(from, to) {
                debug!(target: "rename", from = %from.display(), to = %to.display(), "target directory exists, moving files instead");
                return RenameOutcome::Skipped("target directory exists");
            }
            match self.rename(from, to) {
                Ok(()) => RenameOutcome::Renamed,
                Err(e) => RenameOutcome::Failed(e),
            }
        })
    }

    fn move_file(&self, from: &Path, to: &Path) -> RenameOutcome {
        if self.expired() {
            return RenameOutcome::Failed(Error::Abandoned {
                path: from.to_path_buf(),
            });
        }
        let parent = to.parent().unwrap_or(Path::new(""));
        with_dir_lock(parent, || {
            if self.fs.exists(to) && !self.is_case_alias(from, to) {
                warn!(target: "rename", from = %from.display(), to = %to.display(), "target exists");
                return RenameOutcome::Failed(Error::RenameConflict {
                    from: from.to_path_buf(),
                    to: to.to_path_buf(),
                });
            }
            match self.rename(from, to) {
                Ok(()) => RenameOutcome::Renamed,
                Err(e) => RenameOutcome::Failed(e),
            }
        })
    }

    /// `to` differs from `from` only in letter case and names the same entry.
    fn is_case_alias(&self, from: &Path, to: &Path) -> bool {
        from != to
            && from.to_string_lossy().to_lowercase() == to.to_string_lossy().to_lowercase()
            && self.fs.same_entry(from, to)
    }

    fn rename(&self, from: &Path, to: &Path) -> crate::error::Result<()> {
        if let Some(parent) = to.parent() {
            self.fs
                .create_dir_all(parent)
                .map_err(|e| Error::fs(parent, e))?;
        }
        self.fs.rename_entry(from, to).map_err(|e| Error::fs(from, e))?;
        info!(target: "rename", from = %from.display(), to = %to.display(), "renamed");
        Ok(())
    }
}

/// Where `path` is now, after the directory moves in `moved`.
fn current_location(path: &Path, moved: &[(PathBuf, PathBuf)]) -> PathBuf {
    moved
        .iter()
        .fold(path.to_path_buf(), |p, (from, to)| rebase(&p, from, to).unwrap_or(p))
}
