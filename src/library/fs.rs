use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::config::LibrarySettings;

use super::scan::{is_hidden, walk_dirs, walk_files};

/// The filesystem calls the engine makes. Everything that touches disk goes
/// through here so the pure parts can be exercised against fixtures.
pub trait Filesystem: Send + Sync {
    /// Files (not directories) directly inside `dir`, sorted by name.
    fn list_files(&self, dir: &Path) -> io::Result<Vec<PathBuf>>;
    /// Subdirectories directly inside `dir`, sorted by name.
    fn list_dirs(&self, dir: &Path) -> io::Result<Vec<PathBuf>>;
    /// Every file below `root`, sorted by path. Unreadable entries are skipped.
    fn walk_files(&self, root: &Path) -> Vec<PathBuf>;
    /// Every directory below `root`, `root` included, regardless of the
    /// hidden-file policy.
    fn walk_dirs(&self, root: &Path) -> Vec<PathBuf>;
    fn rename_entry(&self, from: &Path, to: &Path) -> io::Result<()>;
    fn exists(&self, path: &Path) -> bool;
    /// Whether both paths name the same existing entry, as two spellings
    /// on a case-insensitive volume do.
    fn same_entry(&self, a: &Path, b: &Path) -> bool;
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;
    /// Create a zero-byte marker file.
    fn create_marker(&self, path: &Path) -> io::Result<()>;
    /// Remove a marker file; a missing marker is not an error.
    fn delete_marker(&self, path: &Path) -> io::Result<()>;
}

/// `Filesystem` over `std::fs` and walkdir.
#[derive(Debug, Clone)]
pub struct StdFilesystem {
    follow_links: bool,
    include_hidden: bool,
}

impl StdFilesystem {
    pub fn new(settings: &LibrarySettings) -> Self {
        Self {
            follow_links: settings.follow_links,
            include_hidden: settings.include_hidden,
        }
    }

    fn list(&self, dir: &Path, want_dirs: bool) -> io::Result<Vec<PathBuf>> {
        let mut out = Vec::new();
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if !self.include_hidden && is_hidden(&path) {
                continue;
            }
            let is_dir = if self.follow_links {
                path.is_dir()
            } else {
                fs::symlink_metadata(&path)
                    .map(|m| m.is_dir())
                    .unwrap_or(false)
            };
            if is_dir == want_dirs {
                out.push(path);
            }
        }
        out.sort();
        Ok(out)
    }
}

impl Default for StdFilesystem {
    fn default() -> Self {
        Self::new(&LibrarySettings::default())
    }
}

impl Filesystem for StdFilesystem {
    fn list_files(&self, dir: &Path) -> io::Result<Vec<PathBuf>> {
        self.list(dir, false)
    }

    fn list_dirs(&self, dir: &Path) -> io::Result<Vec<PathBuf>> {
        self.list(dir, true)
    }

    fn walk_files(&self, root: &Path) -> Vec<PathBuf> {
        walk_files(root, self.follow_links, self.include_hidden)
    }

    fn walk_dirs(&self, root: &Path) -> Vec<PathBuf> {
        walk_dirs(root, self.follow_links)
    }

    fn rename_entry(&self, from: &Path, to: &Path) -> io::Result<()> {
        fs::rename(from, to)
    }

    fn exists(&self, path: &Path) -> bool {
        // A dangling symlink still occupies the name.
        fs::symlink_metadata(path).is_ok()
    }

    #[cfg(unix)]
    fn same_entry(&self, a: &Path, b: &Path) -> bool {
        use std::os::unix::fs::MetadataExt;
        match (fs::symlink_metadata(a), fs::symlink_metadata(b)) {
            (Ok(a), Ok(b)) => a.dev() == b.dev() && a.ino() == b.ino(),
            _ => false,
        }
    }

    #[cfg(not(unix))]
    fn same_entry(&self, a: &Path, b: &Path) -> bool {
        match (fs::canonicalize(a), fs::canonicalize(b)) {
            (Ok(a), Ok(b)) => a == b,
            _ => false,
        }
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        fs::create_dir_all(path)
    }

    fn create_marker(&self, path: &Path) -> io::Result<()> {
        fs::File::create(path).map(|_| ())
    }

    fn delete_marker(&self, path: &Path) -> io::Result<()> {
        match fs::remove_file(path) {
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            other => other,
        }
    }
}
