//! Filesystem boundary: the `Filesystem` provider trait, its std-backed
//! implementation, and audio-file discovery.

mod fs;
mod scan;

use std::path::{Path, PathBuf};

use crate::config::LibrarySettings;

pub use fs::{Filesystem, StdFilesystem};
pub use scan::is_audio_file;

/// Audio files directly inside `dir`, sorted. An unreadable directory has none.
pub fn audio_files_in(fs: &dyn Filesystem, dir: &Path, settings: &LibrarySettings) -> Vec<PathBuf> {
    fs.list_files(dir)
        .unwrap_or_default()
        .into_iter()
        .filter(|p| is_audio_file(p, settings))
        .collect()
}

/// Audio files anywhere below `root`, sorted by path.
pub fn audio_files_under(
    fs: &dyn Filesystem,
    root: &Path,
    settings: &LibrarySettings,
) -> Vec<PathBuf> {
    fs.walk_files(root)
        .into_iter()
        .filter(|p| is_audio_file(p, settings))
        .collect()
}
