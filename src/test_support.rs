//! Fixtures shared by unit tests.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::{Error, Result};
use crate::metadata::TrackMetadata;
use crate::tags::{StoredTags, TagStore};

/// In-memory tag store keyed by path.
#[derive(Default)]
pub struct MemoryTags {
    entries: Mutex<HashMap<PathBuf, StoredTags>>,
}

impl MemoryTags {
    pub fn insert(&self, path: &Path, metadata: TrackMetadata, pictures: usize) {
        let metadata = TrackMetadata {
            source_file: path.to_path_buf(),
            ..metadata
        };
        self.entries
            .lock()
            .unwrap()
            .insert(path.to_path_buf(), StoredTags { metadata, pictures });
    }

    pub fn with_genre(&self, path: &Path, genre: &str) {
        self.insert(
            path,
            TrackMetadata {
                genre: genre.to_string(),
                ..TrackMetadata::default()
            },
            0,
        );
    }

    pub fn get(&self, path: &Path) -> Option<StoredTags> {
        self.entries.lock().unwrap().get(path).cloned()
    }
}

impl TagStore for MemoryTags {
    fn read_tags(&self, path: &Path) -> Option<StoredTags> {
        self.get(path)
    }

    fn write_tags(&self, path: &Path, metadata: &TrackMetadata) -> Result<()> {
        let mut entries = self.entries.lock().unwrap();
        let Some(entry) = entries.get_mut(path) else {
            return Err(Error::Tags {
                path: path.to_path_buf(),
                message: "no such file".to_string(),
            });
        };
        entry.metadata = metadata.clone();
        Ok(())
    }
}

/// Create `rel` (and its parents) under `root` as a small dummy file.
pub fn touch(root: &Path, rel: &str) -> PathBuf {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, b"not really audio").unwrap();
    path
}

/// Fully tagged metadata for a track at `path`.
pub fn full_tags(path: &Path, title: &str, track: &str) -> TrackMetadata {
    TrackMetadata {
        title: title.to_string(),
        artist: "Artist".to_string(),
        album: "Album".to_string(),
        album_artist: "Artist".to_string(),
        genre: "Techno".to_string(),
        year: "2019".to_string(),
        track: track.to_string(),
        total_tracks: "2".to_string(),
        disk: "1".to_string(),
        total_disks: "1".to_string(),
        source_file: path.to_path_buf(),
        target_file: None,
    }
}
