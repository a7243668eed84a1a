//! Tag storage provider.
//!
//! The engine never encodes tag containers itself; it reads the fields it
//! needs through [`TagStore`] and hands back filled-in metadata to write.
//! [`LoftyTags`] is the implementation used by the binary.

mod read;
mod util;
mod write;

use std::path::Path;

use crate::error::Result;
use crate::metadata::TrackMetadata;

/// What a file's tag currently holds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoredTags {
    pub metadata: TrackMetadata,
    /// Number of embedded pictures.
    pub pictures: usize,
}

pub trait TagStore: Send + Sync {
    /// `None` when the file has no readable tag.
    fn read_tags(&self, path: &Path) -> Option<StoredTags>;
    /// Write every non-empty field of `metadata`.
    fn write_tags(&self, path: &Path, metadata: &TrackMetadata) -> Result<()>;
}

/// [`TagStore`] over lofty's format-agnostic tag model.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoftyTags;

impl TagStore for LoftyTags {
    fn read_tags(&self, path: &Path) -> Option<StoredTags> {
        read::read_stored_tags(path)
    }

    fn write_tags(&self, path: &Path, metadata: &TrackMetadata) -> Result<()> {
        write::write_metadata(path, metadata)
    }
}

/// Merge inferred values into existing tags without overwriting anything.
pub fn fill_missing(existing: &TrackMetadata, inferred: &TrackMetadata) -> TrackMetadata {
    existing.clone().or_fill(inferred)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn fill_missing_never_overwrites_existing_values() {
        let existing = TrackMetadata {
            title: "Tagged Title".into(),
            genre: String::new(),
            source_file: PathBuf::from("/m/a.mp3"),
            ..TrackMetadata::default()
        };
        let inferred = TrackMetadata {
            title: "Path Title".into(),
            genre: "House".into(),
            track: "3".into(),
            ..TrackMetadata::default()
        };
        let filled = fill_missing(&existing, &inferred);
        assert_eq!(filled.title, "Tagged Title");
        assert_eq!(filled.genre, "House");
        assert_eq!(filled.track, "3");
        assert_eq!(filled.source_file, PathBuf::from("/m/a.mp3"));
    }

    #[test]
    fn unreadable_file_has_no_tags() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fake.mp3");
        std::fs::write(&path, b"not really audio").unwrap();
        assert!(LoftyTags.read_tags(&path).is_none());
        assert!(LoftyTags.write_tags(&path, &TrackMetadata::default()).is_err());
    }
}
