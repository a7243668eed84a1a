//! Canonical placement of whole albums.
//!
//! Files are grouped by album directory (disc folders fold into their
//! album) and placed from tag-first metadata: what the tag says wins,
//! the path-derived extraction fills the gaps.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::config::LibrarySettings;
use crate::error::BuildError;
use crate::layout::{self, Classification};
use crate::library::{self, Filesystem};
use crate::metadata::{Extractor, TrackMetadata, common_artist};
use crate::paths::{self, BuildContext};
use crate::rename::RenamePair;
use crate::tags::StoredTags;

/// Audio files under `root`, keyed by album directory.
pub fn group_albums(
    fs: &dyn Filesystem,
    root: &Path,
    settings: &LibrarySettings,
) -> BTreeMap<PathBuf, Vec<PathBuf>> {
    let mut albums: BTreeMap<PathBuf, Vec<PathBuf>> = BTreeMap::new();
    for file in library::audio_files_under(fs, root, settings) {
        let album = layout::classify(&file).album_dir;
        albums.entry(album).or_default().push(file);
    }
    albums
}

/// Where one file should be.
#[derive(Debug, Clone)]
pub struct Placement {
    pub source: PathBuf,
    pub classification: Classification,
    pub stored: Option<StoredTags>,
    pub target: Result<PathBuf, BuildError>,
}

impl Placement {
    /// `Some(pair)` when the file has a target different from where it is.
    pub fn rename_pair(&self) -> Option<RenamePair> {
        let target = self.target.as_ref().ok()?;
        paths::needs_change(&self.source, target)
            .then(|| RenamePair::new(self.source.clone(), target.clone()))
    }
}

/// Place every file of one album.
pub fn place_album(extractor: &Extractor<'_>, files: &[PathBuf]) -> Vec<Placement> {
    let resolved: Vec<(PathBuf, Classification, TrackMetadata, Option<StoredTags>)> = files
        .iter()
        .map(|file| {
            let stored = extractor.tag_store().read_tags(file);
            let extraction = extractor.extract_with(file, stored.as_ref().map(|s| &s.metadata));
            let metadata = match &stored {
                Some(s) => s.metadata.clone().or_fill(&extraction.metadata),
                None => extraction.metadata.clone(),
            };
            let metadata = TrackMetadata {
                source_file: file.clone(),
                ..metadata
            };
            (file.clone(), extraction.classification, metadata, stored)
        })
        .collect();

    let artists: Vec<&str> = resolved.iter().map(|(_, _, m, _)| m.artist.as_str()).collect();
    let shared = common_artist(&artists);

    resolved
        .into_iter()
        .map(|(source, classification, metadata, stored)| {
            let target = target_for(&metadata, &classification, &shared);
            Placement {
                source,
                classification,
                stored,
                target,
            }
        })
        .collect()
}

fn target_for(
    metadata: &TrackMetadata,
    classification: &Classification,
    shared_artist: &str,
) -> Result<PathBuf, BuildError> {
    let root = classification
        .library_root()
        .filter(|r| !r.as_os_str().is_empty())
        .ok_or(BuildError::MissingSegment("library root"))?;
    let cx = BuildContext::new(root)
        .with_disc(paths::disc_folder(metadata, classification))
        .with_common_artist(shared_artist);
    paths::build(metadata, classification.layout, &cx)
}
