//! Per-field inference from a file's path, its stored tag and its siblings.
//!
//! Each field has an ordered list of [`Tier`]s; the first tier that yields a
//! non-empty value wins and its [`Provenance`] is recorded. The lists differ
//! per layout, the tiers themselves are plain functions over an
//! [`ExtractContext`] so each can be tested alone.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::debug;

use super::consensus;
use super::model::{Field, Provenance, TrackMetadata};
use crate::config::LibrarySettings;
use crate::error::{Error, Result};
use crate::grammar::{self, AlbumDirName};
use crate::layout::{self, Classification, DiscLocation, LibraryLayout, dir_name};
use crate::library::{self, Filesystem};
use crate::tags::TagStore;

/// Everything a tier may look at.
pub struct ExtractContext<'a> {
    pub path: &'a Path,
    pub classification: &'a Classification,
    /// Values already stored in the file's tag.
    pub known: Option<&'a TrackMetadata>,
    pub disc: Option<DiscLocation>,
    /// Audio files in the directory holding the file (the disc folder if any).
    pub track_dir_audio: usize,
    extractor: Option<&'a Extractor<'a>>,
}

impl<'a> ExtractContext<'a> {
    /// A context with no filesystem behind it: counts are zero, no consensus.
    #[cfg(test)]
    pub fn detached(
        path: &'a Path,
        classification: &'a Classification,
        known: Option<&'a TrackMetadata>,
    ) -> Self {
        Self {
            path,
            classification,
            known,
            disc: None,
            track_dir_audio: 0,
            extractor: None,
        }
    }

    fn stem(&self) -> &str {
        self.path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("")
            .trim()
    }

    fn layout(&self) -> LibraryLayout {
        self.classification.layout
    }

    fn album_dir_name(&self) -> AlbumDirName {
        let name = dir_name(&self.classification.album_dir);
        grammar::album_dir_name(name, self.layout().album_dir_has_artist())
    }

    fn known(&self, field: Field) -> Option<String> {
        self.known.map(|k| k.get(field).trim().to_string())
    }
}

/// One step in a field's fallback chain.
#[derive(Clone, Copy)]
pub struct Tier {
    pub source: Provenance,
    pub resolve: fn(&ExtractContext<'_>) -> Option<String>,
}

const fn tier(source: Provenance, resolve: fn(&ExtractContext<'_>) -> Option<String>) -> Tier {
    Tier { source, resolve }
}

fn non_empty(s: impl Into<String>) -> Option<String> {
    let s = s.into();
    let t = s.trim();
    if t.is_empty() { None } else { Some(t.to_string()) }
}

fn number(s: &str) -> Option<String> {
    s.trim().parse::<u32>().ok().map(|n| n.to_string())
}

// --- title -------------------------------------------------------------------

pub fn title_from_track_artist_title(cx: &ExtractContext<'_>) -> Option<String> {
    grammar::track_artist_title(cx.stem()).and_then(|m| non_empty(m.title))
}

pub fn title_from_track_title(cx: &ExtractContext<'_>) -> Option<String> {
    grammar::track_title(cx.stem()).and_then(|m| non_empty(m.title))
}

pub fn title_from_tag(cx: &ExtractContext<'_>) -> Option<String> {
    cx.known(Field::Title).and_then(non_empty)
}

pub fn title_from_stem(cx: &ExtractContext<'_>) -> Option<String> {
    non_empty(cx.stem())
}

// --- artist ------------------------------------------------------------------

pub fn artist_from_tag(cx: &ExtractContext<'_>) -> Option<String> {
    cx.known(Field::Artist).and_then(non_empty)
}

pub fn artist_from_filename(cx: &ExtractContext<'_>) -> Option<String> {
    grammar::track_artist_title(cx.stem()).and_then(|m| non_empty(m.artist))
}

pub fn artist_from_album_dir(cx: &ExtractContext<'_>) -> Option<String> {
    if cx.layout().album_dir_has_artist() {
        return non_empty(cx.album_dir_name().artist);
    }
    grammar::year_artist_album(dir_name(&cx.classification.album_dir))
        .and_then(|m| non_empty(m.artist))
}

pub fn artist_from_ancestors(cx: &ExtractContext<'_>) -> Option<String> {
    cx.classification
        .album_dir
        .ancestors()
        .skip(1)
        .find_map(|dir| grammar::year_artist_album(dir_name(dir)).and_then(|m| non_empty(m.artist)))
}

pub fn artist_from_album_artist(cx: &ExtractContext<'_>) -> Option<String> {
    album_artist_from_dirs(cx)
}

// --- album -------------------------------------------------------------------

pub fn album_from_album_dir(cx: &ExtractContext<'_>) -> Option<String> {
    non_empty(cx.album_dir_name().album)
}

pub fn album_from_genre_dir(cx: &ExtractContext<'_>) -> Option<String> {
    genre_from_genre_dir(cx)
}

// --- album artist / year -----------------------------------------------------

pub fn album_artist_from_dirs(cx: &ExtractContext<'_>) -> Option<String> {
    cx.classification
        .album_artist_dir()
        .and_then(|d| non_empty(dir_name(d)))
}

pub fn year_from_album_dir(cx: &ExtractContext<'_>) -> Option<String> {
    non_empty(cx.album_dir_name().year)
}

// --- track / disk ------------------------------------------------------------

pub fn track_from_filename(cx: &ExtractContext<'_>) -> Option<String> {
    if cx.layout() == LibraryLayout::LabelCompilation {
        if let Some(m) = grammar::track_artist_title(cx.stem()) {
            return number(m.track);
        }
    }
    grammar::track_title(cx.stem()).and_then(|m| number(m.track))
}

pub fn track_for_lone_file(cx: &ExtractContext<'_>) -> Option<String> {
    (cx.track_dir_audio == 1).then(|| "1".to_string())
}

pub fn track_from_tag(cx: &ExtractContext<'_>) -> Option<String> {
    cx.known(Field::Track).and_then(|t| number(&t))
}

pub fn total_tracks_from_dir(cx: &ExtractContext<'_>) -> Option<String> {
    (cx.track_dir_audio > 0).then(|| cx.track_dir_audio.to_string())
}

pub fn disk_from_segment(cx: &ExtractContext<'_>) -> Option<String> {
    cx.disc
        .map(|d| d.disc_number)
        .or_else(|| cx.classification.disc.as_ref().map(|d| d.number))
        .map(|n| n.to_string())
}

pub fn total_disks_from_siblings(cx: &ExtractContext<'_>) -> Option<String> {
    cx.disc.map(|d| d.total_discs.to_string())
}

pub fn single_disk(cx: &ExtractContext<'_>) -> Option<String> {
    cx.classification.disc.is_none().then(|| "1".to_string())
}

// --- genre -------------------------------------------------------------------

pub fn genre_from_genre_dir(cx: &ExtractContext<'_>) -> Option<String> {
    if cx.layout() != LibraryLayout::LabelSingle {
        return None;
    }
    cx.classification
        .album_dir
        .parent()
        .and_then(|d| non_empty(dir_name(d)))
}

pub fn genre_from_tag(cx: &ExtractContext<'_>) -> Option<String> {
    cx.known(Field::Genre).and_then(non_empty)
}

pub fn genre_from_consensus(cx: &ExtractContext<'_>) -> Option<String> {
    let extractor = cx.extractor?;
    let dir = cx.classification.album_artist_dir()?;
    non_empty(extractor.consensus_genre(dir))
}

/// The fallback chain for `field` under `layout`, highest precedence first.
pub fn tiers(field: Field, layout: LibraryLayout) -> Vec<Tier> {
    use Provenance::*;
    let compilation = layout == LibraryLayout::LabelCompilation;
    match field {
        Field::Title => {
            let mut t = Vec::with_capacity(4);
            if compilation {
                t.push(tier(FromFilename, title_from_track_artist_title));
            }
            t.push(tier(FromFilename, title_from_track_title));
            t.push(tier(FromExistingTag, title_from_tag));
            t.push(tier(Defaulted, title_from_stem));
            t
        }
        Field::Artist => {
            let mut t = vec![tier(FromExistingTag, artist_from_tag)];
            if compilation {
                t.push(tier(FromFilename, artist_from_filename));
            }
            t.push(tier(FromDirectory, artist_from_album_dir));
            t.push(tier(FromDirectory, artist_from_ancestors));
            t.push(tier(FromDirectory, artist_from_album_artist));
            t
        }
        Field::Album => {
            let mut t = vec![tier(FromDirectory, album_from_album_dir)];
            if layout == LibraryLayout::LabelSingle {
                t.push(tier(FromDirectory, album_from_genre_dir));
            }
            t
        }
        Field::AlbumArtist => vec![tier(FromDirectory, album_artist_from_dirs)],
        Field::Year => vec![tier(FromDirectory, year_from_album_dir)],
        Field::Track => vec![
            tier(FromFilename, track_from_filename),
            tier(Defaulted, track_for_lone_file),
            tier(FromExistingTag, track_from_tag),
        ],
        Field::TotalTracks => vec![tier(FromDirectory, total_tracks_from_dir)],
        Field::Disk => vec![
            tier(FromDirectory, disk_from_segment),
            tier(Defaulted, single_disk),
        ],
        Field::TotalDisks => vec![
            tier(FromDirectory, total_disks_from_siblings),
            tier(Defaulted, single_disk),
        ],
        Field::Genre => {
            let mut t = Vec::with_capacity(3);
            if layout == LibraryLayout::LabelSingle {
                t.push(tier(FromDirectory, genre_from_genre_dir));
            }
            t.push(tier(FromExistingTag, genre_from_tag));
            t.push(tier(FromConsensus, genre_from_consensus));
            t
        }
    }
}

/// Run `field`'s chain; `("", Unresolved)` when every tier comes up empty.
pub fn resolve_field(field: Field, cx: &ExtractContext<'_>) -> (String, Provenance) {
    tiers(field, cx.layout())
        .into_iter()
        .find_map(|t| (t.resolve)(cx).map(|v| (v, t.source)))
        .unwrap_or((String::new(), Provenance::Unresolved))
}

/// Best-effort metadata for one file, with the source of every field.
#[derive(Debug, Clone)]
pub struct Extraction {
    pub metadata: TrackMetadata,
    pub classification: Classification,
    pub disc: Option<DiscLocation>,
    pub provenance: BTreeMap<Field, Provenance>,
}

impl Extraction {
    pub fn from_context(cx: &ExtractContext<'_>) -> Self {
        let mut metadata = TrackMetadata::new(cx.path);
        let mut provenance = BTreeMap::new();
        for field in Field::ALL {
            let (value, source) = resolve_field(field, cx);
            metadata.set(field, value);
            provenance.insert(field, source);
        }
        Extraction {
            metadata,
            classification: cx.classification.clone(),
            disc: cx.disc,
            provenance,
        }
    }

    pub fn provenance(&self, field: Field) -> Provenance {
        self.provenance
            .get(&field)
            .copied()
            .unwrap_or(Provenance::Unresolved)
    }

    /// Required fields no automatic tier could settle.
    pub fn missing_required(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if matches!(
            self.provenance(Field::Title),
            Provenance::Defaulted | Provenance::Unresolved
        ) {
            missing.push(Field::Title.name());
        }
        if self.provenance(Field::Track) == Provenance::Unresolved {
            missing.push(Field::Track.name());
        }
        missing
    }

    pub fn is_ambiguous(&self) -> bool {
        !self.missing_required().is_empty()
    }

    /// `Err(AmbiguousMetadata)` when title or track needs a human.
    pub fn require_resolved(self) -> Result<Self> {
        let missing = self.missing_required();
        if missing.is_empty() {
            Ok(self)
        } else {
            Err(Error::AmbiguousMetadata {
                path: self.metadata.source_file.clone(),
                missing,
            })
        }
    }

    /// Record a value typed in by the user.
    pub fn supply(&mut self, field: Field, value: &str) {
        self.metadata.set(field, value.trim());
        self.provenance.insert(field, Provenance::UserSupplied);
    }
}

/// Runs the tier chains against real files.
pub struct Extractor<'a> {
    fs: &'a dyn Filesystem,
    tags: &'a dyn TagStore,
    settings: &'a LibrarySettings,
    genre_cache: Mutex<HashMap<PathBuf, String>>,
}

impl<'a> Extractor<'a> {
    pub fn new(fs: &'a dyn Filesystem, tags: &'a dyn TagStore, settings: &'a LibrarySettings) -> Self {
        Self {
            fs,
            tags,
            settings,
            genre_cache: Mutex::new(HashMap::new()),
        }
    }

    pub fn tag_store(&self) -> &'a dyn TagStore {
        self.tags
    }

    /// Extract using whatever tag the file already carries.
    pub fn extract(&self, path: &Path) -> Extraction {
        let stored = self.tags.read_tags(path);
        self.extract_with(path, stored.as_ref().map(|s| &s.metadata))
    }

    pub fn extract_with(&self, path: &Path, known: Option<&TrackMetadata>) -> Extraction {
        let classification = layout::classify(path);
        let disc = classification.disc_location(self.fs);
        let track_dir_audio =
            library::audio_files_in(self.fs, classification.track_dir(), self.settings).len();
        let cx = ExtractContext {
            path,
            classification: &classification,
            known,
            disc,
            track_dir_audio,
            extractor: Some(self),
        };
        let extraction = Extraction::from_context(&cx);
        debug!(
            target: "extract",
            path = %path.display(),
            layout = classification.layout.name(),
            ambiguous = extraction.is_ambiguous(),
            "extracted"
        );
        extraction
    }

    /// Majority genre under an album-artist directory, computed once per directory.
    pub fn consensus_genre(&self, album_artist_dir: &Path) -> String {
        if let Ok(cache) = self.genre_cache.lock() {
            if let Some(g) = cache.get(album_artist_dir) {
                return g.clone();
            }
        }
        let siblings = consensus::genre_siblings(self.fs, album_artist_dir, self.settings);
        let genre = consensus::common_genre(&siblings, self.tags);
        if let Ok(mut cache) = self.genre_cache.lock() {
            cache.insert(album_artist_dir.to_path_buf(), genre.clone());
        }
        genre
    }
}
