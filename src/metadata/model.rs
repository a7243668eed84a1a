use std::path::PathBuf;

use serde::Serialize;

/// Metadata a track has, or should have.
///
/// Every text field defaults to the empty string; empty means "unknown".
/// Numbers are kept as text so that `"1"`/`"1"` (one of one) stays distinct
/// from `""` (unknown). Zero-padding happens only when building filenames.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TrackMetadata {
    pub title: String,
    pub artist: String,
    pub album: String,
    pub album_artist: String,
    pub genre: String,
    pub year: String,
    pub track: String,
    pub total_tracks: String,
    pub disk: String,
    pub total_disks: String,
    pub source_file: PathBuf,
    /// Set only while a rename is pending.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_file: Option<PathBuf>,
}

/// The text fields of [`TrackMetadata`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    Title,
    Artist,
    Album,
    AlbumArtist,
    Genre,
    Year,
    Track,
    TotalTracks,
    Disk,
    TotalDisks,
}

impl Field {
    pub const ALL: [Field; 10] = [
        Field::Title,
        Field::Artist,
        Field::Album,
        Field::AlbumArtist,
        Field::Genre,
        Field::Year,
        Field::Track,
        Field::TotalTracks,
        Field::Disk,
        Field::TotalDisks,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Field::Title => "title",
            Field::Artist => "artist",
            Field::Album => "album",
            Field::AlbumArtist => "album artist",
            Field::Genre => "genre",
            Field::Year => "year",
            Field::Track => "track",
            Field::TotalTracks => "total tracks",
            Field::Disk => "disk",
            Field::TotalDisks => "total disks",
        }
    }
}

impl TrackMetadata {
    pub fn new(source_file: impl Into<PathBuf>) -> Self {
        Self {
            source_file: source_file.into(),
            ..Self::default()
        }
    }

    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Title => &self.title,
            Field::Artist => &self.artist,
            Field::Album => &self.album,
            Field::AlbumArtist => &self.album_artist,
            Field::Genre => &self.genre,
            Field::Year => &self.year,
            Field::Track => &self.track,
            Field::TotalTracks => &self.total_tracks,
            Field::Disk => &self.disk,
            Field::TotalDisks => &self.total_disks,
        }
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let slot = match field {
            Field::Title => &mut self.title,
            Field::Artist => &mut self.artist,
            Field::Album => &mut self.album,
            Field::AlbumArtist => &mut self.album_artist,
            Field::Genre => &mut self.genre,
            Field::Year => &mut self.year,
            Field::Track => &mut self.track,
            Field::TotalTracks => &mut self.total_tracks,
            Field::Disk => &mut self.disk,
            Field::TotalDisks => &mut self.total_disks,
        };
        *slot = value.into();
    }

    /// Keep every non-empty field of `self`, take the rest from `fallback`.
    pub fn or_fill(mut self, fallback: &TrackMetadata) -> TrackMetadata {
        for field in Field::ALL {
            if self.get(field).trim().is_empty() {
                self.set(field, fallback.get(field));
            }
        }
        self
    }
}

/// Where an extracted value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Provenance {
    /// Matched from the file's own name.
    FromFilename,
    /// Parsed from an ancestor directory name.
    FromDirectory,
    /// Taken from the tag already stored in the file.
    FromExistingTag,
    /// Agreed on by sibling files.
    FromConsensus,
    /// A rule-based default (whole stem as title, `1/1` disk, single-track album).
    Defaulted,
    /// Nothing produced a value.
    Unresolved,
    /// Supplied through the interactive resolver.
    UserSupplied,
}

impl Provenance {
    pub fn label(self) -> &'static str {
        match self {
            Provenance::FromFilename => "filename",
            Provenance::FromDirectory => "directory",
            Provenance::FromExistingTag => "tag",
            Provenance::FromConsensus => "consensus",
            Provenance::Defaulted => "default",
            Provenance::Unresolved => "unresolved",
            Provenance::UserSupplied => "user",
        }
    }
}
