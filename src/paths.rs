//! Canonical paths.
//!
//! [`build`] turns metadata plus a layout into the one path a track should
//! live at. Empty fields are left out of their segment instead of being
//! rendered as placeholders, and every segment is sanitized so the result
//! is a valid path on common filesystems.

mod sanitize;

use std::path::{Path, PathBuf};

use crate::error::BuildError;
use crate::grammar::{self, LabelSegment};
use crate::layout::{Classification, LibraryLayout};
use crate::metadata::TrackMetadata;

pub use sanitize::sanitize_segment;

/// Where and how to place the track.
#[derive(Debug, Clone, Copy)]
pub struct BuildContext<'a> {
    /// Directory containing the album-artist (or label) directory.
    pub root: &'a Path,
    /// Disc folder to insert before the filename.
    pub disc: Option<u32>,
    /// Artist for `[Year] Artist - Album` directories; the track artist
    /// when unset.
    pub common_artist: Option<&'a str>,
}

impl<'a> BuildContext<'a> {
    pub fn new(root: &'a Path) -> Self {
        Self {
            root,
            disc: None,
            common_artist: None,
        }
    }

    pub fn with_disc(mut self, disc: Option<u32>) -> Self {
        self.disc = disc;
        self
    }

    pub fn with_common_artist(mut self, artist: &'a str) -> Self {
        self.common_artist = (!artist.trim().is_empty()).then_some(artist);
        self
    }
}

/// Canonical path for `meta` under `layout`.
///
/// # Panics
///
/// If `cx.root` is empty. Callers always hold a library root; an empty one
/// is a programming error, not a data problem.
pub fn build(
    meta: &TrackMetadata,
    layout: LibraryLayout,
    cx: &BuildContext<'_>,
) -> Result<PathBuf, BuildError> {
    assert!(
        !cx.root.as_os_str().is_empty(),
        "canonical paths need a library root"
    );

    let mut path = cx.root.to_path_buf();
    path.push(required("album artist", &meta.album_artist)?);

    match layout.label_segment() {
        None => {
            path.push(required("album", &year_prefixed(&meta.year, &meta.album))?);
        }
        Some(segment) => {
            path.push(segment.dir_name());
            if segment == LabelSegment::Singles {
                path.push(required("genre", &meta.genre)?);
            }
            let album = if layout.album_dir_has_artist() {
                let artist = cx.common_artist.unwrap_or(&meta.artist);
                joined(artist, &meta.album)
            } else {
                meta.album.trim().to_string()
            };
            path.push(required("album", &year_prefixed(&meta.year, &album))?);
        }
    }

    if let Some(disc) = cx.disc {
        path.push(format!("CD{disc}"));
    }

    path.push(file_name(meta, layout)?);
    Ok(path)
}

/// Build from the file's own classification, rooted where it already lives.
pub fn canonical_path(
    meta: &TrackMetadata,
    classification: &Classification,
) -> Result<PathBuf, BuildError> {
    let root = classification
        .library_root()
        .filter(|r| !r.as_os_str().is_empty())
        .ok_or(BuildError::MissingSegment("library root"))?;
    let cx = BuildContext::new(root).with_disc(disc_folder(meta, classification));
    build(meta, classification.layout, &cx)
}

/// Disc folder for a track: kept when the file already sits in one,
/// added when the metadata says the album has more than one disc.
pub fn disc_folder(meta: &TrackMetadata, classification: &Classification) -> Option<u32> {
    let tagged = meta.disk.trim().parse::<u32>().ok().filter(|n| *n > 0);
    match &classification.disc {
        Some(segment) => tagged.or(Some(segment.number)),
        None => {
            let total = meta.total_disks.trim().parse::<u32>().unwrap_or(0);
            if total > 1 { tagged } else { None }
        }
    }
}

/// Whether a file at `current` has to move to reach `target`.
pub fn needs_change(current: &Path, target: &Path) -> bool {
    current != target
}

fn file_name(meta: &TrackMetadata, layout: LibraryLayout) -> Result<String, BuildError> {
    let title = sanitize_segment(&meta.title);
    if title.is_empty() {
        return Err(BuildError::MissingSegment("title"));
    }
    let body = if layout == LibraryLayout::LabelCompilation {
        joined(&meta.artist, &title)
    } else {
        title
    };

    let mut name = match track_number(&meta.track) {
        Some(track) => format!("{track} {body}"),
        // "7 Rings" with no track would read back as track 7.
        None if grammar::track_title(&body).is_some() => {
            return Err(BuildError::MissingSegment("track"));
        }
        None => body,
    };
    if let Some(ext) = meta.source_file.extension().and_then(|e| e.to_str()) {
        name.push('.');
        name.push_str(ext);
    }
    Ok(sanitize_segment(&name))
}

fn track_number(track: &str) -> Option<String> {
    let track = track.trim();
    if track.is_empty() {
        return None;
    }
    Some(match track.parse::<u32>() {
        Ok(n) => format!("{n:02}"),
        Err(_) => track.to_string(),
    })
}

fn year_prefixed(year: &str, rest: &str) -> String {
    let (year, rest) = (year.trim(), rest.trim());
    match (year.is_empty(), rest.is_empty()) {
        (true, _) => rest.to_string(),
        (false, true) => format!("[{year}]"),
        (false, false) => format!("[{year}] {rest}"),
    }
}

fn joined(left: &str, right: &str) -> String {
    let (left, right) = (left.trim(), right.trim());
    match (left.is_empty(), right.is_empty()) {
        (false, false) => format!("{left} - {right}"),
        (true, _) => right.to_string(),
        (false, true) => left.to_string(),
    }
}

fn required(what: &'static str, value: &str) -> Result<String, BuildError> {
    let segment = sanitize_segment(value);
    if segment.is_empty() {
        Err(BuildError::MissingSegment(what))
    } else {
        Ok(segment)
    }
}
