//! Filename and directory-name grammar.
//!
//! Every pattern the engine matches against lives here; the classifier,
//! extractor, normalizer and path builder only consume the typed captures
//! returned by these matchers. Matching is case-insensitive where names are
//! free text; years are exactly four digits inside square brackets.

mod patterns;

use regex::{Captures, Regex, RegexBuilder};

use patterns::*;

/// `NN Title`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackTitle<'a> {
    pub track: &'a str,
    pub title: &'a str,
}

/// `NN Artist - Title`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackArtistTitle<'a> {
    pub track: &'a str,
    pub artist: &'a str,
    pub title: &'a str,
}

/// `Artist - Title` (also used for an unbracketed `Artist - Album`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArtistTitle<'a> {
    pub artist: &'a str,
    pub title: &'a str,
}

/// `[Year] Album`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearAlbum<'a> {
    pub year: &'a str,
    pub album: &'a str,
}

/// `[Year] Artist - Album`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearArtistAlbum<'a> {
    pub year: &'a str,
    pub artist: &'a str,
    pub album: &'a str,
}

/// The four subdivisions of a label directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LabelSegment {
    Singles,
    Compilations,
    LPs,
    EPs,
}

impl LabelSegment {
    /// Canonical directory name for this subdivision.
    pub fn dir_name(self) -> &'static str {
        match self {
            LabelSegment::Singles => "Singles",
            LabelSegment::Compilations => "Compilations",
            LabelSegment::LPs => "LPs",
            LabelSegment::EPs => "EPs",
        }
    }
}

fn group<'a>(caps: &Captures<'a>, name: &str) -> &'a str {
    caps.name(name).map(|m| m.as_str().trim()).unwrap_or("")
}

pub fn track_title(stem: &str) -> Option<TrackTitle<'_>> {
    let caps = TRACK_TITLE.captures(stem.trim())?;
    Some(TrackTitle {
        track: group(&caps, "track"),
        title: group(&caps, "title"),
    })
}

pub fn track_artist_title(stem: &str) -> Option<TrackArtistTitle<'_>> {
    let caps = TRACK_ARTIST_TITLE.captures(stem.trim())?;
    Some(TrackArtistTitle {
        track: group(&caps, "track"),
        artist: group(&caps, "artist"),
        title: group(&caps, "title"),
    })
}

pub fn artist_title(text: &str) -> Option<ArtistTitle<'_>> {
    let caps = ARTIST_TITLE.captures(text.trim())?;
    Some(ArtistTitle {
        artist: group(&caps, "artist"),
        title: group(&caps, "title"),
    })
}

pub fn year_album(dir_name: &str) -> Option<YearAlbum<'_>> {
    let caps = YEAR_ALBUM.captures(dir_name.trim())?;
    Some(YearAlbum {
        year: group(&caps, "year"),
        album: group(&caps, "album"),
    })
}

pub fn year_artist_album(dir_name: &str) -> Option<YearArtistAlbum<'_>> {
    let caps = YEAR_ARTIST_ALBUM.captures(dir_name.trim())?;
    Some(YearArtistAlbum {
        year: group(&caps, "year"),
        artist: group(&caps, "artist"),
        album: group(&caps, "album"),
    })
}

/// Disc number carried by a folder named like `CD1`, `cd 2` or `Disc 3`.
pub fn disc_segment(dir_name: &str) -> Option<u32> {
    let caps = DISC_SEGMENT.captures(dir_name.trim())?;
    caps.name("disc")?.as_str().parse().ok()
}

pub fn label_segment(dir_name: &str) -> Option<LabelSegment> {
    let caps = LABEL_SEGMENT.captures(dir_name.trim())?;
    let label = caps.name("label")?.as_str().to_ascii_lowercase();
    match label.as_str() {
        "singles" => Some(LabelSegment::Singles),
        "compilations" => Some(LabelSegment::Compilations),
        "lps" => Some(LabelSegment::LPs),
        "eps" => Some(LabelSegment::EPs),
        _ => None,
    }
}

/// Parsed album directory name, any part possibly empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlbumDirName {
    pub year: String,
    pub artist: String,
    pub album: String,
}

/// Split an album directory name into year, artist and album.
///
/// With `with_artist`, `[Year] Artist - Album` is tried first, then an
/// unbracketed `Artist - Album`. Without it the whole remainder after the
/// optional `[Year]` is the album.
pub fn album_dir_name(dir_name: &str, with_artist: bool) -> AlbumDirName {
    if with_artist {
        if let Some(m) = year_artist_album(dir_name) {
            return AlbumDirName {
                year: m.year.to_string(),
                artist: m.artist.to_string(),
                album: m.album.to_string(),
            };
        }
    }

    let (year, rest) = match year_album(dir_name) {
        Some(m) => (m.year, m.album),
        None => ("", dir_name.trim()),
    };

    if with_artist {
        if let Some(m) = artist_title(rest) {
            return AlbumDirName {
                year: year.to_string(),
                artist: m.artist.to_string(),
                album: m.title.to_string(),
            };
        }
    }

    AlbumDirName {
        year: year.to_string(),
        artist: String::new(),
        album: rest.to_string(),
    }
}

/// Rewrite every featuring-tag variant into `(ft. X)`, keeping a trailing
/// `remixed by Y` outside the parentheses.
pub fn normalize_featuring(text: &str) -> String {
    let bracketed = FEAT_BRACKETED.replace_all(text, "(ft. ${who})");
    FEAT_BARE
        .replace(&bracketed, "${pre} (ft. ${who})${rest}")
        .into_owned()
}

/// Remove `()` / `[]` left behind after stripping, and squeeze whitespace,
/// including any left just inside a bracket.
pub fn collapse_remnants(text: &str) -> String {
    let mut out = text.to_string();
    // Stripping one pair can expose another, e.g. "( [] )".
    loop {
        let next = EMPTY_BRACKETS.replace_all(&out, "").into_owned();
        if next == out {
            break;
        }
        out = next;
    }
    let out = SPACE_AFTER_OPEN.replace_all(&out, "$1");
    let out = SPACE_BEFORE_CLOSE.replace_all(&out, "$1");
    WHITESPACE_RUN.replace_all(&out, " ").trim().to_string()
}

/// `NN. Title` / `NN - Title` become `NN Title`.
///
/// A separator directly followed by a digit (`1-800`, `2.5`) is left alone.
pub fn collapse_track_separator(stem: &str) -> Option<String> {
    let caps = TRACK_SEPARATOR.captures(stem)?;
    let sep = caps.name("sep")?.as_str();
    let rest = caps.name("rest")?.as_str();
    let tight = !sep.ends_with(char::is_whitespace);
    if tight && rest.starts_with(|c: char| c.is_ascii_digit()) {
        return None;
    }
    Some(format!("{} {}", &caps["track"], rest.trim_start()))
}

/// `N Title` becomes `0N Title`.
pub fn pad_single_digit_track(stem: &str) -> Option<String> {
    let caps = SINGLE_DIGIT_TRACK.captures(stem)?;
    Some(format!("0{} {}", &caps["track"], &caps["rest"]))
}

/// Configurable list of junk substrings, matched case-insensitively.
#[derive(Debug, Clone)]
pub struct JunkList {
    pattern: Option<Regex>,
}

impl JunkList {
    pub fn new<S: AsRef<str>>(entries: &[S]) -> Result<Self, regex::Error> {
        let mut literals: Vec<&str> = entries
            .iter()
            .map(|s| s.as_ref().trim())
            .filter(|s| !s.is_empty())
            .collect();
        if literals.is_empty() {
            return Ok(Self { pattern: None });
        }
        // Longest first so "free download" wins over "free dl"-style prefixes.
        literals.sort_by(|a, b| b.len().cmp(&a.len()));
        let alternation = literals
            .iter()
            .map(|s| regex::escape(s))
            .collect::<Vec<_>>()
            .join("|");
        let pattern = RegexBuilder::new(&alternation)
            .case_insensitive(true)
            .build()?;
        Ok(Self {
            pattern: Some(pattern),
        })
    }

    pub fn strip(&self, text: &str) -> String {
        match &self.pattern {
            Some(re) => re.replace_all(text, "").into_owned(),
            None => text.to_string(),
        }
    }
}
