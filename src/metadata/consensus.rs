//! Consensus heuristics over sibling files.
//!
//! Both functions produce suggestions, not facts: a common substring can be
//! shorter than the real artist name, and a majority genre can be wrong for
//! an outlier album.

use std::path::{Path, PathBuf};

use crate::config::LibrarySettings;
use crate::layout;
use crate::library::{self, Filesystem};
use crate::tags::TagStore;

// Joining words left dangling at the edge of a shared substring.
const SEPARATOR_WORDS: &[&str] = &[
    "ft", "feat", "featuring", "vs", "and", "with", "presents", "pres",
];

/// Longest contiguous substring shared by every non-empty artist, trimmed of
/// stray separators. Empty when nothing meaningful is shared.
pub fn common_artist<S: AsRef<str>>(artists: &[S]) -> String {
    let names: Vec<&str> = artists
        .iter()
        .map(|a| a.as_ref().trim())
        .filter(|a| !a.is_empty())
        .collect();

    let Some(shortest) = names.iter().min_by_key(|n| n.chars().count()).copied() else {
        return String::new();
    };

    let chars: Vec<(usize, char)> = shortest.char_indices().collect();
    let n = chars.len();
    let byte_at = |i: usize| chars.get(i).map(|(b, _)| *b).unwrap_or(shortest.len());

    for len in (1..=n).rev() {
        for start in 0..=(n - len) {
            let candidate = &shortest[byte_at(start)..byte_at(start + len)];
            if names.iter().all(|name| name.contains(candidate)) {
                let trimmed = trim_separators(candidate);
                if trimmed.chars().any(char::is_alphanumeric) {
                    return trimmed;
                }
            }
        }
    }
    String::new()
}

fn trim_separators(s: &str) -> String {
    let mut words: Vec<&str> = s
        .trim_matches(|c: char| !c.is_alphanumeric())
        .split_whitespace()
        .collect();

    let is_sep = |w: &str| {
        let w = w.trim_matches(|c: char| !c.is_alphanumeric()).to_lowercase();
        w.is_empty() || SEPARATOR_WORDS.contains(&w.as_str())
    };

    while words.last().is_some_and(|w| is_sep(w)) {
        words.pop();
    }
    while words.first().is_some_and(|w| is_sep(w)) {
        words.remove(0);
    }

    words
        .join(" ")
        .trim_matches(|c: char| !c.is_alphanumeric())
        .to_string()
}

/// Most frequent non-empty genre among `files`, ties broken by first seen.
pub fn common_genre(files: &[PathBuf], tags: &dyn TagStore) -> String {
    let mut tally: Vec<(String, usize)> = Vec::new();
    for file in files {
        let Some(stored) = tags.read_tags(file) else {
            continue;
        };
        let genre = stored.metadata.genre.trim();
        if genre.is_empty() {
            continue;
        }
        match tally.iter_mut().find(|(g, _)| g == genre) {
            Some((_, count)) => *count += 1,
            None => tally.push((genre.to_string(), 1)),
        }
    }

    let mut best: Option<&(String, usize)> = None;
    for entry in &tally {
        if best.is_none_or(|b| entry.1 > b.1) {
            best = Some(entry);
        }
    }
    best.map(|(g, _)| g.clone()).unwrap_or_default()
}

/// Audio files under an album-artist directory that are not in a label layout.
pub fn genre_siblings(
    fs: &dyn Filesystem,
    album_artist_dir: &Path,
    settings: &LibrarySettings,
) -> Vec<PathBuf> {
    library::audio_files_under(fs, album_artist_dir, settings)
        .into_iter()
        .filter(|p| !layout::classify(p).layout.is_label())
        .collect()
}
