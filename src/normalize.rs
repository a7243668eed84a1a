//! Filename cleanup.
//!
//! A pure string pipeline that never looks at directories. The stages run in
//! a fixed order and each assumes the previous ones already ran:
//!
//! 1. featuring tags become `(ft. X)`;
//! 2. configured junk substrings are removed, then empty brackets collapse;
//! 3. `NN. Title` / `NN - Title` become `NN Title`, and `N Title` is padded.
//!
//! The extension is split off first and re-appended untouched.

use crate::config::NormalizeSettings;
use crate::grammar::{self, JunkList};

#[derive(Debug, Clone)]
pub struct FilenameNormalizer {
    junk: JunkList,
}

impl FilenameNormalizer {
    pub fn new(settings: &NormalizeSettings) -> Result<Self, regex::Error> {
        Ok(Self {
            junk: JunkList::new(settings.junk.as_slice())?,
        })
    }

    /// Normalize a full file name, extension included.
    pub fn normalize(&self, file_name: &str) -> String {
        let (stem, ext) = split_extension(file_name);
        let stem = self.normalize_stem(stem);
        match ext {
            Some(ext) => format!("{stem}.{ext}"),
            None => stem,
        }
    }

    /// Run every stage over an extension-less stem.
    pub fn normalize_stem(&self, stem: &str) -> String {
        let stem = featuring(stem);
        let stem = self.strip_junk(&stem);
        clean_track_number(&stem)
    }

    pub fn strip_junk(&self, stem: &str) -> String {
        grammar::collapse_remnants(&self.junk.strip(stem))
    }
}

pub fn featuring(stem: &str) -> String {
    grammar::normalize_featuring(stem)
}

pub fn clean_track_number(stem: &str) -> String {
    let stem = grammar::collapse_track_separator(stem).unwrap_or_else(|| stem.to_string());
    grammar::pad_single_digit_track(&stem).unwrap_or(stem)
}

/// Split `name` into stem and extension. Only a short alphanumeric tail after
/// the last dot counts as an extension, so `"Vol. 2"` keeps its dot.
fn split_extension(name: &str) -> (&str, Option<&str>) {
    match name.rsplit_once('.') {
        Some((stem, ext))
            if !stem.trim().is_empty()
                && !ext.is_empty()
                && ext.len() <= 5
                && ext.chars().all(|c| c.is_ascii_alphanumeric()) =>
        {
            (stem, Some(ext))
        }
        _ => (name, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalizer() -> FilenameNormalizer {
        FilenameNormalizer::new(&NormalizeSettings::default()).unwrap()
    }

    #[test]
    fn full_pipeline_cleans_a_messy_download() {
        let n = normalizer();
        assert_eq!(
            n.normalize("3. faded (feat. x) bootleg.mp3"),
            "03 faded (ft. x).mp3"
        );
    }

    #[test]
    fn pipeline_is_idempotent() {
        let n = normalizer();
        for name in [
            "3. faded (feat. x) bootleg.mp3",
            "07 - Song ft. Someone remixed by Other.flac",
            "1 Intro [320kbps].ogg",
            "Artist - Track (Official Audio) [].m4a",
            "12 Already Clean.mp3",
            "Vol. 2",
            "Song (feat. X bootleg).mp3",
            "Songs About Ft Worth.mp3",
        ] {
            let once = n.normalize(name);
            assert_eq!(n.normalize(&once), once, "not idempotent for {name:?}");
        }
    }

    #[test]
    fn bare_featuring_is_wrapped_and_remixer_kept_outside() {
        assert_eq!(
            featuring("Song feat. Someone remixed by Other"),
            "Song (ft. Someone) remixed by Other"
        );
        assert_eq!(featuring("Song [Ft Someone]"), "Song (ft. Someone)");
        assert_eq!(featuring("Songs About Ft Worth"), "Songs About Ft Worth");
    }

    #[test]
    fn junk_removal_leaves_no_empty_brackets() {
        let n = normalizer();
        assert_eq!(n.strip_junk("Track (Official Audio)"), "Track");
        assert_eq!(n.strip_junk("Track ( FREE DOWNLOAD )"), "Track");
        assert_eq!(n.strip_junk("Track [320kbps] (Club Mix)"), "Track (Club Mix)");
        assert_eq!(n.strip_junk("Song (ft. X bootleg)"), "Song (ft. X)");
    }

    #[test]
    fn track_number_cleanup() {
        assert_eq!(clean_track_number("4 - Song"), "04 Song");
        assert_eq!(clean_track_number("11. Song"), "11 Song");
        assert_eq!(clean_track_number("9 Song"), "09 Song");
        assert_eq!(clean_track_number("1-800 Number"), "1-800 Number");
        assert_eq!(clean_track_number("Song"), "Song");
    }

    #[test]
    fn empty_junk_list_only_tidies() {
        let n = FilenameNormalizer::new(&NormalizeSettings { junk: Vec::new() }).unwrap();
        assert_eq!(n.normalize("2.  bootleg  song.wav"), "02 bootleg song.wav");
    }

    #[test]
    fn extension_split_ignores_dots_in_titles() {
        assert_eq!(split_extension("01 Song.mp3"), ("01 Song", Some("mp3")));
        assert_eq!(split_extension("Vol. 2"), ("Vol. 2", None));
        assert_eq!(split_extension(".hidden"), (".hidden", None));
    }
}
