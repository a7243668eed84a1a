use std::sync::LazyLock;

use regex::Regex;

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("static grammar pattern is valid")
}

// Separator between a leading track number and the rest: "01 ", "01. ", "01 - ".
const TRACK_PREFIX: &str = r"(?P<track>\d{1,3})(?:\s*[.\-]\s*|\s+)";

pub(super) static TRACK_TITLE: LazyLock<Regex> =
    LazyLock::new(|| compile(&format!(r"^{TRACK_PREFIX}(?P<title>\S.*)$")));

pub(super) static TRACK_ARTIST_TITLE: LazyLock<Regex> = LazyLock::new(|| {
    compile(&format!(
        r"^{TRACK_PREFIX}(?P<artist>\S.*?)\s+-\s+(?P<title>\S.*)$"
    ))
});

pub(super) static ARTIST_TITLE: LazyLock<Regex> =
    LazyLock::new(|| compile(r"^(?P<artist>\S.*?)\s+-\s+(?P<title>\S.*)$"));

pub(super) static YEAR_ALBUM: LazyLock<Regex> =
    LazyLock::new(|| compile(r"^\[(?P<year>\d{4})\]\s*(?P<album>.*)$"));

pub(super) static YEAR_ARTIST_ALBUM: LazyLock<Regex> = LazyLock::new(|| {
    compile(r"^\[(?P<year>\d{4})\]\s*(?P<artist>\S.*?)\s+-\s+(?P<album>\S.*)$")
});

pub(super) static DISC_SEGMENT: LazyLock<Regex> =
    LazyLock::new(|| compile(r"(?i)^(?:cd|disc|disk)\s*(?P<disc>\d{1,2})$"));

pub(super) static LABEL_SEGMENT: LazyLock<Regex> =
    LazyLock::new(|| compile(r"(?i)^(?P<label>singles|compilations|lps|eps)$"));

// "(feat. X)", "[Ft X]", "(featuring X)"
pub(super) static FEAT_BRACKETED: LazyLock<Regex> = LazyLock::new(|| {
    compile(r"(?i)[(\[]\s*(?:featuring|feat\.?|ft\.?)\s+(?P<who>[^()\[\]]+?)\s*[)\]]")
});

// "Song ft. X", "Song feat. X remixed by Y", "Song Ft. X (Club Mix)".
// Without brackets the dot is required, so "Ft Worth" stays a name.
pub(super) static FEAT_BARE: LazyLock<Regex> = LazyLock::new(|| {
    compile(
        r"(?i)^(?P<pre>.*?)\s+(?:featuring|feat\.|ft\.)\s+(?P<who>[^()\[\]]+?)(?P<rest>(?:\s+remixed\s+by\s+[^()\[\]]+?)?(?:\s*[(\[].*)?)$",
    )
});

pub(super) static EMPTY_BRACKETS: LazyLock<Regex> =
    LazyLock::new(|| compile(r"\(\s*\)|\[\s*\]"));

pub(super) static SPACE_AFTER_OPEN: LazyLock<Regex> = LazyLock::new(|| compile(r"([(\[])\s+"));

pub(super) static SPACE_BEFORE_CLOSE: LazyLock<Regex> =
    LazyLock::new(|| compile(r"\s+([)\]])"));

pub(super) static WHITESPACE_RUN: LazyLock<Regex> = LazyLock::new(|| compile(r"\s{2,}"));

pub(super) static TRACK_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| compile(r"^(?P<track>\d{1,3})(?P<sep>\s*[.\-]\s*)(?P<rest>.+)$"));

pub(super) static SINGLE_DIGIT_TRACK: LazyLock<Regex> =
    LazyLock::new(|| compile(r"^(?P<track>\d)\s+(?P<rest>.+)$"));
