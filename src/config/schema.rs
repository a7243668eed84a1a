use serde::Deserialize;

/// Top-level settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/shelver/config.toml` or `~/.config/shelver/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `SHELVER__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub library: LibrarySettings,
    pub normalize: NormalizeSettings,
    pub audit: AuditSettings,
    pub log: LogSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LibrarySettings {
    /// File extensions to treat as audio (case-insensitive, without dot).
    pub extensions: Vec<String>,
    /// Whether to follow symlinks while walking a library tree.
    pub follow_links: bool,
    /// Whether to include hidden files/directories (dotfiles).
    pub include_hidden: bool,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            extensions: vec![
                "mp3".into(),
                "flac".into(),
                "m4a".into(),
                "ogg".into(),
                "wav".into(),
            ],
            follow_links: false,
            include_hidden: false,
        }
    }
}

impl LibrarySettings {
    /// Whether `ext` (with or without a leading dot) is a configured audio extension.
    pub fn is_audio_extension(&self, ext: &str) -> bool {
        let ext = ext.trim().trim_start_matches('.');
        self.extensions
            .iter()
            .map(|e| e.trim().trim_start_matches('.'))
            .any(|e| !e.is_empty() && e.eq_ignore_ascii_case(ext))
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NormalizeSettings {
    /// Substrings stripped from filenames (case-insensitive).
    ///
    /// Example: ["bootleg", "free download"]
    pub junk: Vec<String>,
}

impl Default for NormalizeSettings {
    fn default() -> Self {
        Self {
            junk: DEFAULT_JUNK.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Platform artifacts and download-site watermarks seen in the wild.
pub const DEFAULT_JUNK: &[&str] = &[
    "(official audio)",
    "(official video)",
    "(official music video)",
    "(lyric video)",
    "free download",
    "free dl",
    "bootleg",
    "[320kbps]",
    "(320kbps)",
    "320kbps",
    "ytmp3.cc",
    "mp3juices.cc",
    "y2mate.com",
];

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AuditSettings {
    /// Name of the zero-byte file marking a confirmed album directory.
    pub marker_name: String,
    /// File stem a cover image must carry (`cover.jpg`, `cover.png`, ...).
    pub cover_stem: String,
    /// Whether a track without embedded artwork counts as incompletely tagged.
    pub require_artwork: bool,
    /// Number of worker threads used to audit albums.
    /// `None` uses the available parallelism.
    pub jobs: Option<usize>,
}

impl Default for AuditSettings {
    fn default() -> Self {
        Self {
            marker_name: ".done".to_string(),
            cover_stem: "cover".to_string(),
            require_artwork: true,
            jobs: None,
        }
    }
}

impl AuditSettings {
    pub fn worker_count(&self) -> usize {
        self.jobs.unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// `tracing_subscriber::EnvFilter` directive used when `RUST_LOG` is unset.
    pub filter: String,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}
