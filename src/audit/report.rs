use std::path::PathBuf;

use serde::Serialize;

/// Files that failed each check.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OffendingFiles {
    pub tags: Vec<PathBuf>,
    pub paths: Vec<PathBuf>,
    /// Directories lacking a cover image.
    pub cover: Vec<PathBuf>,
}

/// Outcome of auditing one album directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuditRecord {
    pub album_dir: PathBuf,
    pub layout: &'static str,
    pub tracks: usize,
    pub tags_incomplete: bool,
    pub paths_incorrect: bool,
    pub cover_missing: bool,
    pub offending: OffendingFiles,
}

impl AuditRecord {
    pub fn is_clean(&self) -> bool {
        !(self.tags_incomplete || self.paths_incorrect || self.cover_missing)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AuditReport {
    pub root: PathBuf,
    /// Albums skipped because they carry a confirmation marker.
    pub confirmed: Vec<PathBuf>,
    pub records: Vec<AuditRecord>,
}

impl AuditReport {
    pub fn issues(&self) -> impl Iterator<Item = &AuditRecord> {
        self.records.iter().filter(|r| !r.is_clean())
    }

    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}
