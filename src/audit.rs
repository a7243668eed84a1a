//! Library audit.
//!
//! Each album directory moves through `Unscanned -> Scanned -> Confirmed`.
//! Scanning checks three things: complete tags (artwork included when
//! configured), canonical paths for every track, and a `cover.*` file in
//! the album directory. Confirmation is an explicit user action that drops a
//! zero-byte marker into the album directory; marked albums are skipped
//! until the markers are cleared.
//!
//! Albums are independent, so a scan fans out over a rayon pool sized from
//! `audit.jobs` and the records come back in album order.

mod report;

use std::path::{Path, PathBuf};

use rayon::ThreadPoolBuilder;
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::config::{AuditSettings, LibrarySettings};
use crate::error::{Error, Result};
use crate::library::Filesystem;
use crate::metadata::{Extractor, Field};
use crate::organize::{self, Placement};
use crate::tags::{StoredTags, TagStore};

pub use report::{AuditRecord, AuditReport, OffendingFiles};

/// Fields a track must carry to count as completely tagged.
const REQUIRED_FIELDS: [Field; 8] = [
    Field::Title,
    Field::Artist,
    Field::Album,
    Field::AlbumArtist,
    Field::Genre,
    Field::Year,
    Field::Track,
    Field::Disk,
];

/// Results of the three album checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlbumChecks {
    pub tags_ok: bool,
    pub paths_ok: bool,
    pub cover_ok: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlbumState {
    Unscanned,
    Scanned(AlbumChecks),
    Confirmed,
}

impl AuditRecord {
    pub fn checks(&self) -> AlbumChecks {
        AlbumChecks {
            tags_ok: !self.tags_incomplete,
            paths_ok: !self.paths_incorrect,
            cover_ok: !self.cover_missing,
        }
    }
}

pub struct AuditEngine<'a> {
    fs: &'a dyn Filesystem,
    tags: &'a dyn TagStore,
    library: &'a LibrarySettings,
    settings: &'a AuditSettings,
}

impl<'a> AuditEngine<'a> {
    pub fn new(
        fs: &'a dyn Filesystem,
        tags: &'a dyn TagStore,
        library: &'a LibrarySettings,
        settings: &'a AuditSettings,
    ) -> Self {
        Self {
            fs,
            tags,
            library,
            settings,
        }
    }

    fn marker(&self, album_dir: &Path) -> PathBuf {
        album_dir.join(&self.settings.marker_name)
    }

    pub fn is_confirmed(&self, album_dir: &Path) -> bool {
        self.fs.exists(&self.marker(album_dir))
    }

    /// Current state of one album, `record` being its latest scan if any.
    pub fn state(&self, album_dir: &Path, record: Option<&AuditRecord>) -> AlbumState {
        if self.is_confirmed(album_dir) {
            return AlbumState::Confirmed;
        }
        match record {
            Some(r) => AlbumState::Scanned(r.checks()),
            None => AlbumState::Unscanned,
        }
    }

    /// Scan every unconfirmed album under `root`.
    pub fn audit(&self, root: &Path) -> AuditReport {
        let mut report = AuditReport {
            root: root.to_path_buf(),
            ..AuditReport::default()
        };

        let mut pending: Vec<(PathBuf, Vec<PathBuf>)> = Vec::new();
        for (album_dir, files) in organize::group_albums(self.fs, root, self.library) {
            if self.is_confirmed(&album_dir) {
                debug!(target: "audit", album = %album_dir.display(), "confirmed, skipping");
                report.confirmed.push(album_dir);
            } else {
                pending.push((album_dir, files));
            }
        }

        report.records = self.scan_all(&pending);
        info!(
            target: "audit",
            root = %root.display(),
            albums = report.records.len(),
            issues = report.issues().count(),
            confirmed = report.confirmed.len(),
            "audit finished"
        );
        report
    }

    fn scan_all(&self, albums: &[(PathBuf, Vec<PathBuf>)]) -> Vec<AuditRecord> {
        let extractor = Extractor::new(self.fs, self.tags, self.library);
        let scan = || -> Vec<AuditRecord> {
            albums
                .par_iter()
                .map(|(album_dir, files)| self.scan_album(&extractor, album_dir, files))
                .collect()
        };

        match ThreadPoolBuilder::new()
            .num_threads(self.settings.worker_count())
            .build()
        {
            Ok(pool) => pool.install(scan),
            Err(e) => {
                warn!(target: "audit", "worker pool unavailable: {e}; using the global pool");
                scan()
            }
        }
    }

    /// Run the three checks on one album.
    pub fn scan_album(
        &self,
        extractor: &Extractor<'_>,
        album_dir: &Path,
        files: &[PathBuf],
    ) -> AuditRecord {
        let placements = organize::place_album(extractor, files);
        let mut offending = OffendingFiles::default();

        for placement in &placements {
            if !self.tags_complete(placement.stored.as_ref()) {
                offending.tags.push(placement.source.clone());
            }
            if !path_correct(placement) {
                offending.paths.push(placement.source.clone());
            }
        }
        if !self.has_cover(album_dir) {
            offending.cover.push(album_dir.to_path_buf());
        }

        let layout = placements
            .first()
            .map(|p| p.classification.layout.name())
            .unwrap_or("plain");
        let record = AuditRecord {
            album_dir: album_dir.to_path_buf(),
            layout,
            tracks: files.len(),
            tags_incomplete: !offending.tags.is_empty(),
            paths_incorrect: !offending.paths.is_empty(),
            cover_missing: !offending.cover.is_empty(),
            offending,
        };
        debug!(
            target: "audit",
            album = %album_dir.display(),
            tags_ok = !record.tags_incomplete,
            paths_ok = !record.paths_incorrect,
            cover_ok = !record.cover_missing,
            "scanned"
        );
        record
    }

    fn tags_complete(&self, stored: Option<&StoredTags>) -> bool {
        let Some(stored) = stored else {
            return false;
        };
        let fields_ok = REQUIRED_FIELDS
            .iter()
            .all(|f| !stored.metadata.get(*f).trim().is_empty());
        fields_ok && (!self.settings.require_artwork || stored.pictures > 0)
    }

    fn has_cover(&self, album_dir: &Path) -> bool {
        let stem = self.settings.cover_stem.as_str();
        self.fs
            .list_files(album_dir)
            .unwrap_or_default()
            .iter()
            .filter_map(|p| p.file_stem().and_then(|s| s.to_str()))
            .any(|s| s.eq_ignore_ascii_case(stem))
    }

    /// Mark an album as reviewed.
    pub fn confirm(&self, album_dir: &Path) -> Result<()> {
        let marker = self.marker(album_dir);
        self.fs
            .create_marker(&marker)
            .map_err(|e| Error::fs(&marker, e))?;
        info!(target: "audit", album = %album_dir.display(), "confirmed");
        Ok(())
    }

    /// Remove every marker under `root`; returns how many were removed.
    pub fn clear(&self, root: &Path) -> Result<usize> {
        let mut removed = 0;
        for dir in self.fs.walk_dirs(root) {
            let marker = self.marker(&dir);
            if self.fs.exists(&marker) {
                self.fs
                    .delete_marker(&marker)
                    .map_err(|e| Error::fs(&marker, e))?;
                removed += 1;
            }
        }
        info!(target: "audit", root = %root.display(), removed, "markers cleared");
        Ok(removed)
    }
}

fn path_correct(placement: &Placement) -> bool {
    match &placement.target {
        Ok(target) => target == &placement.source,
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests;
