use std::path::Path;

use tempfile::{TempDir, tempdir};

use super::*;
use crate::library::StdFilesystem;
use crate::test_support::{MemoryTags, full_tags, touch};

struct Library {
    dir: TempDir,
    fs: StdFilesystem,
    tags: MemoryTags,
    library: LibrarySettings,
    audit: AuditSettings,
}

impl Library {
    fn new() -> Self {
        Self {
            dir: tempdir().unwrap(),
            fs: StdFilesystem::default(),
            tags: MemoryTags::default(),
            library: LibrarySettings::default(),
            audit: AuditSettings::default(),
        }
    }

    fn root(&self) -> &Path {
        self.dir.path()
    }

    fn tagged(&self, rel: &str, title: &str, track: &str, pictures: usize) -> PathBuf {
        let path = touch(self.root(), rel);
        self.tags.insert(&path, full_tags(&path, title, track), pictures);
        path
    }

    fn engine(&self) -> AuditEngine<'_> {
        AuditEngine::new(&self.fs, &self.tags, &self.library, &self.audit)
    }
}

fn clean_album(lib: &Library) {
    lib.tagged("Artist/[2019] Album/01 First.mp3", "First", "1", 1);
    lib.tagged("Artist/[2019] Album/02 Second.mp3", "Second", "2", 1);
    touch(lib.root(), "Artist/[2019] Album/Cover.JPG");
}

#[test]
fn clean_album_passes_every_check() {
    let lib = Library::new();
    clean_album(&lib);

    let report = lib.engine().audit(lib.root());
    assert_eq!(report.records.len(), 1);
    let record = &report.records[0];
    assert!(record.is_clean(), "{record:?}");
    assert_eq!(record.tracks, 2);
    assert_eq!(record.layout, "plain");
    assert_eq!(report.issues().count(), 0);
}

#[test]
fn messy_album_fails_all_three_checks() {
    let lib = Library::new();
    let untagged = touch(lib.root(), "Artist/Bad/3. x.mp3");

    let report = lib.engine().audit(lib.root());
    let record = &report.records[0];
    assert!(record.tags_incomplete);
    assert!(record.paths_incorrect);
    assert!(record.cover_missing);
    assert_eq!(record.offending.tags, vec![untagged.clone()]);
    assert_eq!(record.offending.paths, vec![untagged]);
    assert_eq!(record.offending.cover, vec![lib.root().join("Artist/Bad")]);
    assert_eq!(
        record.checks(),
        AlbumChecks {
            tags_ok: false,
            paths_ok: false,
            cover_ok: false,
        }
    );
}

#[test]
fn missing_artwork_only_counts_when_required() {
    let mut lib = Library::new();
    lib.tagged("Artist/[2019] Album/01 First.mp3", "First", "1", 0);
    touch(lib.root(), "Artist/[2019] Album/cover.png");

    let report = lib.engine().audit(lib.root());
    assert!(report.records[0].tags_incomplete);

    lib.audit.require_artwork = false;
    let report = lib.engine().audit(lib.root());
    assert!(report.records[0].is_clean());
}

#[test]
fn multi_disc_album_is_one_record() {
    let lib = Library::new();
    let a = touch(lib.root(), "Artist/[2020] Double/CD1/01 A.mp3");
    let b = touch(lib.root(), "Artist/[2020] Double/CD2/01 B.mp3");
    for (path, title, disk) in [(&a, "A", "1"), (&b, "B", "2")] {
        let mut m = full_tags(path, title, "1");
        m.album = "Double".into();
        m.year = "2020".into();
        m.disk = disk.into();
        m.total_disks = "2".into();
        lib.tags.insert(path, m, 1);
    }
    touch(lib.root(), "Artist/[2020] Double/cover.jpg");

    let report = lib.engine().audit(lib.root());
    assert_eq!(report.records.len(), 1);
    assert!(report.records[0].is_clean(), "{:?}", report.records[0]);
}

#[test]
fn confirmation_lifecycle() {
    let lib = Library::new();
    clean_album(&lib);
    touch(lib.root(), "Other/Bad/3. x.mp3");
    let engine = lib.engine();
    let bad = lib.root().join("Other/Bad");

    assert_eq!(engine.state(&bad, None), AlbumState::Unscanned);
    let report = engine.audit(lib.root());
    let record = report.records.iter().find(|r| r.album_dir == bad).unwrap();
    assert!(matches!(
        engine.state(&bad, Some(record)),
        AlbumState::Scanned(AlbumChecks { tags_ok: false, .. })
    ));

    engine.confirm(&bad).unwrap();
    assert_eq!(engine.state(&bad, Some(record)), AlbumState::Confirmed);
    let report = engine.audit(lib.root());
    assert_eq!(report.confirmed, vec![bad.clone()]);
    assert_eq!(report.records.len(), 1);

    engine.confirm(&lib.root().join("Artist/[2019] Album")).unwrap();
    assert_eq!(engine.clear(lib.root()).unwrap(), 2);
    assert_eq!(engine.clear(lib.root()).unwrap(), 0);
    let report = engine.audit(lib.root());
    assert!(report.confirmed.is_empty());
    assert_eq!(report.records.len(), 2);
}

#[test]
fn clear_reaches_markers_in_hidden_directories() {
    let lib = Library::new();
    assert!(!lib.library.include_hidden);
    let stashed = lib.root().join(".stash/Old Album");
    touch(lib.root(), ".stash/Old Album/01 Song.mp3");

    let engine = lib.engine();
    engine.confirm(&stashed).unwrap();
    assert!(engine.is_confirmed(&stashed));
    assert_eq!(engine.clear(lib.root()).unwrap(), 1);
    assert!(!engine.is_confirmed(&stashed));
}

#[test]
fn parallel_scan_keeps_album_order() {
    let mut lib = Library::new();
    lib.audit.jobs = Some(4);
    for i in 0..12 {
        touch(lib.root(), &format!("Artist/Album {i:02}/01 Song.mp3"));
    }

    let report = lib.engine().audit(lib.root());
    let dirs: Vec<_> = report.records.iter().map(|r| r.album_dir.clone()).collect();
    let expected: Vec<_> = (0..12)
        .map(|i| lib.root().join(format!("Artist/Album {i:02}")))
        .collect();
    assert_eq!(dirs, expected);
}

/// Records the size of the pool each tag read runs on.
#[derive(Default)]
struct PoolSizeTags {
    seen: std::sync::Mutex<Vec<usize>>,
}

impl TagStore for PoolSizeTags {
    fn read_tags(&self, _: &Path) -> Option<StoredTags> {
        self.seen.lock().unwrap().push(rayon::current_num_threads());
        None
    }

    fn write_tags(&self, _: &Path, _: &crate::metadata::TrackMetadata) -> Result<()> {
        Ok(())
    }
}

#[test]
fn scan_runs_on_a_pool_sized_from_jobs() {
    let mut lib = Library::new();
    lib.audit.jobs = Some(3);
    for i in 0..5 {
        touch(lib.root(), &format!("Artist/Album {i}/01 Song.mp3"));
    }

    let tags = PoolSizeTags::default();
    let engine = AuditEngine::new(&lib.fs, &tags, &lib.library, &lib.audit);
    let report = engine.audit(lib.root());

    assert_eq!(report.records.len(), 5);
    let seen = tags.seen.lock().unwrap();
    assert!(!seen.is_empty());
    assert!(seen.iter().all(|n| *n == 3), "{seen:?}");
}

#[test]
fn report_serializes_to_toml() {
    let lib = Library::new();
    touch(lib.root(), "Artist/Bad/3. x.mp3");
    let report = lib.engine().audit(lib.root());

    let text = report.to_toml().unwrap();
    assert!(text.contains("tags_incomplete = true"), "{text}");
    assert!(text.contains("[[records]]"), "{text}");
    let parsed: toml::Table = toml::from_str(&text).unwrap();
    assert_eq!(parsed["records"].as_array().map(Vec::len), Some(1));
}
