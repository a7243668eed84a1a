use std::path::{Path, PathBuf};

use tempfile::tempdir;

use super::consensus::*;
use super::extract::*;
use super::model::*;
use super::*;
use crate::config::LibrarySettings;
use crate::error::Error;
use crate::layout::{LibraryLayout, classify};
use crate::library::StdFilesystem;
use crate::test_support::{MemoryTags, touch};

fn detached(path: &str, known: Option<&TrackMetadata>) -> Extraction {
    let path = Path::new(path);
    let c = classify(path);
    Extraction::from_context(&ExtractContext::detached(path, &c, known))
}

#[test]
fn plain_path_yields_directory_fields() {
    let e = detached("/m/Artist/[2019] Album/03 Song.mp3", None);
    let m = &e.metadata;
    assert_eq!(m.title, "Song");
    assert_eq!(m.track, "3");
    assert_eq!(m.album, "Album");
    assert_eq!(m.album_artist, "Artist");
    assert_eq!(m.year, "2019");
    assert_eq!(m.disk, "1");
    assert_eq!(m.total_disks, "1");
    // No tag, no year-artist-album anywhere: falls back to the album artist.
    assert_eq!(m.artist, "Artist");
    assert_eq!(e.provenance(Field::Title), Provenance::FromFilename);
    assert_eq!(e.provenance(Field::Artist), Provenance::FromDirectory);
    assert_eq!(e.provenance(Field::Disk), Provenance::Defaulted);
    assert!(!e.is_ambiguous());
}

#[test]
fn existing_tag_wins_for_artist_but_not_title() {
    let known = TrackMetadata {
        title: "Tagged".into(),
        artist: "Tag Artist".into(),
        ..TrackMetadata::default()
    };
    let e = detached("/m/Artist/[2019] Album/03 Song.mp3", Some(&known));
    assert_eq!(e.metadata.title, "Song");
    assert_eq!(e.metadata.artist, "Tag Artist");
    assert_eq!(e.provenance(Field::Artist), Provenance::FromExistingTag);
}

#[test]
fn title_falls_back_to_tag_then_stem() {
    let known = TrackMetadata {
        title: "From Tag".into(),
        track: "07".into(),
        ..TrackMetadata::default()
    };
    let e = detached("/m/Artist/[2019] Album/untitled.mp3", Some(&known));
    assert_eq!(e.metadata.title, "From Tag");
    assert_eq!(e.metadata.track, "7");
    assert_eq!(e.provenance(Field::Track), Provenance::FromExistingTag);
    assert!(!e.is_ambiguous());

    let e = detached("/m/Artist/[2019] Album/untitled.mp3", None);
    assert_eq!(e.metadata.title, "untitled");
    assert_eq!(e.provenance(Field::Title), Provenance::Defaulted);
    assert_eq!(e.provenance(Field::Track), Provenance::Unresolved);
    assert_eq!(e.missing_required(), vec!["title", "track"]);
}

#[test]
fn require_resolved_reports_ambiguous_metadata() {
    let e = detached("/m/Artist/[2019] Album/untitled.mp3", None);
    match e.require_resolved() {
        Err(Error::AmbiguousMetadata { path, missing }) => {
            assert_eq!(path, PathBuf::from("/m/Artist/[2019] Album/untitled.mp3"));
            assert_eq!(missing, vec!["title", "track"]);
        }
        other => panic!("expected ambiguity, got {other:?}"),
    }
}

#[test]
fn supplied_values_clear_ambiguity() {
    let mut e = detached("/m/Artist/[2019] Album/untitled.mp3", None);
    e.supply(Field::Title, " Real Title ");
    e.supply(Field::Track, "4");
    assert_eq!(e.metadata.title, "Real Title");
    assert_eq!(e.provenance(Field::Title), Provenance::UserSupplied);
    assert!(e.require_resolved().is_ok());
}

#[test]
fn label_single_scenario() {
    let e = detached("/m/Label/Singles/House/[2021] DJ A - Track/01 Track.mp3", None);
    assert_eq!(e.classification.layout, LibraryLayout::LabelSingle);
    let m = &e.metadata;
    assert_eq!(m.genre, "House");
    assert_eq!(m.album_artist, "Label");
    assert_eq!(m.album, "Track");
    assert_eq!(m.artist, "DJ A");
    assert_eq!(m.year, "2021");
    assert_eq!(e.provenance(Field::Genre), Provenance::FromDirectory);
}

#[test]
fn label_single_album_falls_back_to_genre_segment() {
    let e = detached("/m/Label/Singles/House/[2021]/01 Track.mp3", None);
    assert_eq!(e.metadata.album, "House");
}

#[test]
fn compilation_reads_artist_from_filename() {
    let e = detached("/m/Label/Compilations/[2015] Summer Mix/04 DJ B - Night.mp3", None);
    let m = &e.metadata;
    assert_eq!(m.title, "Night");
    assert_eq!(m.artist, "DJ B");
    assert_eq!(m.track, "4");
    assert_eq!(m.album, "Summer Mix");
    assert_eq!(m.album_artist, "Label");
    assert_eq!(e.provenance(Field::Artist), Provenance::FromFilename);
}

#[test]
fn plain_title_keeps_spaced_hyphen() {
    let e = detached("/m/Artist/[2019] Album/05 Intro - Reprise.mp3", None);
    assert_eq!(e.metadata.title, "Intro - Reprise");
}

#[test]
fn lp_parses_artist_and_album_from_dir() {
    let e = detached("/m/Label/LPs/[2018] Band - Record/CD2/01 Intro.flac", None);
    let m = &e.metadata;
    assert_eq!(m.artist, "Band");
    assert_eq!(m.album, "Record");
    assert_eq!(m.album_artist, "Label");
    assert_eq!(m.disk, "2");
    assert_eq!(m.year, "2018");
}

#[test]
fn artist_tier_walks_ancestors() {
    let path = Path::new("/m/[2010] Someone - Box Set/Extras/[2011] Rarities/01 Song.mp3");
    let c = classify(path);
    let cx = ExtractContext::detached(path, &c, None);
    assert_eq!(artist_from_album_dir(&cx), None);
    assert_eq!(artist_from_ancestors(&cx).as_deref(), Some("Someone"));
}

#[test]
fn missing_year_is_never_guessed() {
    let e = detached("/m/Artist/Album 2019/01 Song.mp3", None);
    assert_eq!(e.metadata.year, "");
    assert_eq!(e.metadata.album, "Album 2019");
    assert_eq!(e.provenance(Field::Year), Provenance::Unresolved);
}

#[test]
fn tier_lists_follow_layout() {
    let plain = tiers(Field::Title, LibraryLayout::Plain);
    let comp = tiers(Field::Title, LibraryLayout::LabelCompilation);
    assert_eq!(plain.len() + 1, comp.len());
    assert_eq!(plain[0].source, Provenance::FromFilename);
    assert_eq!(plain.last().unwrap().source, Provenance::Defaulted);

    let genre_single = tiers(Field::Genre, LibraryLayout::LabelSingle);
    assert_eq!(genre_single[0].source, Provenance::FromDirectory);
    let genre_plain = tiers(Field::Genre, LibraryLayout::Plain);
    assert_eq!(genre_plain[0].source, Provenance::FromExistingTag);
    assert_eq!(genre_plain.last().unwrap().source, Provenance::FromConsensus);
}

#[test]
fn extractor_counts_tracks_and_discs_on_disk() {
    let dir = tempdir().unwrap();
    let album = "Artist/[2020] Album";
    touch(dir.path(), &format!("{album}/CD1/01 One.mp3"));
    touch(dir.path(), &format!("{album}/CD2/01 Two.mp3"));
    touch(dir.path(), &format!("{album}/CD2/02 Song.mp3"));
    touch(dir.path(), &format!("{album}/CD2/cover.jpg"));

    let fs = StdFilesystem::default();
    let tags = MemoryTags::default();
    let settings = LibrarySettings::default();
    let extractor = Extractor::new(&fs, &tags, &settings);

    let e = extractor.extract(&dir.path().join(album).join("CD2").join("02 Song.mp3"));
    let m = &e.metadata;
    assert_eq!(m.title, "Song");
    assert_eq!(m.track, "2");
    assert_eq!(m.total_tracks, "2");
    assert_eq!(m.disk, "2");
    assert_eq!(m.total_disks, "2");
    assert_eq!(
        e.disc.map(|d| (d.disc_number, d.total_discs)),
        Some((2, 2))
    );
}

#[test]
fn lone_file_defaults_to_track_one() {
    let dir = tempdir().unwrap();
    let path = touch(dir.path(), "Artist/[2020] Single/Song.mp3");

    let fs = StdFilesystem::default();
    let tags = MemoryTags::default();
    let settings = LibrarySettings::default();
    let e = Extractor::new(&fs, &tags, &settings).extract(&path);

    assert_eq!(e.metadata.track, "1");
    assert_eq!(e.metadata.total_tracks, "1");
    assert_eq!(e.provenance(Field::Track), Provenance::Defaulted);
    // Title still only came from the bare stem.
    assert_eq!(e.missing_required(), vec!["title"]);
}

#[test]
fn genre_falls_back_to_sibling_consensus() {
    let dir = tempdir().unwrap();
    let a = touch(dir.path(), "Artist/[2018] First/01 A.mp3");
    let b = touch(dir.path(), "Artist/[2018] First/02 B.mp3");
    let c = touch(dir.path(), "Artist/[2019] Second/01 C.mp3");
    let target = touch(dir.path(), "Artist/[2020] Third/01 D.mp3");

    let tags = MemoryTags::default();
    tags.with_genre(&a, "Ambient");
    tags.with_genre(&b, "Techno");
    tags.with_genre(&c, "Techno");

    let fs = StdFilesystem::default();
    let settings = LibrarySettings::default();
    let extractor = Extractor::new(&fs, &tags, &settings);
    let e = extractor.extract(&target);
    assert_eq!(e.metadata.genre, "Techno");
    assert_eq!(e.provenance(Field::Genre), Provenance::FromConsensus);

    // Own tag beats consensus.
    tags.with_genre(&target, "Dub");
    let e = extractor.extract(&target);
    assert_eq!(e.metadata.genre, "Dub");
}

#[test]
fn common_artist_examples() {
    assert_eq!(common_artist(&["Daft Punk", "Daft Punk & Pharrell"]), "Daft Punk");
    assert_eq!(common_artist(&["A", "B"]), "");
    assert_eq!(common_artist::<&str>(&[]), "");
    assert_eq!(common_artist(&["", "Solo"]), "Solo");
    assert_eq!(
        common_artist(&["Guest & DJ A", "DJ A & Other", "The DJ A"]),
        "DJ A"
    );
    assert_eq!(common_artist(&["DJ A ft. B", "DJ A ft. C"]), "DJ A");
}

#[test]
fn common_genre_majority_with_first_seen_ties() {
    let tags = MemoryTags::default();
    let files: Vec<PathBuf> = (0..4).map(|i| PathBuf::from(format!("/m/{i}.mp3"))).collect();
    tags.with_genre(&files[0], "House");
    tags.with_genre(&files[1], "Techno");
    tags.with_genre(&files[2], "Techno");
    tags.with_genre(&files[3], "House");
    assert_eq!(common_genre(&files, &tags), "House");

    tags.with_genre(&files[3], "");
    assert_eq!(common_genre(&files, &tags), "Techno");

    assert_eq!(common_genre(&files[..0], &tags), "");
}

#[test]
fn genre_siblings_skip_label_contexts() {
    let dir = tempdir().unwrap();
    let plain = touch(dir.path(), "Artist/[2018] First/01 A.mp3");
    touch(dir.path(), "Artist/EPs/[2019] X - Y/01 B.mp3");

    let fs = StdFilesystem::default();
    let found = genre_siblings(&fs, &dir.path().join("Artist"), &LibrarySettings::default());
    assert_eq!(found, vec![plain]);
}
