//! Read a file's tag into [`StoredTags`].

use std::path::Path;

use lofty::file::TaggedFileExt;
use lofty::tag::{ItemKey, Tag};
use tracing::debug;

use super::StoredTags;
use super::util::{parse_slash_pair, year_of};
use crate::metadata::TrackMetadata;

pub(super) fn read_stored_tags(path: &Path) -> Option<StoredTags> {
    let tagged = match lofty::read_from_path(path) {
        Ok(t) => t,
        Err(e) => {
            debug!(target: "tags", path = %path.display(), error = %e, "unreadable tag");
            return None;
        }
    };
    let tag = tagged.primary_tag().or_else(|| tagged.first_tag())?;
    Some(StoredTags {
        metadata: metadata_from_tag(path, tag),
        pictures: tag.pictures().len(),
    })
}

fn text(tag: &Tag, key: ItemKey) -> String {
    tag.get_string(key).map(str::trim).unwrap_or("").to_string()
}

fn metadata_from_tag(path: &Path, tag: &Tag) -> TrackMetadata {
    let (track, track_total_inline) = parse_slash_pair(&text(tag, ItemKey::TrackNumber));
    let (disk, disk_total_inline) = parse_slash_pair(&text(tag, ItemKey::DiscNumber));

    let total_tracks = match parse_slash_pair(&text(tag, ItemKey::TrackTotal)).0 {
        t if t.is_empty() => track_total_inline,
        t => t,
    };
    let total_disks = match parse_slash_pair(&text(tag, ItemKey::DiscTotal)).0 {
        t if t.is_empty() => disk_total_inline,
        t => t,
    };

    let year = match year_of(&text(tag, ItemKey::RecordingDate)) {
        y if y.is_empty() => year_of(&text(tag, ItemKey::Year)),
        y => y,
    };

    TrackMetadata {
        title: text(tag, ItemKey::TrackTitle),
        artist: text(tag, ItemKey::TrackArtist),
        album: text(tag, ItemKey::AlbumTitle),
        album_artist: text(tag, ItemKey::AlbumArtist),
        genre: text(tag, ItemKey::Genre),
        year,
        track,
        total_tracks,
        disk,
        total_disks,
        source_file: path.to_path_buf(),
        target_file: None,
    }
}
