//! Write [`TrackMetadata`] back into a file's primary tag.

use std::path::Path;

use lofty::config::WriteOptions;
use lofty::file::TaggedFileExt;
use lofty::prelude::*;
use lofty::tag::{ItemKey, Tag};
use tracing::debug;

use super::util::{parse_slash_pair, year_of};
use crate::error::{Error, Result};
use crate::metadata::TrackMetadata;

fn tag_error(path: &Path, e: impl std::fmt::Display) -> Error {
    Error::Tags {
        path: path.to_path_buf(),
        message: e.to_string(),
    }
}

// Compares the way the reader parses, so "3/12" holds track "3" and
// "2019-05-01" holds year "2019".
fn already_holds(tag: &Tag, key: ItemKey, value: &str) -> bool {
    let Some(existing) = tag.get_string(key) else {
        return false;
    };
    match key {
        ItemKey::TrackNumber | ItemKey::DiscNumber | ItemKey::TrackTotal | ItemKey::DiscTotal => {
            parse_slash_pair(existing).0 == value
        }
        ItemKey::RecordingDate => year_of(existing) == value,
        _ => existing.trim() == value,
    }
}

pub(super) fn write_metadata(path: &Path, metadata: &TrackMetadata) -> Result<()> {
    let mut tagged = lofty::read_from_path(path).map_err(|e| tag_error(path, e))?;
    let tag_type = tagged.primary_tag_type();

    let tag = match tagged.tag_mut(tag_type) {
        Some(t) => t,
        None => {
            tagged.insert_tag(Tag::new(tag_type));
            tagged
                .tag_mut(tag_type)
                .ok_or_else(|| tag_error(path, format!("{tag_type:?} tags unsupported")))?
        }
    };

    let fields = [
        (ItemKey::TrackTitle, &metadata.title),
        (ItemKey::TrackArtist, &metadata.artist),
        (ItemKey::AlbumTitle, &metadata.album),
        (ItemKey::AlbumArtist, &metadata.album_artist),
        (ItemKey::Genre, &metadata.genre),
        (ItemKey::RecordingDate, &metadata.year),
        (ItemKey::TrackNumber, &metadata.track),
        (ItemKey::TrackTotal, &metadata.total_tracks),
        (ItemKey::DiscNumber, &metadata.disk),
        (ItemKey::DiscTotal, &metadata.total_disks),
    ];

    let mut written = 0usize;
    for (key, value) in fields {
        let value = value.trim();
        if value.is_empty() || already_holds(tag, key, value) {
            continue;
        }
        tag.insert_text(key, value.to_string());
        written += 1;
    }

    if written > 0 {
        tag.save_to_path(path, WriteOptions::default())
            .map_err(|e| tag_error(path, e))?;
    }
    debug!(target: "tags", path = %path.display(), written, "tags written");
    Ok(())
}
