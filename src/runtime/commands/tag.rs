use std::path::{Path, PathBuf};

use tracing::warn;

use crate::error::{Error, Result};
use crate::library;
use crate::metadata::{Extractor, Field, TrackMetadata};
use crate::prompt::{self, InteractiveResolver, StdinResolver};
use crate::tags::{TagStore, fill_missing};

use super::{CmdResult, Context};

/// The tag a file should end up with, next to the one it has.
#[derive(Debug)]
pub struct TagUpdate {
    pub path: PathBuf,
    pub before: TrackMetadata,
    pub after: TrackMetadata,
}

impl TagUpdate {
    pub fn changed_fields(&self) -> Vec<Field> {
        Field::ALL
            .into_iter()
            .filter(|f| self.before.get(*f) != self.after.get(*f))
            .collect()
    }
}

/// Work out the filled-in tag for `path`; `Ok(None)` when nothing is missing.
pub fn plan_file(
    extractor: &Extractor<'_>,
    path: &Path,
    resolver: Option<&mut dyn InteractiveResolver>,
) -> Result<Option<TagUpdate>> {
    let before = extractor
        .tag_store()
        .read_tags(path)
        .map(|s| s.metadata)
        .unwrap_or_else(|| TrackMetadata::new(path));

    let extraction = extractor.extract_with(path, Some(&before));
    let extraction = match resolver {
        Some(resolver) => prompt::resolve_interactively(extraction, resolver)?,
        None => extraction.require_resolved()?,
    };

    let after = fill_missing(&before, &extraction.metadata);
    if after == before {
        return Ok(None);
    }
    Ok(Some(TagUpdate {
        path: path.to_path_buf(),
        before,
        after,
    }))
}

pub fn run(cx: &Context, dir: &Path, apply: bool, no_prompt: bool) -> CmdResult {
    let extractor = Extractor::new(&cx.fs, &cx.tags, &cx.settings.library);
    let mut stdin = StdinResolver::stdio();
    let (mut updated, mut skipped) = (0usize, 0usize);

    for path in library::audio_files_under(&cx.fs, dir, &cx.settings.library) {
        let resolver: Option<&mut dyn InteractiveResolver> =
            if no_prompt { None } else { Some(&mut stdin) };
        let update = match plan_file(&extractor, &path, resolver) {
            Ok(Some(u)) => u,
            Ok(None) => continue,
            Err(e @ (Error::AmbiguousMetadata { .. } | Error::Cancelled { .. })) => {
                warn!(target: "extract", "{e}");
                skipped += 1;
                continue;
            }
            Err(e) => return Err(e.into()),
        };

        println!("{}", path.display());
        for field in update.changed_fields() {
            println!("  {:<12} {}", field.name(), update.after.get(field));
        }
        if apply {
            match cx.tags.write_tags(&update.path, &update.after) {
                Ok(()) => updated += 1,
                Err(e) => eprintln!("failed     {e}"),
            }
        } else {
            updated += 1;
        }
    }

    let verb = if apply { "updated" } else { "would be updated" };
    println!("{updated} file(s) {verb}, {skipped} skipped");
    Ok(())
}
