use std::path::Path;

use crate::metadata::Extractor;
use crate::organize::{group_albums, place_album};
use crate::rename::{RenamePair, Renamer};

use super::{CmdResult, Context, print_rename_report};

pub fn run(cx: &Context, dir: &Path, apply: bool) -> CmdResult {
    let extractor = Extractor::new(&cx.fs, &cx.tags, &cx.settings.library);
    let mut pairs: Vec<RenamePair> = Vec::new();
    let mut unplaceable = 0usize;

    for (_, files) in group_albums(&cx.fs, dir, &cx.settings.library) {
        for placement in place_album(&extractor, &files) {
            if let Err(e) = &placement.target {
                eprintln!("skipped    {}: {e}", placement.source.display());
                unplaceable += 1;
                continue;
            }
            if let Some(pair) = placement.rename_pair() {
                pairs.push(pair);
            }
        }
    }

    if pairs.is_empty() {
        println!("everything under {} is in place", dir.display());
        return Ok(());
    }
    if !apply {
        for pair in &pairs {
            println!("{}\n  -> {}", pair.from.display(), pair.to.display());
        }
        println!(
            "{} file(s) would move, {unplaceable} could not be placed; pass --apply to rename",
            pairs.len()
        );
        return Ok(());
    }

    let report = Renamer::new(&cx.fs)
        .with_deadline(cx.deadline)
        .execute(&pairs);
    print_rename_report(&report);
    Ok(())
}
