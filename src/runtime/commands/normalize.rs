use std::path::Path;

use crate::library;
use crate::normalize::FilenameNormalizer;
use crate::rename::{RenamePair, Renamer};

use super::{CmdResult, Context, print_rename_report};

/// Rename pairs for every audio file in `dir` whose name is not normalized.
pub fn plan(cx: &Context, normalizer: &FilenameNormalizer, dir: &Path) -> Vec<RenamePair> {
    library::audio_files_in(&cx.fs, dir, &cx.settings.library)
        .into_iter()
        .filter_map(|path| {
            let name = path.file_name()?.to_str()?;
            let clean = normalizer.normalize(name);
            (clean != name).then(|| RenamePair::new(path.clone(), path.with_file_name(clean)))
        })
        .collect()
}

pub fn run(cx: &Context, dir: &Path, apply: bool) -> CmdResult {
    let normalizer = FilenameNormalizer::new(&cx.settings.normalize)?;
    let pairs = plan(cx, &normalizer, dir);

    if pairs.is_empty() {
        println!("nothing to normalize in {}", dir.display());
        return Ok(());
    }
    if !apply {
        for pair in &pairs {
            println!(
                "{}  ->  {}",
                file_name(&pair.from),
                file_name(&pair.to)
            );
        }
        println!("{} file(s) would be renamed; pass --apply to rename", pairs.len());
        return Ok(());
    }

    let report = Renamer::new(&cx.fs)
        .with_deadline(cx.deadline)
        .execute(&pairs);
    print_rename_report(&report);
    Ok(())
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}
