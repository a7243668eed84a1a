use std::fs;
use std::path::{Path, PathBuf};

use crate::audit::{AlbumChecks, AlbumState, AuditEngine, AuditRecord};
use crate::error::Error;

use super::{CmdResult, Context};

fn engine(cx: &Context) -> AuditEngine<'_> {
    AuditEngine::new(&cx.fs, &cx.tags, &cx.settings.library, &cx.settings.audit)
}

fn problems(checks: AlbumChecks, record: &AuditRecord) -> String {
    let mut out = Vec::new();
    if !checks.tags_ok {
        out.push(format!("tags ({})", record.offending.tags.len()));
    }
    if !checks.paths_ok {
        out.push(format!("paths ({})", record.offending.paths.len()));
    }
    if !checks.cover_ok {
        out.push("cover".to_string());
    }
    out.join(", ")
}

pub fn run(cx: &Context, root: &Path, report_path: Option<&Path>) -> CmdResult {
    let engine = engine(cx);
    let report = engine.audit(root);

    for record in report.issues() {
        if let AlbumState::Scanned(checks) = engine.state(&record.album_dir, Some(record)) {
            println!("{}  [{}]", record.album_dir.display(), problems(checks, record));
        }
    }
    println!(
        "{} album(s) scanned, {} with issues, {} confirmed and skipped",
        report.records.len(),
        report.issues().count(),
        report.confirmed.len()
    );

    if let Some(path) = report_path {
        fs::write(path, report.to_toml()?).map_err(|e| Error::fs(path, e))?;
        println!("report written to {}", path.display());
    }
    Ok(())
}

pub fn confirm(cx: &Context, album_dirs: &[PathBuf]) -> CmdResult {
    let engine = engine(cx);
    for dir in album_dirs {
        if engine.state(dir, None) == AlbumState::Confirmed {
            println!("already    {}", dir.display());
            continue;
        }
        engine.confirm(dir)?;
        println!("confirmed  {}", dir.display());
    }
    Ok(())
}

pub fn clear(cx: &Context, root: &Path) -> CmdResult {
    let removed = engine(cx).clear(root)?;
    println!("{removed} marker(s) removed under {}", root.display());
    Ok(())
}
