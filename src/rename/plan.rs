use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::grammar;
use crate::layout::dir_name;

/// One move from a current path to its target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenamePair {
    pub from: PathBuf,
    pub to: PathBuf,
}

impl RenamePair {
    pub fn new(from: impl Into<PathBuf>, to: impl Into<PathBuf>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }

    pub fn is_noop(&self) -> bool {
        self.from == self.to
    }
}

/// Directory moves first, then the file moves, both in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenamePlan {
    pub directories: Vec<RenamePair>,
    pub files: Vec<RenamePair>,
}

/// Derive directory moves from file moves.
///
/// A source directory whose files all target the same directory is moved
/// as a whole. When that directory is a disc folder keeping its `CDn` name
/// and every disc of the album agrees, the album directory is moved instead.
/// File pairs are kept as given; the renamer re-bases them onto moved
/// directories.
pub fn plan_renames(pairs: &[RenamePair]) -> RenamePlan {
    let mut order: Vec<PathBuf> = Vec::new();
    let mut targets: HashMap<PathBuf, Option<PathBuf>> = HashMap::new();
    for pair in pairs {
        let (Some(src), Some(dst)) = (pair.from.parent(), pair.to.parent()) else {
            continue;
        };
        match targets.get_mut(src) {
            Some(slot) => {
                if slot.as_deref() != Some(dst) {
                    *slot = None;
                }
            }
            None => {
                order.push(src.to_path_buf());
                targets.insert(src.to_path_buf(), Some(dst.to_path_buf()));
            }
        }
    }
    let agreed = |dir: &Path| targets.get(dir).cloned().flatten();

    let mut directories: Vec<RenamePair> = Vec::new();
    for src in &order {
        let Some(dst) = agreed(src) else {
            continue;
        };
        if !movable(src, &dst) || directories.iter().any(|d| src.starts_with(&d.from)) {
            continue;
        }
        let album = album_move(src, &dst, &order, &agreed);
        let pair = album.unwrap_or_else(|| RenamePair::new(src.clone(), dst));
        if !directories.contains(&pair) {
            directories.push(pair);
        }
    }

    RenamePlan {
        directories,
        files: pairs.to_vec(),
    }
}

fn movable(src: &Path, dst: &Path) -> bool {
    src != dst && !dst.starts_with(src) && !src.starts_with(dst)
}

fn is_disc_dir(dir: &Path) -> bool {
    grammar::disc_segment(dir_name(dir)).is_some()
}

/// The album-level move for a disc folder, if every disc of the album agrees.
fn album_move(
    src: &Path,
    dst: &Path,
    order: &[PathBuf],
    agreed: &dyn Fn(&Path) -> Option<PathBuf>,
) -> Option<RenamePair> {
    if !is_disc_dir(src) || dir_name(src) != dir_name(dst) {
        return None;
    }
    let (album_src, album_dst) = (src.parent()?, dst.parent()?);
    if !movable(album_src, album_dst) {
        return None;
    }
    let consistent = order
        .iter()
        .filter(|k| k.as_path() == album_src || k.parent() == Some(album_src))
        .all(|k| {
            let expected = if k.as_path() == album_src {
                album_dst.to_path_buf()
            } else {
                album_dst.join(dir_name(k))
            };
            agreed(k) == Some(expected)
        });
    consistent.then(|| RenamePair::new(album_src, album_dst))
}

/// `path` re-based from `from` onto `to`, when it lies under `from`.
pub(super) fn rebase(path: &Path, from: &Path, to: &Path) -> Option<PathBuf> {
    let rest = path.strip_prefix(from).ok()?;
    if rest.as_os_str().is_empty() {
        Some(to.to_path_buf())
    } else {
        Some(to.join(rest))
    }
}
