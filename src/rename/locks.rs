use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, LazyLock, Mutex};

type DirLock = Arc<Mutex<()>>;

// One lock per target directory, shared by every renamer in the process.
static LOCKS: LazyLock<Mutex<HashMap<PathBuf, DirLock>>> =
    LazyLock::new(|| Mutex::new(HashMap::new()));

/// The lock guarding mutations inside `dir`.
pub(super) fn dir_lock(dir: &Path) -> DirLock {
    let mut table = LOCKS.lock().unwrap_or_else(|e| e.into_inner());
    table
        .entry(dir.to_path_buf())
        .or_insert_with(|| Arc::new(Mutex::new(())))
        .clone()
}

/// Run `f` while holding the lock for `dir`.
pub(super) fn with_dir_lock<T>(dir: &Path, f: impl FnOnce() -> T) -> T {
    let lock = dir_lock(dir);
    let _guard = lock.lock().unwrap_or_else(|e| e.into_inner());
    f()
}
