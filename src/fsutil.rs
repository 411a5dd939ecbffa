//! Filesystem helpers shared by composition and publication.

use camino::Utf8Path;
use std::path::Path;

/// Remove a directory tree without reporting failures.
///
/// Cleanup of scratch directories is deliberately best-effort: a cleanup
/// failure must never override or obscure the primary success or failure
/// outcome of the run. A missing path counts as already cleaned.
pub fn remove_dir_best_effort(path: &Utf8Path) {
    if !path.exists() {
        return;
    }
    if let Err(e) = std::fs::remove_dir_all(path) {
        log::warn!("could not remove scratch directory {path}: {e}");
    }
}

/// Recursively copy `src` into `dest`, creating `dest` first.
///
/// Used as the publication fallback when a direct rename fails (for example
/// across devices or under lock contention on Windows).
///
/// # Errors
///
/// Returns the first I/O error encountered.
pub fn copy_dir_recursive(src: &Path, dest: &Path) -> std::io::Result<()> {
    std::fs::create_dir_all(dest)?;
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let target = dest.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            copy_dir_recursive(&entry.path(), &target)?;
        } else {
            std::fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}
