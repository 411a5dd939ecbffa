//! Nested archive extraction from fat application artifacts.
//!
//! Self-bootstrapping deployable jars embed their dependency jars inside
//! themselves. The dependency analyzer cannot look through that packaging,
//! so the embedded jars are copied out to discrete files first and handed to
//! the analyzer as a classpath. Extracted files are named
//! `<sequence>_<original-basename>` so that entries sharing a basename do
//! not collide. The caller owns the scratch directory and its cleanup.

use crate::error::{BundlerError, Result};
use camino::{Utf8Path, Utf8PathBuf};
use std::fs::File;

/// Suffix identifying a nested dependency archive inside the root artifact.
pub const NESTED_ARCHIVE_SUFFIX: &str = ".jar";

/// Extract every nested `.jar` entry of `archive` into `scratch_dir`.
///
/// The scratch directory is created if missing. Returns the list of
/// produced files in archive enumeration order.
///
/// # Errors
///
/// Returns [`BundlerError::Extraction`] if the scratch directory cannot be
/// created or an entry cannot be read or copied.
pub fn extract_nested_archives(
    archive: &Utf8Path,
    scratch_dir: &Utf8Path,
) -> Result<Vec<Utf8PathBuf>> {
    std::fs::create_dir_all(scratch_dir).map_err(|e| BundlerError::Extraction {
        archive: archive.to_owned(),
        reason: format!("cannot create scratch directory {scratch_dir}: {e}"),
    })?;

    let file = File::open(archive).map_err(|e| extraction_error(archive, &e))?;
    let mut zip = zip::ZipArchive::new(file).map_err(|e| extraction_error(archive, &e))?;

    let mut produced = Vec::new();
    let mut sequence = 0usize;

    for index in 0..zip.len() {
        let mut entry = zip
            .by_index(index)
            .map_err(|e| extraction_error(archive, &e))?;
        if entry.is_dir() || !entry.name().ends_with(NESTED_ARCHIVE_SUFFIX) {
            continue;
        }

        let Some(basename) = entry_basename(entry.name()) else {
            continue;
        };

        let target = scratch_dir.join(format!("{sequence}_{basename}"));
        sequence += 1;

        let mut out = File::create(&target).map_err(|e| extraction_error(archive, &e))?;
        std::io::copy(&mut entry, &mut out).map_err(|e| extraction_error(archive, &e))?;

        log::debug!("extracted nested jar: {target}");
        produced.push(target);
    }

    Ok(produced)
}

/// Final path component of a zip entry name (entry names always use `/`).
fn entry_basename(entry_name: &str) -> Option<&str> {
    let basename = entry_name.rsplit('/').next()?;
    if basename.is_empty() {
        None
    } else {
        Some(basename)
    }
}

fn extraction_error(archive: &Utf8Path, cause: &dyn std::fmt::Display) -> BundlerError {
    BundlerError::Extraction {
        archive: archive.to_owned(),
        reason: cause.to_string(),
    }
}
