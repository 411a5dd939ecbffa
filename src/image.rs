//! Runtime image assembly via the external `jlink` tool.
//!
//! The linker refuses to write into a pre-existing directory, so the image
//! is built in a uniquely named scratch directory sibling to the final
//! destination and then published atomically: replace-by-rename, with a
//! recursive copy as fallback when the rename fails (cross-device moves,
//! lock contention on Windows). A failed run never leaves the destination
//! in a partial or mixed state.

use crate::error::{BundlerError, Result};
use crate::exec::{ToolRunner, run_tool};
use crate::fsutil::{copy_dir_recursive, remove_dir_best_effort};
use crate::module_set::ModuleSet;
use camino::{Utf8Path, Utf8PathBuf};
use uuid::Uuid;

/// Build a runtime image for `modules` at `dest`.
///
/// `options` are passed through to the linker unchanged, ahead of the
/// `--add-modules` and `--output` flags.
///
/// # Errors
///
/// Returns [`BundlerError::ToolFailed`] when the linker exits non-zero
/// (with its scratch directory removed best-effort) and
/// [`BundlerError::Filesystem`] when publication fails. A publication
/// failure leaves any previously existing destination untouched.
pub fn build_image(
    runner: &dyn ToolRunner,
    jlink: &Utf8Path,
    modules: &ModuleSet,
    options: &[String],
    dest: &Utf8Path,
) -> Result<()> {
    let parent = dest.parent().unwrap_or(Utf8Path::new("."));
    std::fs::create_dir_all(parent).map_err(|e| BundlerError::Filesystem {
        path: parent.to_owned(),
        reason: format!("cannot create parent directory: {e}"),
    })?;

    // The scratch path must not exist yet; jlink creates it.
    let scratch = scratch_path(dest);

    let args = linker_args(options, modules, &scratch);
    let outcome = run_tool(runner, "jlink", jlink.as_str(), &args)?;

    if !outcome.success() {
        remove_dir_best_effort(&scratch);
        return Err(BundlerError::ToolFailed {
            tool: "jlink",
            exit_code: outcome.exit_code,
            stdout: outcome.stdout,
            stderr: outcome.stderr,
        });
    }

    publish_atomically(&scratch, dest)?;
    log::info!("runtime image published to {dest}");
    Ok(())
}

/// Unique scratch location sibling to `dest`.
fn scratch_path(dest: &Utf8Path) -> Utf8PathBuf {
    let parent = dest.parent().unwrap_or(Utf8Path::new("."));
    let name = dest.file_name().unwrap_or("runtime");
    parent.join(format!("{name}.tmp-{}", Uuid::new_v4()))
}

/// Compose the `jlink` argument list.
fn linker_args(options: &[String], modules: &ModuleSet, scratch: &Utf8Path) -> Vec<String> {
    let mut args: Vec<String> = options.to_vec();
    args.push("--add-modules".to_owned());
    args.push(modules.to_comma_list());
    args.push("--output".to_owned());
    args.push(scratch.as_str().to_owned());
    args
}

/// Publish `scratch` as `dest`, replacing any existing destination in full.
///
/// If an existing destination cannot be removed, the scratch directory is
/// cleaned up and the destination is left in its prior state. A failed
/// rename falls back to [`fallback_copy`].
///
/// # Errors
///
/// Returns [`BundlerError::Filesystem`] when removal, rename, and copy all
/// leave no way to publish.
pub fn publish_atomically(scratch: &Utf8Path, dest: &Utf8Path) -> Result<()> {
    if dest.exists() {
        if let Err(e) = std::fs::remove_dir_all(dest) {
            // Rare but possible (file locks, antivirus): fail without
            // touching the destination any further.
            remove_dir_best_effort(scratch);
            return Err(BundlerError::Filesystem {
                path: dest.to_owned(),
                reason: format!("cannot replace existing runtime image: {e}"),
            });
        }
    }

    if std::fs::rename(scratch, dest).is_err() {
        fallback_copy(scratch, dest)?;
    }

    Ok(())
}

/// Copy-based publication used when a direct rename is not possible.
fn fallback_copy(scratch: &Utf8Path, dest: &Utf8Path) -> Result<()> {
    log::debug!("rename failed; copying {scratch} into {dest}");
    match copy_dir_recursive(scratch.as_std_path(), dest.as_std_path()) {
        Ok(()) => {
            remove_dir_best_effort(scratch);
            Ok(())
        }
        Err(e) => {
            remove_dir_best_effort(scratch);
            Err(BundlerError::Filesystem {
                path: dest.to_owned(),
                reason: format!("copy fallback failed: {e}"),
            })
        }
    }
}
