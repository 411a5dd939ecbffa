//! Detection-and-assembly pipeline orchestration.
//!
//! One call runs the whole pipeline strictly in sequence: compose the
//! module set (extraction + analysis when auto-detection is enabled), link
//! the runtime image into a scratch directory, publish it atomically. There
//! is no internal parallelism, retry, or timeout; each external tool blocks
//! until it exits and every fatal condition aborts the run immediately.

use crate::composer::{ComposeConfig, compose_modules};
use crate::config::BundleConfig;
use crate::error::{BundlerError, Result};
use crate::exec::ToolRunner;
use crate::image::build_image;
use crate::module_set::ModuleSet;
use crate::toolchain::{JdkTool, ToolchainResolver};
use camino::Utf8PathBuf;

/// Run the full bundling pipeline and return the published image path.
///
/// # Errors
///
/// Propagates every fatal pipeline error; see [`BundlerError`]. An empty
/// composed module set (possible only with auto-detection disabled) is
/// rejected before the linker is consulted.
pub fn run_bundle(
    config: &BundleConfig,
    resolver: &dyn ToolchainResolver,
    runner: &dyn ToolRunner,
) -> Result<Utf8PathBuf> {
    let modules = compose_bundle_modules(config, resolver, runner)?;

    if modules.is_empty() {
        return Err(BundlerError::EmptyModuleSet);
    }

    let jlink = resolver.resolve_executable(JdkTool::Jlink, config.release)?;
    build_image(
        runner,
        &jlink,
        &modules,
        &config.jlink_options,
        &config.output,
    )?;

    Ok(config.output.clone())
}

/// Compose the module set for `config`.
///
/// Exposed separately so a dry run can show the outcome of composition
/// without linking.
///
/// # Errors
///
/// Returns any composition error; see [`compose_modules`].
pub fn compose_bundle_modules(
    config: &BundleConfig,
    resolver: &dyn ToolchainResolver,
    runner: &dyn ToolRunner,
) -> Result<ModuleSet> {
    let compose = ComposeConfig {
        app_root: &config.app_root,
        explicit_modules: &config.modules,
        auto_detect: config.auto_detect,
        assume_spring_boot: config.spring_boot,
        release: config.release,
    };
    compose_modules(&compose, resolver, runner)
}
