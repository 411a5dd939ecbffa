//! Module set composition.
//!
//! Merges detected modules, user-configured modules, the unconditional
//! safety addition, and the framework heuristic into the final list handed
//! to the linker. When auto-detection is enabled this drives nested-archive
//! extraction and the dependency analyzer; when disabled the configured list
//! is used as-is.

use crate::analyzer::detect_modules;
use crate::error::{BundlerError, Result};
use crate::exec::ToolRunner;
use crate::extractor::{NESTED_ARCHIVE_SUFFIX, extract_nested_archives};
use crate::module_set::{ModuleName, ModuleSet};
use crate::toolchain::{JdkTool, ToolchainResolver};
use camino::{Utf8Path, Utf8PathBuf};

/// Filename of the required root artifact under the app root.
pub const APP_ARTIFACT_NAME: &str = "app.jar";

/// Directory of auxiliary dependency archives under the app root.
pub const AUX_LIB_DIR: &str = "lib";

/// Safety module added unconditionally in auto-detect mode.
///
/// The analyzer frequently misses runtime-loaded security providers, and a
/// runtime without TLS elliptic-curve support fails in hard-to-diagnose
/// ways. Reproduced as observed behaviour; do not extend without the
/// original justification.
pub const SAFETY_MODULE: &str = "jdk.crypto.ec";

/// Heuristic module added for self-bootstrapping composite archives.
///
/// The detection tool has a known gap for that packaging style; this is a
/// documented workaround, not a general rule.
pub const FRAMEWORK_HEURISTIC_MODULE: &str = "java.desktop";

/// Marker entries identifying the self-bootstrapping packaging convention.
pub const SPRING_BOOT_MARKERS: &[&str] = &[
    "org/springframework/boot/SpringApplication.class",
    "org/springframework/boot/loader/launch/Launcher.class",
    "org/springframework/boot/loader/JarLauncher.class",
];

/// Packaging flavour of the application artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactFlavor {
    /// Ordinary jar; no heuristic additions apply.
    Plain,
    /// Spring Boot style composite archive.
    SpringBoot,
}

/// Inputs to module set composition.
#[derive(Debug, Clone)]
pub struct ComposeConfig<'a> {
    /// Directory containing `app.jar` and the optional `lib/` directory.
    pub app_root: &'a Utf8Path,
    /// User-configured explicit modules.
    pub explicit_modules: &'a [String],
    /// Whether to run the detection pipeline.
    pub auto_detect: bool,
    /// Assert the Spring Boot flavour instead of probing the artifact.
    pub assume_spring_boot: bool,
    /// Target release for multi-release jar analysis.
    pub release: u32,
}

/// Probe the artifact's entry table for known framework markers.
///
/// I/O or archive errors degrade to [`ArtifactFlavor::Plain`]: the probe is
/// a heuristic and must not fail an otherwise healthy composition.
#[must_use]
pub fn detect_flavor(artifact: &Utf8Path) -> ArtifactFlavor {
    let Ok(file) = std::fs::File::open(artifact) else {
        return ArtifactFlavor::Plain;
    };
    let Ok(zip) = zip::ZipArchive::new(file) else {
        log::debug!("{artifact} is not a readable archive; assuming plain packaging");
        return ArtifactFlavor::Plain;
    };

    let mut names = zip.file_names();
    if names.any(|name| SPRING_BOOT_MARKERS.contains(&name)) {
        ArtifactFlavor::SpringBoot
    } else {
        ArtifactFlavor::Plain
    }
}

/// Compose the final module set.
///
/// With auto-detection disabled the result is exactly the configured module
/// list, de-duplicated with first-occurrence order preserved. With
/// auto-detection enabled, detected modules come first, then configured
/// extras, then the safety addition and any heuristic additions. The
/// extraction scratch directory is removed on every exit path.
///
/// # Errors
///
/// Returns [`BundlerError::ArtifactMissing`] when `app.jar` is absent,
/// plus any toolchain, extraction, or analysis error.
pub fn compose_modules(
    config: &ComposeConfig<'_>,
    resolver: &dyn ToolchainResolver,
    runner: &dyn ToolRunner,
) -> Result<ModuleSet> {
    if !config.auto_detect {
        return Ok(config
            .explicit_modules
            .iter()
            .map(|m| ModuleName::from(m.as_str()))
            .collect());
    }

    let artifact = config.app_root.join(APP_ARTIFACT_NAME);
    if !artifact.is_file() {
        return Err(BundlerError::ArtifactMissing { path: artifact });
    }

    // Scratch directory for nested jars, unique per run so concurrent
    // builds never share a path. Dropped (best-effort) on every exit path.
    let scratch = tempfile::Builder::new()
        .prefix(".jdeps-nested-")
        .tempdir_in(config.app_root)
        .map_err(|e| BundlerError::Filesystem {
            path: config.app_root.to_owned(),
            reason: format!("cannot create extraction scratch directory: {e}"),
        })?;
    let scratch_path =
        Utf8PathBuf::try_from(scratch.path().to_path_buf()).map_err(|e| {
            BundlerError::Filesystem {
                path: config.app_root.to_owned(),
                reason: format!("scratch directory path is not valid UTF-8: {e}"),
            }
        })?;

    let mut classpath = auxiliary_jars(config.app_root)?;
    classpath.extend(extract_nested_archives(&artifact, &scratch_path)?);

    let jdeps = resolver.resolve_executable(JdkTool::Jdeps, config.release)?;
    let mut modules = detect_modules(runner, &jdeps, &artifact, &classpath, config.release)?;

    modules.extend(
        config
            .explicit_modules
            .iter()
            .map(|m| ModuleName::from(m.as_str())),
    );

    modules.insert(ModuleName::from(SAFETY_MODULE));

    let flavor = if config.assume_spring_boot {
        ArtifactFlavor::SpringBoot
    } else {
        detect_flavor(&artifact)
    };
    if flavor == ArtifactFlavor::SpringBoot {
        modules.insert(ModuleName::from(FRAMEWORK_HEURISTIC_MODULE));
    }

    log::info!("detected module set: {}", modules.to_comma_list());
    Ok(modules)
}

/// Collect `lib/*.jar` under the app root, sorted for a stable classpath.
fn auxiliary_jars(app_root: &Utf8Path) -> Result<Vec<Utf8PathBuf>> {
    let lib_dir = app_root.join(AUX_LIB_DIR);
    if !lib_dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut jars = Vec::new();
    for entry in lib_dir.read_dir_utf8().map_err(|e| BundlerError::Filesystem {
        path: lib_dir.clone(),
        reason: e.to_string(),
    })? {
        let entry = entry.map_err(|e| BundlerError::Filesystem {
            path: lib_dir.clone(),
            reason: e.to_string(),
        })?;
        let path = entry.path();
        if path.as_str().ends_with(NESTED_ARCHIVE_SUFFIX) && path.is_file() {
            jars.push(path.to_owned());
        }
    }

    jars.sort();
    Ok(jars)
}
