//! Minimal module closure detection via the external `jdeps` tool.
//!
//! The bundler never understands bytecode itself; it invokes `jdeps` in
//! "print minimal module list" mode and parses the single comma-separated
//! line it writes to stdout. Soft or missing dependencies are ignored
//! (`--ignore-missing-deps`), and multi-release jars are analysed at a fixed
//! target release so results do not depend on the analysing JVM.

use crate::error::{BundlerError, Result};
use crate::exec::{ToolRunner, run_tool};
use crate::module_set::{ModuleName, ModuleSet};
use camino::{Utf8Path, Utf8PathBuf};

/// Separator between classpath entries for JDK tools.
pub const CLASSPATH_SEPARATOR: &str = if cfg!(windows) { ";" } else { ":" };

/// Run `jdeps` against `artifact` and return the detected module set.
///
/// `classpath` may be empty; it is only passed when non-empty. A non-zero
/// exit is a fatal analysis failure carrying the captured output — it is
/// never degraded to an empty set.
///
/// # Errors
///
/// Returns [`BundlerError::ToolLaunchFailed`] if `jdeps` cannot be spawned
/// and [`BundlerError::ToolFailed`] if it exits non-zero.
pub fn detect_modules(
    runner: &dyn ToolRunner,
    jdeps: &Utf8Path,
    artifact: &Utf8Path,
    classpath: &[Utf8PathBuf],
    release: u32,
) -> Result<ModuleSet> {
    let args = analyzer_args(artifact, classpath, release);
    let outcome = run_tool(runner, "jdeps", jdeps.as_str(), &args)?;

    if !outcome.success() {
        return Err(BundlerError::ToolFailed {
            tool: "jdeps",
            exit_code: outcome.exit_code,
            stdout: outcome.stdout,
            stderr: outcome.stderr,
        });
    }

    Ok(parse_module_list(&outcome.stdout))
}

/// Compose the `jdeps` argument list.
fn analyzer_args(artifact: &Utf8Path, classpath: &[Utf8PathBuf], release: u32) -> Vec<String> {
    let mut args = vec![
        "--ignore-missing-deps".to_owned(),
        "--multi-release".to_owned(),
        release.to_string(),
    ];

    if !classpath.is_empty() {
        let joined: Vec<&str> = classpath.iter().map(|p| p.as_str()).collect();
        args.push("-cp".to_owned());
        args.push(joined.join(CLASSPATH_SEPARATOR));
    }

    args.push("--print-module-deps".to_owned());
    args.push(artifact.as_str().to_owned());
    args
}

/// Parse the analyzer's stdout: one comma-separated line of module names.
///
/// Whitespace around tokens is trimmed and empty tokens are dropped, so a
/// trailing newline or a stray double comma does not produce phantom
/// modules.
#[must_use]
pub fn parse_module_list(stdout: &str) -> ModuleSet {
    let line = stdout.trim();
    if line.is_empty() {
        return ModuleSet::new();
    }

    line.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(ModuleName::from)
        .collect()
}
