//! JDK toolchain resolution.
//!
//! The pipeline needs absolute paths to two JDK tools: `jdeps` (dependency
//! analysis) and `jlink` (image linking). Resolution is abstracted behind
//! [`ToolchainResolver`] so tests can supply fixed paths; the shipped
//! implementation resolves against a JDK installation directory taken from
//! an explicit setting or the `JAVA_HOME` environment variable.

use crate::error::{BundlerError, Result};
use camino::{Utf8Path, Utf8PathBuf};

/// The JDK tools consumed by the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JdkTool {
    /// The dependency analysis tool (`jdeps`).
    Jdeps,
    /// The image linking tool (`jlink`).
    Jlink,
}

impl JdkTool {
    /// Name of the tool without any platform extension.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Jdeps => "jdeps",
            Self::Jlink => "jlink",
        }
    }

    /// Executable filename for the current platform.
    #[must_use]
    pub fn executable_name(self) -> String {
        #[cfg(windows)]
        {
            format!("{}.exe", self.name())
        }
        #[cfg(not(windows))]
        {
            self.name().to_owned()
        }
    }

    /// Recovery hint shown when the tool is missing.
    ///
    /// `jlink` only ships with a full development kit, so its hint calls
    /// that out explicitly.
    #[must_use]
    pub const fn missing_hint(self) -> &'static str {
        match self {
            Self::Jdeps => "make sure a JDK is installed at the configured location",
            Self::Jlink => "a full JDK is required; a JRE does not ship jlink",
        }
    }
}

/// Supplies absolute paths to JDK tool executables for a requested release.
pub trait ToolchainResolver {
    /// Resolve the executable for `tool`, targeting language `release`.
    ///
    /// # Errors
    ///
    /// Returns [`BundlerError::ToolNotFound`] when the executable does not
    /// exist on disk.
    fn resolve_executable(&self, tool: JdkTool, release: u32) -> Result<Utf8PathBuf>;
}

/// Resolver backed by a single JDK installation directory.
///
/// The directory is trusted to match the requested release; the resolver
/// only checks that the executables exist under `bin/`.
#[derive(Debug, Clone)]
pub struct JavaHomeToolchain {
    java_home: Utf8PathBuf,
}

impl JavaHomeToolchain {
    /// Create a resolver for an explicit JDK installation directory.
    #[must_use]
    pub fn new(java_home: impl Into<Utf8PathBuf>) -> Self {
        Self {
            java_home: java_home.into(),
        }
    }

    /// Create a resolver from the `JAVA_HOME` environment variable.
    ///
    /// # Errors
    ///
    /// Returns [`BundlerError::JavaHomeUnavailable`] when the variable is
    /// unset, empty, or not valid UTF-8.
    pub fn from_env() -> Result<Self> {
        match std::env::var("JAVA_HOME") {
            Ok(value) if !value.trim().is_empty() => Ok(Self::new(value)),
            Ok(_) => Err(BundlerError::JavaHomeUnavailable {
                reason: "JAVA_HOME is set but empty".to_owned(),
            }),
            Err(e) => Err(BundlerError::JavaHomeUnavailable {
                reason: format!("JAVA_HOME is not usable: {e}"),
            }),
        }
    }

    /// The JDK installation directory this resolver serves.
    #[must_use]
    pub fn java_home(&self) -> &Utf8Path {
        &self.java_home
    }
}

impl ToolchainResolver for JavaHomeToolchain {
    fn resolve_executable(&self, tool: JdkTool, release: u32) -> Result<Utf8PathBuf> {
        let path = self.java_home.join("bin").join(tool.executable_name());
        log::trace!(
            "resolving {} for release {release} at {path}",
            tool.name()
        );

        if !path.exists() {
            return Err(BundlerError::ToolNotFound {
                tool: tool.name(),
                path,
                hint: tool.missing_hint(),
            });
        }

        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn fake_jdk(tools: &[&str]) -> (tempfile::TempDir, Utf8PathBuf) {
        let temp = tempfile::tempdir().expect("temp dir");
        let home = Utf8PathBuf::try_from(temp.path().to_path_buf()).expect("utf-8 temp path");
        std::fs::create_dir_all(home.join("bin")).expect("create bin");
        for tool in tools {
            std::fs::write(home.join("bin").join(tool), b"#!/bin/sh\n").expect("write tool");
        }
        (temp, home)
    }

    #[rstest]
    #[case::jdeps(JdkTool::Jdeps, "jdeps")]
    #[case::jlink(JdkTool::Jlink, "jlink")]
    fn resolves_existing_tool(#[case] tool: JdkTool, #[case] name: &str) {
        let (_temp, home) = fake_jdk(&["jdeps", "jlink"]);
        let resolver = JavaHomeToolchain::new(home.clone());

        let path = resolver
            .resolve_executable(tool, 21)
            .expect("tool should resolve");
        assert_eq!(path, home.join("bin").join(name));
    }

    #[test]
    fn missing_jlink_hints_at_full_jdk() {
        let (_temp, home) = fake_jdk(&["jdeps"]);
        let resolver = JavaHomeToolchain::new(home);

        let err = resolver
            .resolve_executable(JdkTool::Jlink, 21)
            .expect_err("jlink should be missing");
        let msg = err.to_string();
        assert!(msg.contains("jlink"));
        assert!(msg.contains("full JDK"));
    }

    #[test]
    fn missing_jdeps_is_tool_not_found() {
        let (_temp, home) = fake_jdk(&[]);
        let resolver = JavaHomeToolchain::new(home);

        let err = resolver
            .resolve_executable(JdkTool::Jdeps, 21)
            .expect_err("jdeps should be missing");
        assert!(matches!(
            err,
            BundlerError::ToolNotFound { tool: "jdeps", .. }
        ));
    }

    #[cfg(not(windows))]
    #[test]
    fn executable_name_has_no_extension_on_unix() {
        assert_eq!(JdkTool::Jlink.executable_name(), "jlink");
    }
}
