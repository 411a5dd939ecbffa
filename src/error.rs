//! Error types for the runtime bundler.
//!
//! This module defines semantic error variants for every fatal condition in
//! the detection-and-assembly pipeline. Subprocess failures always carry the
//! captured stdout and stderr verbatim so that a failed `jdeps` or `jlink`
//! run can be diagnosed from the error alone.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors that can occur while assembling a bundled runtime image.
#[derive(Debug, Error)]
pub enum BundlerError {
    /// A JDK tool executable was not found at the resolved location.
    #[error("{tool} not found at {path} ({hint})")]
    ToolNotFound {
        /// Name of the missing tool.
        tool: &'static str,
        /// Path that was probed.
        path: Utf8PathBuf,
        /// Recovery hint for the user.
        hint: &'static str,
    },

    /// No usable JDK installation could be located.
    #[error("JDK location unavailable: {reason}")]
    JavaHomeUnavailable {
        /// Description of why resolution failed.
        reason: String,
    },

    /// The application artifact was not found at the expected location.
    #[error("application artifact not found at {path}")]
    ArtifactMissing {
        /// Path where `app.jar` was expected.
        path: Utf8PathBuf,
    },

    /// An external tool could not be spawned at all.
    #[error("failed to launch {tool}: {reason}")]
    ToolLaunchFailed {
        /// Name of the tool that failed to start.
        tool: &'static str,
        /// Description of the spawn failure.
        reason: String,
    },

    /// An external tool ran but exited non-zero.
    #[error("{tool} failed (exit={exit_code})\nSTDOUT:\n{stdout}\nSTDERR:\n{stderr}")]
    ToolFailed {
        /// Name of the tool that failed.
        tool: &'static str,
        /// Exit code reported by the tool (-1 when killed by a signal).
        exit_code: i32,
        /// Captured standard output, verbatim.
        stdout: String,
        /// Captured standard error, verbatim.
        stderr: String,
    },

    /// Nested archive extraction failed.
    #[error("failed to extract nested archives from {archive}: {reason}")]
    Extraction {
        /// The fat artifact being unpacked.
        archive: Utf8PathBuf,
        /// Description of the extraction failure.
        reason: String,
    },

    /// A filesystem operation failed during composition or publication.
    #[error("filesystem operation failed at {path}: {reason}")]
    Filesystem {
        /// Path the operation was acting on.
        path: Utf8PathBuf,
        /// Description of the underlying failure.
        reason: String,
    },

    /// The configuration file could not be read or parsed.
    #[error("invalid configuration at {path}: {reason}")]
    InvalidConfig {
        /// Path to the offending configuration file.
        path: Utf8PathBuf,
        /// Description of the parse error.
        reason: String,
    },

    /// No modules were selected and auto-detection is disabled.
    #[error("module set is empty; enable auto-detection or configure modules")]
    EmptyModuleSet,

    /// An I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using [`BundlerError`].
pub type Result<T> = std::result::Result<T, BundlerError>;
