//! Narrow subprocess seam for external JDK tools.
//!
//! Every pipeline stage that spawns a process goes through [`ToolRunner`],
//! so tests can substitute a stub without spawning anything. Invocations are
//! fully synchronous: the entire stdout and stderr of the child are buffered
//! in memory before the call returns. Diagnostic output from `jdeps` and
//! `jlink` is bounded in practice; a pathologically verbose tool is a known
//! design limitation, not a handled case.

use crate::error::{BundlerError, Result};
use std::process::{Command, Output};

/// Abstraction for running external commands.
#[cfg_attr(test, mockall::automock)]
pub trait ToolRunner {
    /// Run `program` with `args`, blocking until it exits, and return the
    /// captured output.
    ///
    /// # Errors
    ///
    /// Returns an `std::io::Error` if the process cannot be spawned.
    fn run(&self, program: &str, args: &[String]) -> std::io::Result<Output>;
}

/// Production runner backed by [`std::process::Command`].
pub struct SystemToolRunner;

impl ToolRunner for SystemToolRunner {
    fn run(&self, program: &str, args: &[String]) -> std::io::Result<Output> {
        Command::new(program).args(args).output()
    }
}

/// Captured result of one external tool invocation.
#[derive(Debug, Clone)]
pub struct ToolOutcome {
    /// Exit code reported by the tool (-1 when terminated by a signal).
    pub exit_code: i32,
    /// Complete standard output, lossily decoded as UTF-8.
    pub stdout: String,
    /// Complete standard error, lossily decoded as UTF-8.
    pub stderr: String,
}

impl ToolOutcome {
    /// Whether the tool exited successfully.
    #[must_use]
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

impl From<Output> for ToolOutcome {
    fn from(output: Output) -> Self {
        Self {
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }
}

/// Run `tool` at `program` and capture its outcome.
///
/// A spawn failure maps to [`BundlerError::ToolLaunchFailed`]. A non-zero
/// exit is *not* an error at this level; callers decide what a failure
/// means and attach the captured output to their own error variant.
///
/// # Errors
///
/// Returns [`BundlerError::ToolLaunchFailed`] if the executable could not be
/// started.
pub fn run_tool(
    runner: &dyn ToolRunner,
    tool: &'static str,
    program: &str,
    args: &[String],
) -> Result<ToolOutcome> {
    log::debug!("running {tool}: {program} {}", args.join(" "));
    let output = runner
        .run(program, args)
        .map_err(|e| BundlerError::ToolLaunchFailed {
            tool,
            reason: e.to_string(),
        })?;
    Ok(ToolOutcome::from(output))
}

#[cfg(test)]
pub(crate) mod test_helpers {
    //! Shared helpers for constructing fake process output in unit tests.

    use std::process::{ExitStatus, Output};

    #[cfg(unix)]
    pub fn exit_status(code: i32) -> ExitStatus {
        use std::os::unix::process::ExitStatusExt;

        ExitStatusExt::from_raw(code << 8)
    }

    #[cfg(windows)]
    pub fn exit_status(code: i32) -> ExitStatus {
        use std::os::windows::process::ExitStatusExt;

        ExitStatusExt::from_raw(code as u32)
    }

    pub fn output_with(code: i32, stdout: &str, stderr: &str) -> Output {
        Output {
            status: exit_status(code),
            stdout: stdout.as_bytes().to_vec(),
            stderr: stderr.as_bytes().to_vec(),
        }
    }
}
