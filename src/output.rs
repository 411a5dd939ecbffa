//! Progress and status output helpers.
//!
//! User-facing progress goes to stderr so that stdout stays reserved for
//! machine-readable output (`--dry-run --json`). Write failures are
//! swallowed; progress output must never fail a run.

use camino::Utf8Path;
use std::io::Write;

/// Write one line to the given writer, ignoring write failures.
pub fn write_line(writer: &mut dyn Write, message: impl std::fmt::Display) {
    if writeln!(writer, "{message}").is_err() {
        // Best-effort output; ignore write failures.
    }
}

/// Human-readable success summary for a published image.
#[must_use]
pub fn success_message(module_count: usize, dest: &Utf8Path) -> String {
    format!("Published runtime image with {module_count} module(s) to {dest}")
}
