//! Runtime bundler library.
//!
//! This crate assembles minimized, self-contained runtime images for
//! packaged Java applications: it detects the platform modules an
//! application actually needs, links an image containing exactly those
//! modules with the external `jlink` tool, and publishes the result
//! atomically. It is used by the `runtime-bundler` CLI binary and can be
//! driven programmatically, with every subprocess behind a narrow seam for
//! testing.
//!
//! # Modules
//!
//! - [`analyzer`] - Minimal module closure detection via `jdeps`
//! - [`cli`] - Command-line argument definitions and config merging
//! - [`composer`] - Module set composition (detected, configured, safety,
//!   framework heuristic)
//! - [`config`] - Bundle configuration and TOML file loading
//! - [`error`] - Semantic error types carrying captured tool output
//! - [`exec`] - Subprocess seam for external JDK tools
//! - [`extractor`] - Nested archive extraction from fat artifacts
//! - [`fsutil`] - Recursive copy and best-effort removal helpers
//! - [`image`] - `jlink` invocation and atomic image publication
//! - [`module_set`] - Ordered, duplicate-free module collections
//! - [`output`] - Progress and status output helpers
//! - [`pipeline`] - End-to-end pipeline orchestration
//! - [`toolchain`] - JDK tool resolution

pub mod analyzer;
pub mod cli;
pub mod composer;
pub mod config;
pub mod error;
pub mod exec;
pub mod extractor;
pub mod fsutil;
pub mod image;
pub mod module_set;
pub mod output;
pub mod pipeline;
pub mod toolchain;

#[cfg(test)]
pub(crate) mod test_utils;
