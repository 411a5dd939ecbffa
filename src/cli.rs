//! CLI argument definitions for the runtime bundler.
//!
//! This module defines the command-line interface using clap and the merge
//! of CLI flags over an optional TOML configuration file. It is separated
//! from the main entrypoint to keep the binary focused on orchestration.

use crate::config::BundleConfig;
use crate::error::Result;
use camino::Utf8PathBuf;
use clap::Parser;

/// Assemble a minimized runtime image for a packaged application.
#[derive(Parser, Debug)]
#[command(name = "runtime-bundler")]
#[command(version, about)]
#[command(long_about = concat!(
    "Assemble a minimized runtime image for a packaged Java application.\n\n",
    "The bundler computes the smallest set of platform modules the application ",
    "needs (with jdeps, unless --no-auto-detect is given), links a runtime image ",
    "containing exactly those modules with jlink, and publishes it atomically to ",
    "the output directory.\n\n",
    "Expected input layout: <app-root>/app.jar (required) and <app-root>/lib/*.jar ",
    "(optional auxiliary dependencies). Nested jars inside fat artifacts are ",
    "extracted automatically for analysis.",
))]
#[command(after_help = concat!(
    "EXAMPLES:\n",
    "  Bundle with auto-detected modules:\n",
    "    $ runtime-bundler --app-root build/bundled/app -o build/bundled/runtime\n\n",
    "  Bundle an explicit module list without analysis:\n",
    "    $ runtime-bundler --no-auto-detect -m java.base -m java.sql\n\n",
    "  Use a configuration file, overriding its release:\n",
    "    $ runtime-bundler -c bundle.toml --release 17\n\n",
    "  Preview the resolved configuration:\n",
    "    $ runtime-bundler --dry-run --json",
))]
pub struct Cli {
    /// TOML configuration file; flags given here override its settings.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<Utf8PathBuf>,

    /// Directory containing app.jar and the optional lib/ directory.
    #[arg(long, value_name = "DIR")]
    pub app_root: Option<Utf8PathBuf>,

    /// Destination directory for the runtime image.
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<Utf8PathBuf>,

    /// Include a specific module (can be repeated).
    #[arg(short, long = "module", value_name = "NAME")]
    pub module: Vec<String>,

    /// Extra jlink option, passed through as-is (can be repeated).
    #[arg(long = "jlink-option", value_name = "OPT", allow_hyphen_values = true)]
    pub jlink_option: Vec<String>,

    /// Use only the configured modules; skip jdeps analysis.
    #[arg(long)]
    pub no_auto_detect: bool,

    /// Treat the artifact as a Spring Boot application without probing it.
    #[arg(long)]
    pub spring_boot: bool,

    /// JDK installation directory [default: $JAVA_HOME].
    #[arg(long, value_name = "DIR")]
    pub java_home: Option<Utf8PathBuf>,

    /// Target release for multi-release jar analysis.
    #[arg(long, value_name = "N")]
    pub release: Option<u32>,

    /// Show the resolved configuration and exit without side effects.
    #[arg(long)]
    pub dry_run: bool,

    /// Emit the dry-run output as JSON for scripting.
    #[arg(long, requires = "dry_run")]
    pub json: bool,

    /// Suppress progress output (errors still shown).
    #[arg(short, long, conflicts_with = "verbosity")]
    pub quiet: bool,

    /// Increase log verbosity (repeatable: -v, -vv).
    #[arg(
        short,
        long = "verbose",
        action = clap::ArgAction::Count,
        conflicts_with = "quiet"
    )]
    pub verbosity: u8,
}

impl Cli {
    /// Resolve the effective configuration: file settings (or defaults)
    /// with CLI flags layered on top.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::BundlerError::InvalidConfig`] when the
    /// configuration file cannot be read or parsed.
    pub fn resolved_config(&self) -> Result<BundleConfig> {
        let mut config = match &self.config {
            Some(path) => BundleConfig::from_file(path)?,
            None => BundleConfig::default(),
        };

        if let Some(app_root) = &self.app_root {
            config.app_root = app_root.clone();
        }
        if let Some(output) = &self.output {
            config.output = output.clone();
        }
        if !self.module.is_empty() {
            config.modules = self.module.clone();
        }
        if !self.jlink_option.is_empty() {
            config.jlink_options = self.jlink_option.clone();
        }
        if self.no_auto_detect {
            config.auto_detect = false;
        }
        if self.spring_boot {
            config.spring_boot = true;
        }
        if let Some(release) = self.release {
            config.release = release;
        }
        if let Some(java_home) = &self.java_home {
            config.java_home = Some(java_home.clone());
        }

        Ok(config)
    }
}
