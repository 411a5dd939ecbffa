//! Runtime bundler CLI entrypoint.
//!
//! This binary drives the detection-and-assembly pipeline: compose the
//! module set, link the runtime image, publish it atomically. Progress goes
//! to stderr; `--dry-run` output goes to stdout.

use clap::Parser;
use runtime_bundler::cli::Cli;
use runtime_bundler::config::BundleConfig;
use runtime_bundler::error::{BundlerError, Result};
use runtime_bundler::exec::SystemToolRunner;
use runtime_bundler::image::build_image;
use runtime_bundler::output::{success_message, write_line};
use runtime_bundler::pipeline::compose_bundle_modules;
use runtime_bundler::toolchain::{JavaHomeToolchain, JdkTool, ToolchainResolver};
use std::io::Write;

fn main() {
    let cli = Cli::parse();
    let mut stdout = std::io::stdout();
    let mut stderr = std::io::stderr();
    let run_result = run(&cli, &mut stdout, &mut stderr);
    let exit_code = exit_code_for_run_result(run_result, &mut stderr);
    if exit_code != 0 {
        std::process::exit(exit_code);
    }
}

fn run(cli: &Cli, stdout: &mut dyn Write, stderr: &mut dyn Write) -> Result<()> {
    let config = cli.resolved_config()?;

    if cli.dry_run {
        return print_dry_run(&config, cli.json, stdout);
    }

    let resolver = toolchain_for(&config)?;
    let runner = SystemToolRunner;

    if !cli.quiet && config.auto_detect {
        write_line(
            stderr,
            format!("Detecting modules for {}...", config.app_root),
        );
    }

    let modules = compose_bundle_modules(&config, &resolver, &runner)?;
    if modules.is_empty() {
        return Err(BundlerError::EmptyModuleSet);
    }

    if !cli.quiet {
        write_line(
            stderr,
            format!("Modules ({}): {}", modules.len(), modules.to_comma_list()),
        );
        write_line(stderr, format!("Linking runtime image to {}...", config.output));
    }

    let jlink = resolver.resolve_executable(JdkTool::Jlink, config.release)?;
    if cli.verbosity > 0 {
        write_line(stderr, format!("Using linker at {jlink}"));
    }

    build_image(&runner, &jlink, &modules, &config.jlink_options, &config.output)?;

    if !cli.quiet {
        write_line(stderr, "");
        write_line(stderr, success_message(modules.len(), &config.output));
    }

    Ok(())
}

/// Pick the JDK location: explicit configuration first, then `JAVA_HOME`.
fn toolchain_for(config: &BundleConfig) -> Result<JavaHomeToolchain> {
    match &config.java_home {
        Some(java_home) => Ok(JavaHomeToolchain::new(java_home.clone())),
        None => JavaHomeToolchain::from_env(),
    }
}

/// Print the resolved configuration without side effects.
fn print_dry_run(config: &BundleConfig, json: bool, stdout: &mut dyn Write) -> Result<()> {
    if json {
        let rendered = serde_json::to_string_pretty(config)
            .map_err(|e| BundlerError::Io(std::io::Error::other(e)))?;
        write_line(stdout, rendered);
        return Ok(());
    }

    write_line(stdout, "Dry run - no files will be modified");
    write_line(stdout, "");
    write_line(stdout, format!("App root: {}", config.app_root));
    write_line(stdout, format!("Output: {}", config.output));
    write_line(stdout, format!("Auto-detect: {}", config.auto_detect));
    write_line(stdout, format!("Spring Boot: {}", config.spring_boot));
    write_line(stdout, format!("Release: {}", config.release));
    match &config.java_home {
        Some(java_home) => write_line(stdout, format!("JDK: {java_home}")),
        None => write_line(stdout, "JDK: from JAVA_HOME"),
    }
    write_line(
        stdout,
        format!("jlink options: {}", config.jlink_options.join(" ")),
    );
    write_line(stdout, "");
    write_line(stdout, "Configured modules:");
    for module in &config.modules {
        write_line(stdout, format!("  - {module}"));
    }
    Ok(())
}

fn exit_code_for_run_result(result: Result<()>, stderr: &mut dyn Write) -> i32 {
    match result {
        Ok(()) => 0,
        Err(err) => {
            write_line(stderr, err);
            1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;

    #[test]
    fn exit_code_for_run_result_returns_zero_on_success() {
        let mut stderr = Vec::new();
        let exit_code = exit_code_for_run_result(Ok(()), &mut stderr);
        assert_eq!(exit_code, 0);
        assert!(stderr.is_empty());
    }

    #[test]
    fn exit_code_for_run_result_prints_error_and_returns_one() {
        let err = BundlerError::ArtifactMissing {
            path: Utf8PathBuf::from("/work/app/app.jar"),
        };

        let mut stderr = Vec::new();
        let exit_code = exit_code_for_run_result(Err(err), &mut stderr);
        assert_eq!(exit_code, 1);

        let stderr_text = String::from_utf8(stderr).expect("stderr was not UTF-8");
        assert!(stderr_text.contains("application artifact not found"));
    }

    #[test]
    fn toolchain_for_prefers_configured_java_home() {
        let config = BundleConfig {
            java_home: Some(Utf8PathBuf::from("/opt/jdk-21")),
            ..BundleConfig::default()
        };

        let resolver = toolchain_for(&config).expect("explicit JDK always resolves");
        assert_eq!(resolver.java_home(), "/opt/jdk-21");
    }

    #[test]
    fn dry_run_reports_configuration() {
        let config = BundleConfig::default();
        let mut stdout = Vec::new();

        print_dry_run(&config, false, &mut stdout).expect("dry run succeeds");

        let text = String::from_utf8(stdout).expect("stdout was not UTF-8");
        assert!(text.contains("Dry run"));
        assert!(text.contains("build/bundled/app"));
        assert!(text.contains("java.base"));
    }

    #[test]
    fn dry_run_json_is_machine_readable() {
        let config = BundleConfig::default();
        let mut stdout = Vec::new();

        print_dry_run(&config, true, &mut stdout).expect("dry run succeeds");

        let value: serde_json::Value =
            serde_json::from_slice(&stdout).expect("output should be valid JSON");
        assert_eq!(value["release"], 21);
        assert_eq!(value["auto-detect"], true);
    }
}
