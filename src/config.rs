//! Bundle configuration.
//!
//! Settings can come from a TOML file (`bundle.toml` by convention), from
//! CLI flags, or both; flags win. Defaults follow the conventions of the
//! standard input layout: the prepared application lives under
//! `build/bundled/app` and the runtime image is published to
//! `build/bundled/runtime`.

use crate::error::{BundlerError, Result};
use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};

/// Default directory containing `app.jar` and `lib/`.
pub const DEFAULT_APP_ROOT: &str = "build/bundled/app";

/// Default destination for the runtime image.
pub const DEFAULT_OUTPUT: &str = "build/bundled/runtime";

/// Default target release for multi-release jar analysis.
pub const DEFAULT_RELEASE: u32 = 21;

/// Conservative explicit module list used when nothing is configured and
/// auto-detection is off.
#[must_use]
pub fn default_modules() -> Vec<String> {
    [
        "java.base",
        "java.sql",
        "java.xml",
        "java.logging",
        "java.naming",
        "java.management",
        "jdk.unsupported",
    ]
    .map(str::to_owned)
    .to_vec()
}

/// Default pass-through linker options, tuned for small images.
#[must_use]
pub fn default_jlink_options() -> Vec<String> {
    [
        "--strip-debug",
        "--no-header-files",
        "--no-man-pages",
        "--compress",
        "2",
    ]
    .map(str::to_owned)
    .to_vec()
}

/// Complete configuration for one bundling run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields, default)]
pub struct BundleConfig {
    /// Directory containing `app.jar` (required) and `lib/` (optional).
    pub app_root: Utf8PathBuf,
    /// Destination directory for the published runtime image.
    pub output: Utf8PathBuf,
    /// Explicit modules; merged after detected ones in auto-detect mode.
    pub modules: Vec<String>,
    /// Extra linker options, passed through as-is.
    pub jlink_options: Vec<String>,
    /// Whether to compute the module set with the dependency analyzer.
    pub auto_detect: bool,
    /// Assert the Spring Boot flavour instead of probing `app.jar`.
    pub spring_boot: bool,
    /// Target release for multi-release jar analysis.
    pub release: u32,
    /// JDK installation directory; falls back to `JAVA_HOME` when unset.
    pub java_home: Option<Utf8PathBuf>,
}

impl Default for BundleConfig {
    fn default() -> Self {
        Self {
            app_root: Utf8PathBuf::from(DEFAULT_APP_ROOT),
            output: Utf8PathBuf::from(DEFAULT_OUTPUT),
            modules: default_modules(),
            jlink_options: default_jlink_options(),
            auto_detect: true,
            spring_boot: false,
            release: DEFAULT_RELEASE,
            java_home: None,
        }
    }
}

impl BundleConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`BundlerError::InvalidConfig`] when the file cannot be read
    /// or does not parse.
    pub fn from_file(path: &Utf8Path) -> Result<Self> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| BundlerError::InvalidConfig {
                path: path.to_owned(),
                reason: e.to_string(),
            })?;

        toml::from_str(&contents).map_err(|e| BundlerError::InvalidConfig {
            path: path.to_owned(),
            reason: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::sandbox;
    use rstest::rstest;

    #[test]
    fn defaults_match_standard_layout() {
        let config = BundleConfig::default();
        assert_eq!(config.app_root, Utf8PathBuf::from("build/bundled/app"));
        assert_eq!(config.output, Utf8PathBuf::from("build/bundled/runtime"));
        assert!(config.auto_detect);
        assert!(!config.spring_boot);
        assert_eq!(config.release, 21);
        assert!(config.modules.contains(&"java.base".to_owned()));
        assert!(config.jlink_options.contains(&"--strip-debug".to_owned()));
    }

    #[test]
    fn parses_full_config_file() {
        let (_temp, root) = sandbox();
        let path = root.join("bundle.toml");
        std::fs::write(
            path.as_std_path(),
            r#"
app-root = "dist/app"
output = "dist/runtime"
modules = ["java.base"]
jlink-options = ["--strip-debug"]
auto-detect = false
spring-boot = true
release = 17
java-home = "/opt/jdk-17"
"#,
        )
        .expect("write config");

        let config = BundleConfig::from_file(&path).expect("config should parse");
        assert_eq!(config.app_root, Utf8PathBuf::from("dist/app"));
        assert_eq!(config.output, Utf8PathBuf::from("dist/runtime"));
        assert_eq!(config.modules, vec!["java.base".to_owned()]);
        assert_eq!(config.jlink_options, vec!["--strip-debug".to_owned()]);
        assert!(!config.auto_detect);
        assert!(config.spring_boot);
        assert_eq!(config.release, 17);
        assert_eq!(config.java_home, Some(Utf8PathBuf::from("/opt/jdk-17")));
    }

    #[test]
    fn partial_config_file_keeps_defaults() {
        let (_temp, root) = sandbox();
        let path = root.join("bundle.toml");
        std::fs::write(path.as_std_path(), "release = 17\n").expect("write config");

        let config = BundleConfig::from_file(&path).expect("config should parse");
        assert_eq!(config.release, 17);
        assert_eq!(config.app_root, Utf8PathBuf::from(DEFAULT_APP_ROOT));
        assert!(config.auto_detect);
    }

    #[rstest]
    #[case::invalid_toml("this is not toml {{{")]
    #[case::unknown_key("unknown-setting = true\n")]
    #[case::wrong_type("release = \"twenty-one\"\n")]
    fn rejects_bad_config(#[case] contents: &str) {
        let (_temp, root) = sandbox();
        let path = root.join("bundle.toml");
        std::fs::write(path.as_std_path(), contents).expect("write config");

        let err = BundleConfig::from_file(&path).expect_err("config should be rejected");
        assert!(matches!(err, BundlerError::InvalidConfig { .. }));
    }

    #[test]
    fn missing_config_file_is_invalid_config() {
        let (_temp, root) = sandbox();
        let err = BundleConfig::from_file(&root.join("absent.toml"))
            .expect_err("missing file should fail");
        assert!(matches!(err, BundlerError::InvalidConfig { .. }));
    }
}
