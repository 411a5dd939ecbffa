//! Shared fixtures for unit tests.

use crate::error::Result;
use crate::toolchain::{JdkTool, ToolchainResolver};
use camino::{Utf8Path, Utf8PathBuf};
use std::fs::File;
use std::io::Write;
use zip::write::SimpleFileOptions;

/// Build a zip archive at `path` with the given (entry name, contents)
/// pairs.
pub(crate) fn write_zip(path: &Utf8Path, entries: &[(&str, &[u8])]) {
    let file = File::create(path).expect("create archive");
    let mut writer = zip::ZipWriter::new(file);
    for (name, contents) in entries {
        writer
            .start_file(*name, SimpleFileOptions::default())
            .expect("start entry");
        writer.write_all(contents).expect("write entry");
    }
    writer.finish().expect("finish archive");
}

/// Create a temp directory and return it with its UTF-8 path.
pub(crate) fn sandbox() -> (tempfile::TempDir, Utf8PathBuf) {
    let temp = tempfile::tempdir().expect("temp dir");
    let root = Utf8PathBuf::try_from(temp.path().to_path_buf()).expect("utf-8 temp path");
    (temp, root)
}

/// Test resolver serving tool paths under a fixed directory.
pub(crate) enum FixedToolchain {
    /// Resolve every tool under this directory without an existence check.
    At(Utf8PathBuf),
    /// Panic on any resolution attempt.
    Unreachable,
}

impl FixedToolchain {
    pub(crate) fn at(dir: &str) -> Self {
        Self::At(Utf8PathBuf::from(dir))
    }

    pub(crate) fn unreachable() -> Self {
        Self::Unreachable
    }
}

impl ToolchainResolver for FixedToolchain {
    fn resolve_executable(&self, tool: JdkTool, _release: u32) -> Result<Utf8PathBuf> {
        match self {
            Self::At(dir) => Ok(dir.join(tool.name())),
            Self::Unreachable => panic!("toolchain resolver should not be consulted"),
        }
    }
}
