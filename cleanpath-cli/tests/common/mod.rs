//! Common test utilities for CLI integration tests.
//!
//! Every command built here runs with the `CLEANPATH_*` variables removed
//! and `CLEANPATH_CONFIG` pointing at a file that does not exist, so the
//! user's own configuration never leaks into a test.

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const CLEANPATH_VARS: &[&str] = &[
    "CLEANPATH_DELIMITER",
    "CLEANPATH_CHECK",
    "CLEANPATH_BEFORE",
    "CLEANPATH_VARIABLE",
    "CLEANPATH_SIZE_LIMIT",
    "CLEANPATH_DISABLE_SIZE_LIMIT",
    "CLEANPATH_LOG_MODE",
];

/// Test environment with an isolated temporary directory.
pub struct TestEnv {
    /// Temporary directory (kept alive for the duration of the test)
    #[allow(dead_code)]
    temp_dir: TempDir,
    /// Path to the temporary directory
    pub temp_path: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let temp_path = temp_dir.path().to_path_buf();

        Self {
            temp_dir,
            temp_path,
        }
    }

    /// A `cleanpath` command isolated from the caller's configuration.
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("cleanpath").expect("Failed to find cleanpath binary");
        for var in CLEANPATH_VARS {
            cmd.env_remove(var);
        }
        cmd.env("CLEANPATH_CONFIG", self.temp_path.join("no-config.yaml"));
        cmd
    }

    /// Get the temp path.
    pub fn path(&self) -> &Path {
        &self.temp_path
    }

    /// Create a subdirectory in the test environment.
    pub fn create_dir(&self, name: &str) -> PathBuf {
        let path = self.temp_path.join(name);
        std::fs::create_dir_all(&path).expect("Failed to create test directory");
        path
    }

    /// Create an empty regular file in the test environment.
    pub fn create_file(&self, name: &str) -> PathBuf {
        let path = self.temp_path.join(name);
        std::fs::write(&path, b"").expect("Failed to create test file");
        path
    }

    /// Write a configuration file and return its path.
    pub fn write_config(&self, name: &str, content: &str) -> PathBuf {
        let path = self.temp_path.join(name);
        std::fs::write(&path, content).expect("Failed to write config file");
        path
    }
}

/// Joins paths with `:` the way a `PATH` value is written.
#[allow(dead_code)]
pub fn join_paths(paths: &[&Path]) -> String {
    paths
        .iter()
        .map(|p| p.to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join(":")
}
