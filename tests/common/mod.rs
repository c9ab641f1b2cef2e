//! Common test utilities for vxc integration tests.
//!
//! Provides `TestEnv` for isolated test environments that don't pollute
//! the user's real data directories.

#![allow(dead_code)]

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
pub use tempfile::TempDir;

/// A test environment with an isolated home directory.
///
/// `vxc()` points `HOME`, `XDG_DATA_HOME` and `XDG_CACHE_HOME` into the
/// temp dir per invocation, making tests parallel-safe.
pub struct TestEnv {
    pub home_dir: TempDir,
}

impl TestEnv {
    pub fn new() -> Self {
        Self {
            home_dir: TempDir::new().unwrap(),
        }
    }

    /// Get a Command for the vxc binary with isolated directories.
    pub fn vxc(&self) -> Command {
        self.command_for(Path::new(env!("CARGO_BIN_EXE_vxc")))
    }

    /// Get a Command for a copy of the vxc binary (see `install_copy`).
    pub fn command_for(&self, exe: &Path) -> Command {
        let mut cmd = Command::new(exe);
        cmd.env("HOME", self.home_path());
        cmd.env("XDG_DATA_HOME", self.xdg_data_path());
        cmd.env("XDG_CACHE_HOME", self.xdg_cache_path());
        cmd.env_remove("VXCORE_TEST_MODE");
        cmd.env_remove("VXCORE_LOG");
        cmd
    }

    /// Copy the vxc binary into `<home>/install/` so tests can lay out
    /// packaged defaults or a portable `config/` dir next to it.
    pub fn install_copy(&self) -> PathBuf {
        let install_dir = self.home_path().join("install");
        fs::create_dir_all(&install_dir).unwrap();
        let src = Path::new(env!("CARGO_BIN_EXE_vxc"));
        let dest = install_dir.join(src.file_name().unwrap());
        fs::copy(src, &dest).unwrap();
        dest
    }

    pub fn home_path(&self) -> &Path {
        self.home_dir.path()
    }

    pub fn xdg_data_path(&self) -> PathBuf {
        self.home_path().join("xdg-data")
    }

    pub fn xdg_cache_path(&self) -> PathBuf {
        self.home_path().join("xdg-cache")
    }

    /// User config file as resolved on Linux.
    pub fn user_config_path(&self) -> PathBuf {
        self.xdg_data_path().join("vxcore").join("vxcore.json")
    }

    /// Session file as resolved on Linux.
    pub fn session_path(&self) -> PathBuf {
        self.xdg_cache_path().join("vxcore").join("session.json")
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

/// Write a file, creating parent directories.
pub fn write_file(path: &Path, contents: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Failed to create parent directory");
    }
    fs::write(path, contents).expect("Failed to write file");
}

/// Parse JSON output from a command.
pub fn parse_json(output: &[u8]) -> serde_json::Value {
    serde_json::from_slice(output).expect("Failed to parse JSON output")
}
