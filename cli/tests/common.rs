//! # roledoc CLI Integration Test Common Helpers
//!
//! File: cli/tests/common.rs
//!
//! ## Overview
//!
//! Shared helpers for the integration tests in `cli/tests/`. Each test runs the
//! compiled `roledoc` binary inside a temporary workspace so neither the user's
//! configuration nor a `.roledoc.toml` of the surrounding checkout leaks in.
//!

// Not every test file uses every helper.
#![allow(dead_code)]

pub use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// # Get roledoc Command (`roledoc_cmd`)
///
/// Creates an `assert_cmd::Command` for the compiled `roledoc` binary.
///
/// ## Panics
/// Panics if the binary cannot be found via `Command::cargo_bin`.
pub fn roledoc_cmd() -> Command {
    Command::cargo_bin("roledoc").expect("Failed to find roledoc binary for testing")
}

/// A temporary workspace with a `templates/` directory, an `out/` directory
/// and a `role.yml` data file.
pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    pub fn new(role_yaml: &str) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        // Stops the project config search at the workspace.
        fs::create_dir(dir.path().join(".git")).unwrap();
        fs::create_dir(dir.path().join("templates")).unwrap();
        fs::create_dir(dir.path().join("out")).unwrap();
        fs::write(dir.path().join("role.yml"), role_yaml).unwrap();
        Self { dir }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn templates(&self) -> PathBuf {
        self.root().join("templates")
    }

    pub fn out(&self) -> PathBuf {
        self.root().join("out")
    }

    /// Writes a file below `templates/`, creating parent directories.
    pub fn template(&self, relative: &str, content: &str) {
        write_file(&self.templates().join(relative), content);
    }

    /// Writes a file below `out/`, creating parent directories.
    pub fn existing_output(&self, relative: &str, content: &str) {
        write_file(&self.out().join(relative), content);
    }

    pub fn read_output(&self, relative: &str) -> String {
        fs::read_to_string(self.out().join(relative)).expect("Failed to read output")
    }

    /// `roledoc` running inside the workspace with an isolated user config dir.
    pub fn cmd(&self) -> Command {
        let mut cmd = roledoc_cmd();
        cmd.current_dir(self.root())
            .env("HOME", self.root())
            .env("XDG_CONFIG_HOME", self.root().join("config"))
            .env_remove("ROLEDOC_TEMPLATE_DIR")
            .env_remove("ROLEDOC_OUTPUT_DIR")
            .env_remove("RUST_LOG");
        cmd
    }

    /// `roledoc render` with the workspace's data, templates and output dir.
    pub fn render(&self) -> Command {
        let mut cmd = self.cmd();
        cmd.args(["render", "--data", "role.yml", "--template-dir", "templates", "--output-dir", "out"]);
        cmd
    }
}

fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}
