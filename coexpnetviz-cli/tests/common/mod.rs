#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use assert_cmd::assert::Assert;
use tempfile::TempDir;

/// Path of a file in `tests/data`
pub fn get_data_file(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/data")
        .join(name)
}

/// Path of the style bundled with the core crate
pub fn bundled_style() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../coexpnetviz-core/data/coexpnetviz_style.xml")
}

/// Asserts two files have the same content, showing a line diff otherwise.
pub fn assert_same_file(actual: &Path, expected: &Path) {
    let actual_text = fs::read_to_string(actual)
        .unwrap_or_else(|e| panic!("Cannot read {}: {e}", actual.display()));
    let expected_text = fs::read_to_string(expected)
        .unwrap_or_else(|e| panic!("Cannot read {}: {e}", expected.display()));
    if actual_text != expected_text {
        let diff = similar::TextDiff::from_lines(&expected_text, &actual_text);
        panic!(
            "{} differs from {}:\n{}",
            actual.display(),
            expected.display(),
            diff.unified_diff().header("expected", "actual")
        );
    }
}

/// Runs the coexpnetviz binary in a scratch directory.
///
/// Fixture files copied with [`CliTester::copy_data`] are available by name,
/// output written to relative paths lands in the scratch directory.
pub struct CliTester {
    args: Vec<String>,
    tmp_dir: TempDir,
}

impl CliTester {
    pub fn new() -> Self {
        Self {
            args: Vec::new(),
            tmp_dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    /// Copies `tests/data/{name}` into the scratch directory.
    pub fn copy_data(self, name: &str) -> Self {
        fs::copy(get_data_file(name), self.tmp_dir.path().join(name))
            .unwrap_or_else(|e| panic!("Cannot copy fixture {name}: {e}"));
        self
    }

    pub fn arg(mut self, arg: &str) -> Self {
        self.args.push(arg.to_string());
        self
    }

    pub fn args(mut self, args: &[&str]) -> Self {
        self.args.extend(args.iter().map(|arg| arg.to_string()));
        self
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.tmp_dir.path().join(name)
    }

    pub fn read(&self, name: &str) -> String {
        fs::read_to_string(self.path(name))
            .unwrap_or_else(|e| panic!("Cannot read output {name}: {e}"))
    }

    /// Runs the binary with the collected arguments.
    pub fn run(&self) -> Assert {
        Command::cargo_bin("coexpnetviz")
            .expect("binary not built")
            .current_dir(self.tmp_dir.path())
            .env_remove("RUST_LOG")
            .args(&self.args)
            .assert()
    }
}

/// Tester with the standard fixture set copied in.
pub fn fixture_tester() -> CliTester {
    CliTester::new()
        .copy_data("baits.txt")
        .copy_data("leaf.txt")
        .copy_data("root.txt")
        .copy_data("families.txt")
}

pub fn stderr(assert: &Assert) -> String {
    String::from_utf8_lossy(&assert.get_output().stderr).into_owned()
}

pub fn stdout(assert: &Assert) -> String {
    String::from_utf8_lossy(&assert.get_output().stdout).into_owned()
}
