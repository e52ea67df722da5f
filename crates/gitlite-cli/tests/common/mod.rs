//! Shared test harness for gitlite-cli integration tests.
//!
//! Runs the compiled `gitlite` binary in a scratch directory and captures
//! its output.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::Command;

/// Captured output from running a command.
pub struct CommandResult {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
}

impl CommandResult {
    pub fn assert_ok(&self) -> &Self {
        assert_eq!(
            self.exit_code, 0,
            "expected success, got exit {}\nstdout: {}\nstderr: {}",
            self.exit_code, self.stdout, self.stderr
        );
        self
    }

    pub fn assert_err(&self) -> &Self {
        assert_ne!(
            self.exit_code, 0,
            "expected failure, got exit 0\nstdout: {}",
            self.stdout
        );
        self
    }

    /// The single line of stdout, trimmed.
    pub fn line(&self) -> String {
        self.stdout.trim_end().to_string()
    }
}

/// Discover the path to the compiled `gitlite` binary.
pub fn gitlite_bin() -> PathBuf {
    let mut path = std::env::current_exe()
        .unwrap()
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .to_path_buf();
    path.push("gitlite");
    path
}

/// Run the gitlite binary in `dir` with the given arguments.
pub fn gitlite(dir: &Path, args: &[&str]) -> CommandResult {
    let output = Command::new(gitlite_bin())
        .args(args)
        .current_dir(dir)
        .output()
        .expect("failed to run gitlite");
    CommandResult {
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        exit_code: output.status.code().unwrap_or(128),
    }
}
