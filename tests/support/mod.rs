use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;

/// A temp working directory with its own task file, used as the cwd for
/// binary invocations so `.dodo.toml` discovery stays isolated.
pub struct TestSpace {
    dir: TempDir,
}

impl TestSpace {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("failed to create tempdir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn task_file(&self) -> PathBuf {
        self.dir.path().join("tasks.txt")
    }

    pub fn seed_tasks(&self, contents: &str) {
        fs::write(self.task_file(), contents).expect("failed to seed task file");
    }

    pub fn read_tasks(&self) -> String {
        fs::read_to_string(self.task_file()).expect("failed to read task file")
    }

    pub fn write_config(&self, contents: &str) {
        fs::write(self.dir.path().join(".dodo.toml"), contents).expect("failed to write config");
    }

    /// Command pointed at this space's task file, with the space as cwd.
    pub fn dodo(&self) -> Command {
        let mut cmd = self.dodo_bare();
        cmd.arg("--file").arg(self.task_file());
        cmd
    }

    /// Command without the `--file` override, for config-driven paths.
    pub fn dodo_bare(&self) -> Command {
        let mut cmd = Command::cargo_bin("dodo").expect("binary");
        cmd.current_dir(self.dir.path());
        cmd.env_remove("DODO_FILE");
        cmd.env_remove("DODO_CONFIG");
        cmd
    }
}
