//! Shared test infrastructure for integration tests.

use serde_json::Value;
use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

/// A dataset file inside its own temporary directory.
pub struct Workspace {
    dir: TempDir,
    pub data: PathBuf,
}

impl Workspace {
    /// Write `contents` verbatim as the dataset file.
    pub fn with_text(contents: &str) -> anyhow::Result<Self> {
        let dir = TempDir::new()?;
        let data = dir.path().join("words.json");
        std::fs::write(&data, contents)?;
        Ok(Self { dir, data })
    }

    /// Write `value` in the same layout the tool saves.
    pub fn with_json(value: &Value) -> anyhow::Result<Self> {
        Self::with_text(&serde_json::to_string_pretty(value)?)
    }

    pub fn read_text(&self) -> String {
        std::fs::read_to_string(&self.data).expect("read dataset")
    }

    pub fn read_json(&self) -> Value {
        serde_json::from_str(&self.read_text()).expect("dataset is valid JSON")
    }

    /// Run the binary with `args` followed by `--data <dataset>`.
    ///
    /// The config directory points into the temp dir so a developer's own
    /// config file never leaks into a test run.
    pub fn run(&self, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_vocab-enrich"))
            .args(args)
            .arg("--data")
            .arg(&self.data)
            .env("RUST_LOG", "warn")
            .env("XDG_CONFIG_HOME", self.dir.path())
            .env("HOME", self.dir.path())
            .output()
            .expect("spawn vocab-enrich")
    }
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}
