//! Whole-file persistence for the vocabulary dataset.
//!
//! The dataset is one JSON array rewritten in place on every save. Output is
//! indented with two spaces, keeps non-ASCII text verbatim, and preserves the
//! key order of every record so diffs stay readable.
use crate::record::Record;
use anyhow::{anyhow, Context, Result};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// Destination for periodic and final saves during a pass.
pub trait Checkpoint {
    /// Persist the full collection.
    fn checkpoint(&self, records: &[Record]) -> Result<()>;
}

/// Dataset file location.
#[derive(Debug, Clone)]
pub struct DatasetStore {
    path: PathBuf,
}

impl DatasetStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load and validate every record. Nothing is mutated on failure.
    pub fn load(&self) -> Result<Vec<Record>> {
        let bytes =
            fs::read(&self.path).with_context(|| format!("read {}", self.path.display()))?;
        let value: Value = serde_json::from_slice(&bytes)
            .with_context(|| format!("parse {}", self.path.display()))?;
        let Value::Array(items) = value else {
            return Err(anyhow!(
                "{} must contain a JSON array of records",
                self.path.display()
            ));
        };
        items
            .into_iter()
            .enumerate()
            .map(|(index, item)| {
                Record::from_value(item).with_context(|| format!("record {index}"))
            })
            .collect()
    }

    /// Overwrite the file with the current collection.
    pub fn save(&self, records: &[Record]) -> Result<()> {
        let text = render(records)?;
        fs::write(&self.path, text.as_bytes())
            .with_context(|| format!("write {}", self.path.display()))?;
        Ok(())
    }
}

impl Checkpoint for DatasetStore {
    fn checkpoint(&self, records: &[Record]) -> Result<()> {
        self.save(records)?;
        tracing::debug!(path = %self.path.display(), records = records.len(), "dataset saved");
        Ok(())
    }
}

/// Checkpoint sink for `--dry-run`: saves are logged and dropped.
#[derive(Debug, Default)]
pub struct DiscardCheckpoint;

impl Checkpoint for DiscardCheckpoint {
    fn checkpoint(&self, records: &[Record]) -> Result<()> {
        tracing::debug!(records = records.len(), "dry run: save skipped");
        Ok(())
    }
}

/// Serialize records in the on-disk format.
pub fn render(records: &[Record]) -> Result<String> {
    serde_json::to_string_pretty(records).context("serialize dataset")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &TempDir, contents: &str) -> DatasetStore {
        let path = dir.path().join("words.json");
        fs::write(&path, contents).expect("write dataset");
        DatasetStore::new(path)
    }

    #[test]
    fn save_preserves_key_order_and_non_ascii() {
        let dir = TempDir::new().expect("temp dir");
        let original = "[\n  {\n    \"word\": \"cat\",\n    \"translation\": \"n. 猫\",\n    \"extra\": [\n      1,\n      2\n    ],\n    \"definition\": \"a pet\"\n  }\n]";
        let store = write(&dir, original);

        let records = store.load().expect("load");
        store.save(&records).expect("save");

        let saved = fs::read_to_string(store.path()).expect("read back");
        assert_eq!(saved, original);
        assert!(saved.contains("猫"));
    }

    #[test]
    fn load_rejects_non_array_documents() {
        let dir = TempDir::new().expect("temp dir");
        let store = write(&dir, r#"{"word": "cat"}"#);
        let err = store.load().expect_err("object document");
        assert!(err.to_string().contains("JSON array"));
    }

    #[test]
    fn load_names_the_offending_record() {
        let dir = TempDir::new().expect("temp dir");
        let store = write(&dir, r#"[{"word": "cat"}, {"definition": "x"}]"#);
        let err = store.load().expect_err("record without word");
        assert!(format!("{err:#}").contains("record 1"));
    }

    #[test]
    fn load_fails_for_missing_file() {
        let dir = TempDir::new().expect("temp dir");
        let store = DatasetStore::new(dir.path().join("absent.json"));
        assert!(store.load().is_err());
    }
}
