use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::BackupError;
use crate::model::board::BoardSnapshot;

/// Writes board snapshots as `<board name>_<epoch seconds>.json` files.
pub struct SnapshotWriter {
    dir: PathBuf,
}

impl SnapshotWriter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Create the output directory and its parents if missing. Returns
    /// whether anything was created.
    pub fn prepare(&self) -> Result<bool, BackupError> {
        if self.dir.is_dir() {
            return Ok(false);
        }
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create {}", self.dir.display()))
            .map_err(|source| BackupError::SnapshotWriteFailed {
                path: self.dir.clone(),
                source,
            })?;
        Ok(true)
    }

    /// Serialize `snapshot` in full and write it in one pass. An existing
    /// file with the same name is replaced.
    pub fn write(
        &self,
        board_name: &str,
        timestamp: i64,
        snapshot: &BoardSnapshot,
    ) -> Result<PathBuf, BackupError> {
        let path = self.dir.join(file_name(board_name, timestamp));
        render(snapshot)
            .and_then(|bytes| {
                std::fs::write(&path, bytes)
                    .with_context(|| format!("Failed to write {}", path.display()))
            })
            .map_err(|source| BackupError::SnapshotWriteFailed {
                path: path.clone(),
                source,
            })?;
        Ok(path)
    }
}

/// Only `/` is replaced; every other character is kept as-is.
pub fn file_name(board_name: &str, timestamp: i64) -> String {
    format!("{}_{timestamp}.json", board_name.replace('/', "-"))
}

/// Pretty-print with 4-space indentation and keys sorted at every level.
/// Non-ASCII text is written as UTF-8, not as escapes.
pub fn render(snapshot: &BoardSnapshot) -> Result<Vec<u8>> {
    let sorted = sort_keys(&snapshot.0);
    let mut buf = Vec::new();
    let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    sorted
        .serialize(&mut ser)
        .context("Failed to serialize snapshot")?;
    Ok(buf)
}

fn sort_keys(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let sorted: BTreeMap<&String, Value> =
                map.iter().map(|(k, v)| (k, sort_keys(v))).collect();
            Value::Object(
                sorted
                    .into_iter()
                    .map(|(k, v)| (k.clone(), v))
                    .collect::<Map<String, Value>>(),
            )
        }
        Value::Array(items) => Value::Array(items.iter().map(sort_keys).collect()),
        other => other.clone(),
    }
}
