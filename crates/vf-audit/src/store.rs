// store.rs — Repository seam for transition records.
//
// The core never touches module-level mutable state: anything that needs
// persistence goes through this trait, injected by the caller. MemoryStore
// backs tests and demos; JsonlStore is a plain append-only JSON-lines file
// (one record per line), easy to inspect with jq or grep.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write as _};
use std::path::{Path, PathBuf};

use crate::error::AuditError;
use crate::record::TransitionRecord;

/// Append-only repository for transition records.
pub trait TransitionStore {
    /// Persist one record. Records are immutable once appended.
    fn append(&mut self, record: TransitionRecord) -> Result<(), AuditError>;

    /// All records for a component, oldest first.
    fn for_component(&self, component_id: &str) -> Result<Vec<TransitionRecord>, AuditError>;

    /// Total number of stored records.
    fn len(&self) -> Result<usize, AuditError>;

    fn is_empty(&self) -> Result<bool, AuditError> {
        Ok(self.len()? == 0)
    }
}

/// In-memory store for tests and demos.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Vec<TransitionRecord>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// All records in append order.
    pub fn records(&self) -> &[TransitionRecord] {
        &self.records
    }
}

impl TransitionStore for MemoryStore {
    fn append(&mut self, record: TransitionRecord) -> Result<(), AuditError> {
        self.records.push(record);
        Ok(())
    }

    fn for_component(&self, component_id: &str) -> Result<Vec<TransitionRecord>, AuditError> {
        Ok(self
            .records
            .iter()
            .filter(|r| r.component_id == component_id)
            .cloned()
            .collect())
    }

    fn len(&self) -> Result<usize, AuditError> {
        Ok(self.records.len())
    }
}

/// Append-only JSONL file store: one JSON record per line.
pub struct JsonlStore {
    writer: BufWriter<File>,
    path: PathBuf,
}

impl JsonlStore {
    /// Open (or create) a store file. Opening in append mode means
    /// existing records are never overwritten.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, AuditError> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|source| AuditError::OpenFailed {
                path: path.clone(),
                source,
            })?;
        Ok(Self {
            writer: BufWriter::new(file),
            path,
        })
    }

    /// Read every record from a store file, oldest first. Blank lines are
    /// skipped.
    pub fn read_all(path: impl AsRef<Path>) -> Result<Vec<TransitionRecord>, AuditError> {
        let file = File::open(path.as_ref()).map_err(|source| AuditError::OpenFailed {
            path: path.as_ref().to_path_buf(),
            source,
        })?;
        let reader = BufReader::new(file);
        let mut records = Vec::new();
        for line in reader.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            records.push(serde_json::from_str(&line)?);
        }
        Ok(records)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TransitionStore for JsonlStore {
    fn append(&mut self, record: TransitionRecord) -> Result<(), AuditError> {
        let json = serde_json::to_string(&record)?;
        writeln!(self.writer, "{json}")?;
        // Flush per record: durability over batching for audit data.
        self.writer.flush()?;
        Ok(())
    }

    fn for_component(&self, component_id: &str) -> Result<Vec<TransitionRecord>, AuditError> {
        Ok(Self::read_all(&self.path)?
            .into_iter()
            .filter(|r| r.component_id == component_id)
            .collect())
    }

    fn len(&self) -> Result<usize, AuditError> {
        Ok(Self::read_all(&self.path)?.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;
    use vf_lifecycle::ComponentStatus::*;

    fn record(component_id: &str) -> TransitionRecord {
        TransitionRecord::new(component_id, Draft, Parsed, "datasheet_parsed", "u-1")
    }

    #[test]
    fn memory_store_appends_and_filters() {
        let mut store = MemoryStore::new();
        store.append(record("CMP-1")).unwrap();
        store.append(record("CMP-2")).unwrap();
        store.append(record("CMP-1")).unwrap();

        assert_eq!(store.len().unwrap(), 3);
        assert_eq!(store.for_component("CMP-1").unwrap().len(), 2);
        assert_eq!(store.for_component("CMP-3").unwrap().len(), 0);
    }

    #[test]
    fn jsonl_store_append_and_read_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("transitions.jsonl");
        {
            let mut store = JsonlStore::open(&path).unwrap();
            store.append(record("CMP-1")).unwrap();
            store.append(record("CMP-2")).unwrap();
        }
        let records = JsonlStore::read_all(&path).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].component_id, "CMP-1");
        assert_eq!(records[1].component_id, "CMP-2");
    }

    #[test]
    fn jsonl_store_reopen_appends_without_overwriting() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("transitions.jsonl");
        {
            let mut store = JsonlStore::open(&path).unwrap();
            store.append(record("CMP-1")).unwrap();
        }
        {
            let mut store = JsonlStore::open(&path).unwrap();
            store.append(record("CMP-2")).unwrap();
        }
        assert_eq!(JsonlStore::read_all(&path).unwrap().len(), 2);
    }

    #[test]
    fn jsonl_store_filters_by_component() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("transitions.jsonl");
        let mut store = JsonlStore::open(&path).unwrap();
        store.append(record("CMP-1")).unwrap();
        store.append(record("CMP-2")).unwrap();

        let found = store.for_component("CMP-2").unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].component_id, "CMP-2");
    }
}
