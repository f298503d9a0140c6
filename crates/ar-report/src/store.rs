//! Record stores keyed by session id.

use crate::error::{ReportError, Result};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// A session record.
pub type Record = Value;

/// Read-only source of session records.
pub trait RecordStore {
    /// Record for `session_id`, if known.
    fn lookup(&self, session_id: &str) -> Option<&Record>;
}

/// In-memory store.
#[derive(Debug, Clone, Default)]
pub struct MemoryRecordStore {
    records: BTreeMap<String, Record>,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with_record(mut self, session_id: impl Into<String>, record: Record) -> Self {
        self.insert(session_id, record);
        self
    }

    /// Insert or replace a record.
    pub fn insert(&mut self, session_id: impl Into<String>, record: Record) {
        self.records.insert(session_id.into(), record);
    }

    /// Known session ids, sorted.
    pub fn session_ids(&self) -> impl Iterator<Item = &str> {
        self.records.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl RecordStore for MemoryRecordStore {
    fn lookup(&self, session_id: &str) -> Option<&Record> {
        self.records.get(session_id)
    }
}

/// Store loaded once from disk.
///
/// The path is either a JSON file holding an object of
/// `session_id -> record`, or a directory of `<session_id>.json` files.
#[derive(Debug, Clone)]
pub struct JsonRecordStore {
    path: PathBuf,
    inner: MemoryRecordStore,
}

impl JsonRecordStore {
    /// Open a file or directory store.
    pub fn open(path: &Path) -> Result<Self> {
        let inner = if path.is_dir() {
            load_dir(path)?
        } else if path.is_file() {
            load_file(path)?
        } else {
            return Err(invalid(path, "no such file or directory"));
        };

        info!(
            path = %path.display(),
            records = inner.len(),
            "Record store loaded"
        );

        Ok(Self {
            path: path.to_path_buf(),
            inner,
        })
    }

    /// Where the store was loaded from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn session_ids(&self) -> impl Iterator<Item = &str> {
        self.inner.session_ids()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl RecordStore for JsonRecordStore {
    fn lookup(&self, session_id: &str) -> Option<&Record> {
        self.inner.lookup(session_id)
    }
}

fn load_file(path: &Path) -> Result<MemoryRecordStore> {
    let content = fs::read_to_string(path)?;
    let value: Value = serde_json::from_str(&content)?;
    let Value::Object(map) = value else {
        return Err(invalid(path, "expected an object keyed by session id"));
    };
    Ok(from_map(map))
}

fn from_map(map: Map<String, Value>) -> MemoryRecordStore {
    map.into_iter()
        .fold(MemoryRecordStore::new(), |store, (id, record)| {
            store.with_record(id, record)
        })
}

fn load_dir(path: &Path) -> Result<MemoryRecordStore> {
    let mut store = MemoryRecordStore::new();

    for entry in fs::read_dir(path)? {
        let file = entry?.path();
        if file.extension().and_then(|e| e.to_str()) != Some("json") {
            continue;
        }
        let Some(session_id) = file.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };

        let content = fs::read_to_string(&file)?;
        let record: Value = serde_json::from_str(&content)
            .map_err(|e| invalid(&file, &e.to_string()))?;
        debug!(session_id, file = %file.display(), "Loaded record");
        store.insert(session_id, record);
    }

    Ok(store)
}

fn invalid(path: &Path, reason: &str) -> ReportError {
    ReportError::InvalidStore {
        path: path.display().to_string(),
        reason: reason.to_string(),
    }
}
