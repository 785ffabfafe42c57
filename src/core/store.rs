//! The mock dataset and its backing document.
//!
//! [`MockStore`] owns the records and a [`Backing`] it loads from and
//! persists to. The whole collection is the unit of mutation: there is no
//! per-record update or delete.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::competency::Competency;
use super::error::StoreError;
use super::record::{MockRecord, parse_records};

/// Where the dataset is read from at startup and written to on mutation.
pub trait Backing: Send + Sync + fmt::Debug {
    fn load(&self) -> Result<Vec<MockRecord>, StoreError>;

    /// Persist the full collection, replacing whatever was stored before.
    fn save(&self, records: &[MockRecord]) -> Result<(), StoreError>;
}

/// A JSON document on disk holding an array of flat objects.
#[derive(Debug, Clone)]
pub struct JsonFile {
    path: PathBuf,
}

impl JsonFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Backing for JsonFile {
    fn load(&self) -> Result<Vec<MockRecord>, StoreError> {
        let content = std::fs::read_to_string(&self.path).map_err(|source| StoreError::Read {
            path: self.path.clone(),
            source,
        })?;
        let document: serde_json::Value = serde_json::from_str(&content)?;
        parse_records(document).map_err(StoreError::Shape)
    }

    fn save(&self, records: &[MockRecord]) -> Result<(), StoreError> {
        let mut content = serde_json::to_string_pretty(records)?;
        content.push('\n');
        std::fs::write(&self.path, content).map_err(|source| StoreError::Write {
            path: self.path.clone(),
            source,
        })
    }
}

/// Backing kept in memory, for tests and demos.
#[derive(Debug, Default)]
pub struct InMemory {
    saved: Mutex<Vec<MockRecord>>,
    reject_writes: bool,
}

impl InMemory {
    pub fn new(records: Vec<MockRecord>) -> Self {
        Self {
            saved: Mutex::new(records),
            reject_writes: false,
        }
    }

    /// A backing whose every `save` fails, to exercise persistence errors.
    pub fn read_only(records: Vec<MockRecord>) -> Self {
        Self {
            saved: Mutex::new(records),
            reject_writes: true,
        }
    }

    /// What was last persisted.
    pub fn saved(&self) -> Vec<MockRecord> {
        self.saved.lock().map(|s| s.clone()).unwrap_or_default()
    }
}

impl Backing for InMemory {
    fn load(&self) -> Result<Vec<MockRecord>, StoreError> {
        self.saved
            .lock()
            .map(|s| s.clone())
            .map_err(|e| StoreError::Rejected(e.to_string()))
    }

    fn save(&self, records: &[MockRecord]) -> Result<(), StoreError> {
        if self.reject_writes {
            return Err(StoreError::Rejected("backing is read-only".into()));
        }
        let mut saved = self
            .saved
            .lock()
            .map_err(|e| StoreError::Rejected(e.to_string()))?;
        *saved = records.to_vec();
        Ok(())
    }
}

/// How `POST /update-mock` combines the new records with the dataset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpdateMode {
    /// Discard the current dataset.
    #[default]
    Replace,
    /// Add to the end of the current dataset.
    Append,
}

impl UpdateMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Replace => "replace",
            Self::Append => "append",
        }
    }
}

impl FromStr for UpdateMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "replace" => Ok(Self::Replace),
            "append" => Ok(Self::Append),
            other => Err(other.to_string()),
        }
    }
}

impl fmt::Display for UpdateMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The in-memory dataset, loaded once and mutated wholesale.
#[derive(Debug)]
pub struct MockStore {
    records: Vec<MockRecord>,
    backing: Box<dyn Backing>,
}

impl MockStore {
    /// Load the dataset from `backing`. Failure here is meant to abort
    /// startup; the caller decides.
    pub fn open(backing: impl Backing + 'static) -> Result<Self, StoreError> {
        let records = backing.load()?;
        info!(records = records.len(), "mock data loaded");
        Ok(Self {
            records,
            backing: Box::new(backing),
        })
    }

    /// A store over an [`InMemory`] backing seeded with `records`.
    pub fn in_memory(records: Vec<MockRecord>) -> Self {
        Self {
            backing: Box::new(InMemory::new(records.clone())),
            records,
        }
    }

    /// Re-read the backing, discarding the in-memory collection.
    pub fn reload(&mut self) -> Result<usize, StoreError> {
        self.records = self.backing.load()?;
        Ok(self.records.len())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[MockRecord] {
        &self.records
    }

    /// Linear scan for records of one employer root and competency.
    pub fn query(&self, root: &str, competency: &Competency) -> Vec<MockRecord> {
        let found: Vec<MockRecord> = self
            .records
            .iter()
            .filter(|r| r.matches(root, competency))
            .cloned()
            .collect();
        debug!(root, competency = %competency, found = found.len(), "mock data queried");
        found
    }

    /// Replace the whole dataset. Returns the new total.
    pub fn replace_all(&mut self, records: Vec<MockRecord>) -> Result<usize, StoreError> {
        self.commit(records)
    }

    /// Append to the dataset. Returns the new total.
    pub fn append_all(&mut self, records: Vec<MockRecord>) -> Result<usize, StoreError> {
        let mut next = self.records.clone();
        next.extend(records);
        self.commit(next)
    }

    pub fn apply(&mut self, mode: UpdateMode, records: Vec<MockRecord>) -> Result<usize, StoreError> {
        match mode {
            UpdateMode::Replace => self.replace_all(records),
            UpdateMode::Append => self.append_all(records),
        }
    }

    /// Persist first; memory only changes once the backing accepted it.
    fn commit(&mut self, next: Vec<MockRecord>) -> Result<usize, StoreError> {
        self.backing.save(&next)?;
        self.records = next;
        Ok(self.records.len())
    }
}
