//! Entry collection persistence.
//!
//! # Responsibility
//! - Load and save the whole entry collection as one JSON array record.
//!
//! # Invariants
//! - `load` never fails: missing, unreadable or non-array data loads as empty.
//! - A readable array keeps every valid record; invalid records and repeated
//!   ids are skipped with a `warn!`.
//! - `save` rewrites the full collection; last writer wins.
//! - A persisted collection never holds two entries with the same id.

use super::local_storage::{LocalStorage, StorageError};
use crate::model::entry::{Entry, EntryId};
use log::{info, warn};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Local storage key holding the JSON entry array.
pub const ENTRIES_STORAGE_KEY: &str = "devotion.entries";

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug)]
pub enum StoreError {
    Storage(StorageError),
    Json(serde_json::Error),
    DuplicateId(EntryId),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Storage(err) => write!(f, "{err}"),
            Self::Json(err) => write!(f, "entry collection is not valid JSON: {err}"),
            Self::DuplicateId(id) => write!(f, "duplicate entry id in collection: {id}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            Self::Json(err) => Some(err),
            Self::DuplicateId(_) => None,
        }
    }
}

impl From<StorageError> for StoreError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

/// Full-replace persistence contract for the entry collection.
pub trait EntryStore {
    /// Reads the collection. Corruption is swallowed as an empty collection.
    fn load(&self) -> Vec<Entry>;
    /// Replaces the persisted collection with `entries`.
    fn save(&self, entries: &[Entry]) -> StoreResult<()>;
}

/// Entry store over any `LocalStorage` backend.
pub struct LocalEntryStore<S: LocalStorage> {
    storage: S,
}

impl<S: LocalStorage> LocalEntryStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Removes the persisted collection entirely.
    pub fn clear(&self) -> StoreResult<()> {
        self.storage.remove_item(ENTRIES_STORAGE_KEY)?;
        info!("event=store_clear module=store status=ok");
        Ok(())
    }
}

impl<S: LocalStorage> EntryStore for LocalEntryStore<S> {
    fn load(&self) -> Vec<Entry> {
        let raw = match self.storage.get_item(ENTRIES_STORAGE_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                info!("event=store_load module=store status=ok count=0 source=empty");
                return Vec::new();
            }
            Err(err) => {
                warn!("event=store_load module=store status=recovered reason=read_failed error={err}");
                return Vec::new();
            }
        };

        match decode_entries(&raw) {
            Ok(entries) => {
                info!(
                    "event=store_load module=store status=ok count={}",
                    entries.len()
                );
                entries
            }
            Err(err) => {
                warn!(
                    "event=store_load module=store status=recovered reason=corrupt bytes={} error={err}",
                    raw.len()
                );
                Vec::new()
            }
        }
    }

    fn save(&self, entries: &[Entry]) -> StoreResult<()> {
        let raw = encode_entries(entries)?;
        self.storage.set_item(ENTRIES_STORAGE_KEY, &raw)?;
        info!(
            "event=store_save module=store status=ok count={} bytes={}",
            entries.len(),
            raw.len()
        );
        Ok(())
    }
}

/// Parses a persisted JSON array into entries.
///
/// Only a payload that is not a JSON array is an error. Records that fail to
/// decode or validate, and later records reusing an earlier id, are dropped.
pub fn decode_entries(raw: &str) -> StoreResult<Vec<Entry>> {
    let records: Vec<serde_json::Value> = serde_json::from_str(raw)?;
    let mut seen = HashSet::with_capacity(records.len());
    let mut entries = Vec::with_capacity(records.len());
    for (index, record) in records.into_iter().enumerate() {
        let entry = match serde_json::from_value::<Entry>(record) {
            Ok(entry) => entry,
            Err(err) => {
                warn!(
                    "event=store_load module=store status=skipped reason=invalid_record index={index} error={err}"
                );
                continue;
            }
        };
        if !seen.insert(entry.id().clone()) {
            warn!(
                "event=store_load module=store status=skipped reason=duplicate_id index={index} id={}",
                entry.id()
            );
            continue;
        }
        entries.push(entry);
    }
    Ok(entries)
}

/// Serializes entries into the persisted JSON array.
pub fn encode_entries(entries: &[Entry]) -> StoreResult<String> {
    ensure_unique_ids(entries)?;
    Ok(serde_json::to_string(entries)?)
}

fn ensure_unique_ids(entries: &[Entry]) -> StoreResult<()> {
    let mut seen = HashSet::with_capacity(entries.len());
    for entry in entries {
        if !seen.insert(entry.id()) {
            return Err(StoreError::DuplicateId(entry.id().clone()));
        }
    }
    Ok(())
}
