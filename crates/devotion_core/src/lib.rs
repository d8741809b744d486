//! Core domain logic for the devotion journal.
//! This crate is the single source of truth for entry and navigation invariants.

pub mod config;
pub mod db;
pub mod editor;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod view;

pub use config::{ConfigError, ConfigOverrides, JournalConfig};
pub use db::{open_db, open_db_in_memory, DbError, DbResult};
pub use editor::draft::{Draft, DraftError};
pub use editor::fields::{FieldInput, FieldSpec, INSPIRATIONAL_FIELDS, SCRIPTURE_FIELDS};
pub use editor::Editor;
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::entry::{
    Entry, EntryId, EntryKind, EntryValidationError, InspirationalEntry, ScriptureEntry,
};
pub use repo::entry_store::{EntryStore, LocalEntryStore, StoreError, StoreResult};
pub use repo::local_storage::{LocalStorage, SqliteLocalStorage, StorageError};
pub use service::journal::{
    Action, Confirm, DeleteOutcome, EntryRef, Journal, JournalError, JournalResult, View,
};
pub use view::{render, Screen};

use std::path::Path;

/// Journal backed by the SQLite local storage table.
pub type SqliteJournal = Journal<LocalEntryStore<SqliteLocalStorage>>;

/// Opens (or creates) the database at `path` and loads the journal from it.
pub fn open_journal(path: &Path) -> DbResult<SqliteJournal> {
    let conn = open_db(path)?;
    Ok(Journal::open(LocalEntryStore::new(SqliteLocalStorage::new(
        conn,
    ))))
}

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
