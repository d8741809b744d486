//! Persistence layer.
//!
//! # Responsibility
//! - `local_storage`: named string records, the stand-in for browser storage.
//! - `entry_store`: the entry collection as one JSON record on top of it.
//!
//! # Invariants
//! - Callers above this layer never see SQL or JSON text.
//! - Entry writes are whole-collection replacements.

pub mod entry_store;
pub mod local_storage;
