//! Journal domain model.
//!
//! # Responsibility
//! - Define the canonical entry records shared by editors, store and views.
//!
//! # Invariants
//! - Every entry is identified by a stable `EntryId`.
//! - Deletion is a hard removal from the collection; there are no tombstones.

pub mod entry;
