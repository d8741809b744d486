//! Embedding bridge for the devotion journal.

pub mod api;
