//! Entry editors.
//!
//! # Responsibility
//! - Hold the draft for the open form and the entry it edits, if any.
//! - Turn a valid draft into a complete `Entry` on submit.
//!
//! # Invariants
//! - An id is minted only when creating; editing reuses the target id.
//! - The editor kind never changes after opening.

pub mod draft;
pub mod fields;

use crate::model::entry::{Entry, EntryId, EntryKind};
use draft::{Draft, DraftError};
use fields::FieldSpec;

/// One open form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Editor {
    draft: Draft,
    target: Option<EntryId>,
}

impl Editor {
    /// Blank form for a new entry.
    pub fn new(kind: EntryKind) -> Self {
        Self {
            draft: Draft::empty(kind),
            target: None,
        }
    }

    /// Form seeded from `entry`; saving overwrites it in place.
    pub fn for_entry(entry: &Entry) -> Self {
        Self {
            draft: Draft::from_entry(entry),
            target: Some(entry.id().clone()),
        }
    }

    pub fn kind(&self) -> EntryKind {
        self.draft.kind()
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn fields(&self) -> &'static [FieldSpec] {
        self.draft.fields()
    }

    /// Entry being edited; `None` while creating.
    pub fn target(&self) -> Option<&EntryId> {
        self.target.as_ref()
    }

    pub fn is_edit_mode(&self) -> bool {
        self.target.is_some()
    }

    pub fn set_field(&mut self, key: &str, value: impl Into<String>) -> Result<(), DraftError> {
        self.draft.set(key, value)
    }

    /// Validates the draft and builds the entry to persist.
    ///
    /// `existing` is consulted only when a new id has to be minted.
    pub fn submit<'a>(
        &self,
        existing: impl IntoIterator<Item = &'a EntryId>,
    ) -> Result<Entry, DraftError> {
        self.draft.validate()?;
        let id = match &self.target {
            Some(id) => id.clone(),
            None => EntryId::mint(existing),
        };
        Ok(self.draft.to_entry(id))
    }
}
