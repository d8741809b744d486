//! Journal view controller.
//!
//! # Responsibility
//! - Own the entry collection, the visible view, the selection and the open
//!   editor for one session.
//! - Apply every user action as a state transition and persist mutations.
//!
//! # Invariants
//! - Starts in `View::Menu`; there is no terminal view.
//! - An editor exists exactly while the view is an editing view.
//! - The in-memory collection changes only after the store accepted the write.
//! - Rejected actions leave all state untouched.
//! - Delete is applied only after the injected confirmation says yes.

use crate::editor::draft::DraftError;
use crate::editor::Editor;
use crate::model::entry::{Entry, EntryId, EntryKind};
use crate::repo::entry_store::{EntryStore, StoreError};
use log::{debug, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Visible screen of the journal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    Menu,
    EditingScripture,
    EditingInspirational,
    List,
    ViewingSummaryScripture,
    ViewingSummaryInspirational,
}

impl View {
    pub fn editing(kind: EntryKind) -> Self {
        match kind {
            EntryKind::Scripture => Self::EditingScripture,
            EntryKind::Inspirational => Self::EditingInspirational,
        }
    }

    pub fn summary(kind: EntryKind) -> Self {
        match kind {
            EntryKind::Scripture => Self::ViewingSummaryScripture,
            EntryKind::Inspirational => Self::ViewingSummaryInspirational,
        }
    }

    pub fn is_editing(self) -> bool {
        matches!(self, Self::EditingScripture | Self::EditingInspirational)
    }

    pub fn is_summary(self) -> bool {
        matches!(
            self,
            Self::ViewingSummaryScripture | Self::ViewingSummaryInspirational
        )
    }

    /// Entry kind bound to an editing or summary view.
    pub fn entry_kind(self) -> Option<EntryKind> {
        match self {
            Self::EditingScripture | Self::ViewingSummaryScripture => Some(EntryKind::Scripture),
            Self::EditingInspirational | Self::ViewingSummaryInspirational => {
                Some(EntryKind::Inspirational)
            }
            Self::Menu | Self::List => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Menu => "menu",
            Self::EditingScripture => "editing-scripture",
            Self::EditingInspirational => "editing-inspirational",
            Self::List => "list",
            Self::ViewingSummaryScripture => "viewing-summary-scripture",
            Self::ViewingSummaryInspirational => "viewing-summary-inspirational",
        }
    }
}

impl Display for View {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User action names, used in errors and transition logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    AddScripture,
    AddInspirational,
    ViewList,
    Select,
    Edit,
    SetField,
    Save,
    Cancel,
    Delete,
    Back,
}

impl Action {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AddScripture => "add_scripture",
            Self::AddInspirational => "add_inspirational",
            Self::ViewList => "view_list",
            Self::Select => "select",
            Self::Edit => "edit",
            Self::SetField => "set_field",
            Self::Save => "save",
            Self::Cancel => "cancel",
            Self::Delete => "delete",
            Self::Back => "back",
        }
    }
}

impl Display for Action {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a list row hands back when the user picks it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntryRef {
    pub id: EntryId,
    pub kind: EntryKind,
}

impl From<&Entry> for EntryRef {
    fn from(entry: &Entry) -> Self {
        Self {
            id: entry.id().clone(),
            kind: entry.kind(),
        }
    }
}

/// Destructive-action confirmation capability.
pub trait Confirm {
    fn confirm(&mut self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: FnMut(&str) -> bool,
{
    fn confirm(&mut self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// Result of a delete request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    /// The user declined; nothing changed.
    Declined,
    /// No entry with that id; nothing was asked.
    NotFound,
}

pub type JournalResult<T> = Result<T, JournalError>;

#[derive(Debug)]
pub enum JournalError {
    /// The current view does not accept this action.
    InvalidTransition { from: View, action: Action },
    Draft(DraftError),
    Store(StoreError),
}

impl Display for JournalError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidTransition { from, action } => {
                write!(f, "action `{action}` is not available from view `{from}`")
            }
            Self::Draft(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for JournalError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidTransition { .. } => None,
            Self::Draft(err) => Some(err),
            Self::Store(err) => Some(err),
        }
    }
}

impl From<DraftError> for JournalError {
    fn from(value: DraftError) -> Self {
        Self::Draft(value)
    }
}

impl From<StoreError> for JournalError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Composition root: store plus view state for one session.
pub struct Journal<S: EntryStore> {
    store: S,
    entries: Vec<Entry>,
    view: View,
    selected: Option<EntryId>,
    editor: Option<Editor>,
}

impl<S: EntryStore> Journal<S> {
    /// Loads the collection once and starts at the menu.
    pub fn open(store: S) -> Self {
        let entries = store.load();
        info!(
            "event=journal_open module=journal status=ok count={}",
            entries.len()
        );
        Self {
            store,
            entries,
            view: View::Menu,
            selected: None,
            editor: None,
        }
    }

    pub fn view(&self) -> View {
        self.view
    }

    /// All entries in persisted order.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn entry(&self, id: &EntryId) -> Option<&Entry> {
        self.entries.iter().find(|entry| entry.id() == id)
    }

    pub fn selected_id(&self) -> Option<&EntryId> {
        self.selected.as_ref()
    }

    pub fn selected(&self) -> Option<&Entry> {
        self.selected.as_ref().and_then(|id| self.entry(id))
    }

    /// Open editor; `Some` exactly while editing.
    pub fn editor(&self) -> Option<&Editor> {
        self.editor.as_ref()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// `menu -> editing-scripture` with a blank form.
    pub fn add_scripture(&mut self) -> JournalResult<()> {
        self.open_blank_editor(Action::AddScripture, EntryKind::Scripture)
    }

    /// `menu -> editing-inspirational` with a blank form.
    pub fn add_inspirational(&mut self) -> JournalResult<()> {
        self.open_blank_editor(Action::AddInspirational, EntryKind::Inspirational)
    }

    /// `menu -> list`.
    pub fn view_list(&mut self) -> JournalResult<()> {
        self.expect_view(Action::ViewList, &[View::Menu])?;
        self.transition(Action::ViewList, View::List);
        Ok(())
    }

    /// `list -> viewing-summary-<kind>` for an existing entry.
    ///
    /// Returns `false` and stays on the list when the id is gone.
    pub fn select(&mut self, id: &EntryId) -> JournalResult<bool> {
        self.expect_view(Action::Select, &[View::List])?;
        let Some(kind) = self.entry(id).map(Entry::kind) else {
            warn!("event=view_transition module=journal status=skipped action=select reason=not_found");
            return Ok(false);
        };
        self.selected = Some(id.clone());
        self.transition(Action::Select, View::summary(kind));
        Ok(true)
    }

    /// `list -> editing-<kind>` carrying the entry as edit target.
    ///
    /// An id that no longer exists opens a blank form of `target.kind`.
    pub fn edit(&mut self, target: &EntryRef) -> JournalResult<()> {
        self.expect_view(Action::Edit, &[View::List])?;
        let editor = match self.entry(&target.id) {
            Some(entry) => Editor::for_entry(entry),
            None => {
                warn!("event=view_transition module=journal status=fallback action=edit reason=target_missing");
                Editor::new(target.kind)
            }
        };
        self.open_editor(Action::Edit, editor);
        Ok(())
    }

    /// `viewing-summary-<kind> -> editing-<kind>` for the shown entry.
    pub fn edit_selected(&mut self) -> JournalResult<()> {
        self.expect_view(
            Action::Edit,
            &[
                View::ViewingSummaryScripture,
                View::ViewingSummaryInspirational,
            ],
        )?;
        let editor = match self.selected() {
            Some(entry) => Editor::for_entry(entry),
            None => {
                let kind = self.view.entry_kind().unwrap_or(EntryKind::Scripture);
                Editor::new(kind)
            }
        };
        self.open_editor(Action::Edit, editor);
        Ok(())
    }

    /// Updates one field of the open draft.
    pub fn set_field(&mut self, key: &str, value: impl Into<String>) -> JournalResult<()> {
        let from = self.view;
        let editor = self.editor.as_mut().ok_or(JournalError::InvalidTransition {
            from,
            action: Action::SetField,
        })?;
        editor.set_field(key, value)?;
        Ok(())
    }

    /// Validates the draft, persists the full collection, and routes:
    /// scripture to the list, inspirational to its summary, both with the
    /// saved entry selected.
    pub fn save(&mut self) -> JournalResult<EntryId> {
        let from = self.view;
        let editor = self.editor.as_ref().ok_or(JournalError::InvalidTransition {
            from,
            action: Action::Save,
        })?;

        let entry = editor.submit(self.entries.iter().map(Entry::id))?;
        let id = entry.id().clone();
        let kind = entry.kind();

        let mut next = self.entries.clone();
        match next.iter().position(|existing| existing.id() == &id) {
            Some(index) => next[index] = entry,
            None => next.push(entry),
        }
        self.store.save(&next)?;

        self.entries = next;
        self.editor = None;
        self.selected = Some(id.clone());
        let to = match kind {
            EntryKind::Scripture => View::List,
            EntryKind::Inspirational => View::summary(kind),
        };
        self.transition(Action::Save, to);
        Ok(id)
    }

    /// `editing-* -> menu`, discarding the draft.
    pub fn cancel(&mut self) -> JournalResult<()> {
        self.expect_view(
            Action::Cancel,
            &[View::EditingScripture, View::EditingInspirational],
        )?;
        self.editor = None;
        self.transition(Action::Cancel, View::Menu);
        Ok(())
    }

    /// `list | summary -> menu`.
    pub fn back(&mut self) -> JournalResult<()> {
        self.expect_view(
            Action::Back,
            &[
                View::List,
                View::ViewingSummaryScripture,
                View::ViewingSummaryInspirational,
            ],
        )?;
        self.transition(Action::Back, View::Menu);
        Ok(())
    }

    /// `list -> list`, removing `id` once `confirm` agrees.
    pub fn delete(
        &mut self,
        id: &EntryId,
        confirm: &mut impl Confirm,
    ) -> JournalResult<DeleteOutcome> {
        self.expect_view(Action::Delete, &[View::List])?;
        let Some(entry) = self.entry(id) else {
            return Ok(DeleteOutcome::NotFound);
        };

        let prompt = format!(
            "Delete the {} from {}? This cannot be undone.",
            entry.kind().label().to_lowercase(),
            entry.date()
        );
        if !confirm.confirm(&prompt) {
            debug!("event=entry_delete module=journal status=declined");
            return Ok(DeleteOutcome::Declined);
        }

        let next: Vec<Entry> = self
            .entries
            .iter()
            .filter(|entry| entry.id() != id)
            .cloned()
            .collect();
        self.store.save(&next)?;
        self.entries = next;

        if self.selected.as_ref() == Some(id) {
            self.selected = None;
        }
        info!(
            "event=entry_delete module=journal status=ok remaining={}",
            self.entries.len()
        );
        Ok(DeleteOutcome::Deleted)
    }

    /// Re-reads the store, e.g. after another session wrote to it.
    ///
    /// A vanished selection is cleared (summary views fall back to the
    /// list); a vanished edit target leaves a blank form of the same kind.
    pub fn reload(&mut self) {
        self.entries = self.store.load();

        if self.selected().is_none() && self.selected.take().is_some() && self.view.is_summary() {
            self.transition(Action::Back, View::List);
        }

        let vanished_target = self
            .editor
            .as_ref()
            .and_then(Editor::target)
            .is_some_and(|id| self.entry(id).is_none());
        if vanished_target {
            if let Some(editor) = self.editor.as_mut() {
                warn!("event=journal_reload module=journal status=fallback reason=edit_target_missing");
                *editor = Editor::new(editor.kind());
            }
        }

        info!(
            "event=journal_reload module=journal status=ok count={}",
            self.entries.len()
        );
    }

    fn open_blank_editor(&mut self, action: Action, kind: EntryKind) -> JournalResult<()> {
        self.expect_view(action, &[View::Menu])?;
        self.open_editor(action, Editor::new(kind));
        Ok(())
    }

    fn open_editor(&mut self, action: Action, editor: Editor) {
        let to = View::editing(editor.kind());
        self.editor = Some(editor);
        self.transition(action, to);
    }

    fn expect_view(&self, action: Action, allowed: &[View]) -> JournalResult<()> {
        if allowed.contains(&self.view) {
            return Ok(());
        }
        debug!(
            "event=view_transition module=journal status=rejected from={} action={}",
            self.view, action
        );
        Err(JournalError::InvalidTransition {
            from: self.view,
            action,
        })
    }

    fn transition(&mut self, action: Action, to: View) {
        debug!(
            "event=view_transition module=journal status=ok from={} to={} action={}",
            self.view, to, action
        );
        self.view = to;
    }
}
