//! Screens as pure functions of journal state.
//!
//! # Responsibility
//! - Project the controller's view, entries and editor into plain values a
//!   terminal or embedding UI can draw.
//!
//! # Invariants
//! - Rendering never mutates state and never fails.

pub mod list;
pub mod summary;

use crate::editor::fields::FieldSpec;
use crate::editor::Editor;
use crate::model::entry::EntryKind;
use crate::repo::entry_store::EntryStore;
use crate::service::journal::{Action, Journal, View};
use list::{list_screen, ListScreen};
use summary::{summary_screen, SummaryScreen};

pub const APP_TITLE: &str = "Daily Devotion Planner";

/// Whatever is on screen right now.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Menu(MenuScreen),
    Editor(EditorScreen),
    List(ListScreen),
    Summary(SummaryScreen),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    pub action: Action,
    pub label: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuScreen {
    pub title: &'static str,
    pub items: Vec<MenuItem>,
    pub verse: &'static str,
}

/// One form field with its current draft value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorField {
    pub spec: &'static FieldSpec,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorScreen {
    pub kind: EntryKind,
    pub title: &'static str,
    pub submit_label: &'static str,
    pub fields: Vec<EditorField>,
}

pub fn menu_screen() -> MenuScreen {
    MenuScreen {
        title: APP_TITLE,
        items: vec![
            MenuItem {
                action: Action::AddScripture,
                label: "New scripture reflection",
            },
            MenuItem {
                action: Action::AddInspirational,
                label: "New inspirational reading",
            },
            MenuItem {
                action: Action::ViewList,
                label: "Saved reflections",
            },
        ],
        verse: "\"Your word is a lamp to my feet and a light to my path.\" (Psalm 119:105)",
    }
}

pub fn editor_screen(editor: &Editor) -> EditorScreen {
    let draft = editor.draft();
    EditorScreen {
        kind: editor.kind(),
        title: match editor.kind() {
            EntryKind::Scripture => "Scripture reflection",
            EntryKind::Inspirational => "Inspirational reading",
        },
        submit_label: if editor.is_edit_mode() {
            "Update"
        } else {
            "Save and view summary"
        },
        fields: editor
            .fields()
            .iter()
            .map(|spec| EditorField {
                spec,
                value: draft.get(spec.key).unwrap_or_default().to_string(),
            })
            .collect(),
    }
}

/// Screen for the journal's current state.
///
/// A summary view whose selection is gone falls back to the list.
pub fn render<S: EntryStore>(journal: &Journal<S>) -> Screen {
    let list = || Screen::List(list_screen(journal.entries(), journal.selected_id()));
    match journal.view() {
        View::Menu => Screen::Menu(menu_screen()),
        View::EditingScripture | View::EditingInspirational => match journal.editor() {
            Some(editor) => Screen::Editor(editor_screen(editor)),
            None => Screen::Menu(menu_screen()),
        },
        View::List => list(),
        View::ViewingSummaryScripture | View::ViewingSummaryInspirational => {
            match journal.selected() {
                Some(entry) => Screen::Summary(summary_screen(entry)),
                None => list(),
            }
        }
    }
}
