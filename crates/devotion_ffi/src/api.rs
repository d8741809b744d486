//! FFI use-case API for the embedding UI shell.
//!
//! # Responsibility
//! - Expose the journal's actions as stable, sync, use-case-level calls.
//! - Hand back a full screen projection after every call so the host only
//!   draws what it receives.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - One journal session per process, guarded by a mutex; calls are
//!   applied strictly in order.
//! - Every failure is reported through `ok = false` plus a message; the
//!   screen always reflects the state after the call.

use devotion_core::editor::fields::FieldInput;
use devotion_core::view::list::{ListBody, ListScreen};
use devotion_core::view::summary::SummaryScreen;
use devotion_core::view::{EditorScreen, MenuScreen};
use devotion_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, open_journal,
    ping as ping_inner, render, ConfigOverrides, DeleteOutcome, EntryId, EntryKind, EntryRef,
    JournalConfig, Screen, SqliteJournal,
};
use log::{error, info};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, OnceLock, PoisonError};

static SESSION: OnceLock<Mutex<Option<SqliteJournal>>> = OnceLock::new();

/// Minimal health-check API for smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rotated logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir`.
/// - Reconfiguration attempts return an error message.
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), Path::new(log_dir.trim())) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// One menu action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItemDto {
    /// `add_scripture|add_inspirational|view_list`.
    pub action: String,
    pub label: String,
}

/// One editable form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormFieldDto {
    /// Persisted key, passed back to `journal_set_field`.
    pub key: String,
    pub label: String,
    pub placeholder: String,
    pub value: String,
    pub required: bool,
    /// `text|textarea|date|url`.
    pub input: String,
}

/// One saved entry in the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRowDto {
    pub id: String,
    /// `scripture|inspirational`.
    pub kind: String,
    pub headline: String,
    pub detail: String,
    pub video_title: Option<String>,
    pub video_url: Option<String>,
    pub selected: bool,
}

/// One labeled value on a summary card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryFieldDto {
    pub key: String,
    pub label: String,
    pub value: String,
    pub block: bool,
}

/// Flattened screen projection. Only the collections matching `screen`
/// are populated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScreenDto {
    /// Controller view, e.g. `editing-scripture`.
    pub view: String,
    /// What to draw: `menu|editor|list|summary`.
    pub screen: String,
    pub title: String,
    pub menu_items: Vec<MenuItemDto>,
    pub verse: Option<String>,
    pub form_fields: Vec<FormFieldDto>,
    pub submit_label: Option<String>,
    pub rows: Vec<ListRowDto>,
    /// Set instead of `rows` when nothing is saved yet.
    pub placeholder: Option<String>,
    pub summary_fields: Vec<SummaryFieldDto>,
    pub tags: Vec<String>,
    /// Entry shown on a summary screen.
    pub entry_id: Option<String>,
}

/// Response envelope for every journal call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JournalResponse {
    /// Whether the action was applied.
    pub ok: bool,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
    /// Saved entry ID, set by `journal_save` on success.
    pub entry_id: Option<String>,
    /// Screen after the call.
    pub screen: ScreenDto,
}

struct ActionOutcome {
    ok: bool,
    message: String,
    entry_id: Option<String>,
}

impl ActionOutcome {
    fn done(message: impl Into<String>) -> Self {
        Self {
            ok: true,
            message: message.into(),
            entry_id: None,
        }
    }

    fn refused(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            ..Self::done(message)
        }
    }
}

/// Opens the journal stored at `db_path`, replacing any open session.
///
/// An empty `db_path` resolves through `DEVOTION_DB_PATH` and then the
/// platform data directory.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics; the previous session is kept when opening fails.
#[flutter_rust_bridge::frb(sync)]
pub fn journal_open(db_path: String) -> JournalResponse {
    let mut slot = lock_session();
    let path = match resolve_db_path(db_path.trim()) {
        Ok(path) => path,
        Err(err) => return failure_response(&slot, format!("journal_open failed: {err}")),
    };
    match open_journal(&path) {
        Ok(journal) => {
            info!("event=ffi_session_open module=ffi status=ok");
            let response = success_response(&journal, ActionOutcome::done("Journal opened."));
            *slot = Some(journal);
            response
        }
        Err(err) => {
            error!("event=ffi_session_open module=ffi status=error error={err}");
            failure_response(&slot, format!("journal_open failed: {err}"))
        }
    }
}

/// Current screen without changing state.
///
/// # FFI contract
/// - Sync call; opens the default journal on first use.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn journal_screen() -> JournalResponse {
    dispatch("journal_screen", |_| Ok(ActionOutcome::done("")))
}

/// Re-reads the store, picking up writes from other sessions.
#[flutter_rust_bridge::frb(sync)]
pub fn journal_reload() -> JournalResponse {
    dispatch("journal_reload", |journal| {
        journal.reload();
        Ok(ActionOutcome::done("Journal reloaded."))
    })
}

/// Menu: open a blank scripture reflection form.
#[flutter_rust_bridge::frb(sync)]
pub fn journal_add_scripture() -> JournalResponse {
    dispatch("journal_add_scripture", |journal| {
        journal.add_scripture()?;
        Ok(ActionOutcome::done(""))
    })
}

/// Menu: open a blank inspirational reading form.
#[flutter_rust_bridge::frb(sync)]
pub fn journal_add_inspirational() -> JournalResponse {
    dispatch("journal_add_inspirational", |journal| {
        journal.add_inspirational()?;
        Ok(ActionOutcome::done(""))
    })
}

/// Menu: show saved entries.
#[flutter_rust_bridge::frb(sync)]
pub fn journal_view_list() -> JournalResponse {
    dispatch("journal_view_list", |journal| {
        journal.view_list()?;
        Ok(ActionOutcome::done(""))
    })
}

/// List: open the summary of entry `id`.
///
/// `ok = false` when the entry no longer exists; the list stays up.
#[flutter_rust_bridge::frb(sync)]
pub fn journal_select(id: String) -> JournalResponse {
    dispatch("journal_select", |journal| {
        if journal.select(&EntryId::new(id.trim()))? {
            Ok(ActionOutcome::done(""))
        } else {
            Ok(ActionOutcome::refused("Entry not found."))
        }
    })
}

/// List: edit entry `id` of `kind` (`scripture|inspirational`).
///
/// An entry deleted in the meantime opens a blank form of `kind`.
#[flutter_rust_bridge::frb(sync)]
pub fn journal_edit(id: String, kind: String) -> JournalResponse {
    dispatch("journal_edit", |journal| {
        let id = EntryId::new(id.trim());
        let Some(kind) = journal
            .entry(&id)
            .map(|entry| entry.kind())
            .or_else(|| parse_kind(&kind))
        else {
            return Ok(ActionOutcome::refused(format!(
                "unknown entry kind `{}`",
                kind.trim()
            )));
        };
        journal.edit(&EntryRef { id, kind })?;
        Ok(ActionOutcome::done(""))
    })
}

/// Summary: edit the entry on screen.
#[flutter_rust_bridge::frb(sync)]
pub fn journal_edit_selected() -> JournalResponse {
    dispatch("journal_edit_selected", |journal| {
        journal.edit_selected()?;
        Ok(ActionOutcome::done(""))
    })
}

/// Editor: replace one draft field by persisted key.
#[flutter_rust_bridge::frb(sync)]
pub fn journal_set_field(key: String, value: String) -> JournalResponse {
    dispatch("journal_set_field", |journal| {
        journal.set_field(key.trim(), value)?;
        Ok(ActionOutcome::done(""))
    })
}

/// Editor: validate and persist the draft.
///
/// # FFI contract
/// - Returns the saved entry ID on success.
/// - On validation failure the editor stays open with its values.
#[flutter_rust_bridge::frb(sync)]
pub fn journal_save() -> JournalResponse {
    dispatch("journal_save", |journal| {
        let id = journal.save()?;
        Ok(ActionOutcome {
            entry_id: Some(id.to_string()),
            ..ActionOutcome::done("Entry saved.")
        })
    })
}

/// Editor: discard the draft and return to the menu.
#[flutter_rust_bridge::frb(sync)]
pub fn journal_cancel() -> JournalResponse {
    dispatch("journal_cancel", |journal| {
        journal.cancel()?;
        Ok(ActionOutcome::done(""))
    })
}

/// List or summary: return to the menu.
#[flutter_rust_bridge::frb(sync)]
pub fn journal_back() -> JournalResponse {
    dispatch("journal_back", |journal| {
        journal.back()?;
        Ok(ActionOutcome::done(""))
    })
}

/// List: delete entry `id`.
///
/// The host asks the user first and passes the answer as `confirmed`.
///
/// # FFI contract
/// - `confirmed = false` leaves the store untouched and reports `ok = true`.
/// - An unknown `id` reports `ok = false`.
#[flutter_rust_bridge::frb(sync)]
pub fn journal_delete(id: String, confirmed: bool) -> JournalResponse {
    dispatch("journal_delete", |journal| {
        let mut answer = |_: &str| confirmed;
        let outcome = match journal.delete(&EntryId::new(id.trim()), &mut answer)? {
            DeleteOutcome::Deleted => ActionOutcome::done("Entry deleted."),
            DeleteOutcome::Declined => ActionOutcome::done("Delete cancelled."),
            DeleteOutcome::NotFound => ActionOutcome::refused("Entry not found."),
        };
        Ok(outcome)
    })
}

fn dispatch(
    action: &'static str,
    f: impl FnOnce(&mut SqliteJournal) -> Result<ActionOutcome, devotion_core::JournalError>,
) -> JournalResponse {
    let mut slot = lock_session();
    let journal = match ensure_open(&mut slot) {
        Ok(journal) => journal,
        Err(err) => {
            error!("event=ffi_call module=ffi status=error action={action} reason=session_open");
            return failure_response(&None, format!("{action} failed: {err}"));
        }
    };

    match f(&mut *journal) {
        Ok(outcome) => success_response(journal, outcome),
        Err(err) => {
            info!("event=ffi_call module=ffi status=rejected action={action}");
            JournalResponse {
                ok: false,
                message: format!("{action} failed: {err}"),
                entry_id: None,
                screen: screen_dto(journal),
            }
        }
    }
}

fn success_response(journal: &SqliteJournal, outcome: ActionOutcome) -> JournalResponse {
    JournalResponse {
        ok: outcome.ok,
        message: outcome.message,
        entry_id: outcome.entry_id,
        screen: screen_dto(journal),
    }
}

fn failure_response(slot: &Option<SqliteJournal>, message: String) -> JournalResponse {
    JournalResponse {
        ok: false,
        message,
        entry_id: None,
        screen: slot.as_ref().map(screen_dto).unwrap_or_default(),
    }
}

fn lock_session() -> MutexGuard<'static, Option<SqliteJournal>> {
    SESSION
        .get_or_init(|| Mutex::new(None))
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
}

fn ensure_open(slot: &mut Option<SqliteJournal>) -> Result<&mut SqliteJournal, String> {
    if slot.is_none() {
        let path = resolve_db_path("")?;
        let journal = open_journal(&path).map_err(|err| err.to_string())?;
        info!("event=ffi_session_open module=ffi status=ok source=default");
        *slot = Some(journal);
    }
    slot.as_mut()
        .ok_or_else(|| "journal session unavailable".to_string())
}

fn resolve_db_path(raw: &str) -> Result<PathBuf, String> {
    let overrides = ConfigOverrides {
        db_path: (!raw.is_empty()).then(|| PathBuf::from(raw)),
        ..ConfigOverrides::default()
    };
    JournalConfig::resolve(overrides)
        .map(|config| config.db_path)
        .map_err(|err| err.to_string())
}

fn parse_kind(raw: &str) -> Option<EntryKind> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "scripture" => Some(EntryKind::Scripture),
        "inspirational" | "egw" => Some(EntryKind::Inspirational),
        _ => None,
    }
}

fn screen_dto(journal: &SqliteJournal) -> ScreenDto {
    let base = ScreenDto {
        view: journal.view().to_string(),
        ..ScreenDto::default()
    };
    match render(journal) {
        Screen::Menu(menu) => menu_dto(base, menu),
        Screen::Editor(editor) => editor_dto(base, editor),
        Screen::List(list) => list_dto(base, list),
        Screen::Summary(summary) => summary_dto(base, summary),
    }
}

fn menu_dto(base: ScreenDto, menu: MenuScreen) -> ScreenDto {
    ScreenDto {
        screen: "menu".to_string(),
        title: menu.title.to_string(),
        menu_items: menu
            .items
            .into_iter()
            .map(|item| MenuItemDto {
                action: item.action.to_string(),
                label: item.label.to_string(),
            })
            .collect(),
        verse: Some(menu.verse.to_string()),
        ..base
    }
}

fn editor_dto(base: ScreenDto, editor: EditorScreen) -> ScreenDto {
    ScreenDto {
        screen: "editor".to_string(),
        title: editor.title.to_string(),
        form_fields: editor
            .fields
            .into_iter()
            .map(|field| FormFieldDto {
                key: field.spec.key.to_string(),
                label: field.spec.label.to_string(),
                placeholder: field.spec.placeholder.to_string(),
                value: field.value,
                required: field.spec.required,
                input: input_label(field.spec.input).to_string(),
            })
            .collect(),
        submit_label: Some(editor.submit_label.to_string()),
        ..base
    }
}

fn list_dto(base: ScreenDto, list: ListScreen) -> ScreenDto {
    let (rows, placeholder) = match list.body {
        ListBody::Placeholder(text) => (Vec::new(), Some(text.to_string())),
        ListBody::Rows(rows) => (
            rows.into_iter()
                .map(|row| {
                    let (video_title, video_url) = match row.video {
                        Some(video) => (Some(video.title), Some(video.url)),
                        None => (None, None),
                    };
                    ListRowDto {
                        id: row.target.id.to_string(),
                        kind: row.target.kind.to_string(),
                        headline: row.headline,
                        detail: row.detail,
                        video_title,
                        video_url,
                        selected: row.selected,
                    }
                })
                .collect(),
            None,
        ),
    };
    ScreenDto {
        screen: "list".to_string(),
        title: list.title.to_string(),
        rows,
        placeholder,
        ..base
    }
}

fn summary_dto(base: ScreenDto, summary: SummaryScreen) -> ScreenDto {
    ScreenDto {
        screen: "summary".to_string(),
        title: summary.title.to_string(),
        summary_fields: summary
            .fields
            .into_iter()
            .map(|field| SummaryFieldDto {
                key: field.key.to_string(),
                label: field.label.to_string(),
                value: field.value,
                block: field.block,
            })
            .collect(),
        tags: summary.tags,
        entry_id: Some(summary.id.to_string()),
        ..base
    }
}

fn input_label(input: FieldInput) -> &'static str {
    match input {
        FieldInput::Text => "text",
        FieldInput::TextArea => "textarea",
        FieldInput::Date => "date",
        FieldInput::Url => "url",
    }
}

#[cfg(test)]
mod tests {
    use super::{
        core_version, init_logging, journal_add_inspirational, journal_add_scripture,
        journal_back, journal_cancel, journal_delete, journal_edit, journal_open,
        journal_save, journal_screen, journal_select, journal_set_field, journal_view_list,
        ping, JournalResponse,
    };
    use std::sync::{Mutex, MutexGuard, PoisonError};

    // The session is process-global; tests must not interleave.
    static SERIAL: Mutex<()> = Mutex::new(());

    fn fresh_session() -> (MutexGuard<'static, ()>, tempfile::TempDir) {
        let guard = SERIAL.lock().unwrap_or_else(PoisonError::into_inner);
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("journal.sqlite3");
        let opened = journal_open(path.to_string_lossy().into_owned());
        assert!(opened.ok, "{}", opened.message);
        (guard, dir)
    }

    fn fill(values: &[(&str, &str)]) {
        for (key, value) in values {
            let response = journal_set_field(key.to_string(), value.to_string());
            assert!(response.ok, "{}", response.message);
        }
    }

    fn save_scripture() -> JournalResponse {
        assert!(journal_add_scripture().ok);
        fill(&[
            ("date", "2024-01-01"),
            ("scripture", "John 15:5"),
            ("keyVerse", "Abide in me"),
            ("why", "w"),
            ("how", "h"),
            ("what", "t"),
            ("prayer", "p"),
            ("summary", "Abide"),
        ]);
        journal_save()
    }

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_empty_log_dir() {
        let error = init_logging("info".to_string(), String::new());
        assert!(!error.is_empty());
    }

    #[test]
    fn init_logging_rejects_unsupported_level() {
        let error = init_logging("verbose".to_string(), "/tmp/devotion-logs".to_string());
        assert!(!error.is_empty());
    }

    #[test]
    fn fresh_journal_shows_menu() {
        let (_guard, _dir) = fresh_session();
        let response = journal_screen();
        assert!(response.ok);
        assert_eq!(response.screen.screen, "menu");
        assert_eq!(response.screen.view, "menu");
        assert_eq!(response.screen.menu_items.len(), 3);
    }

    #[test]
    fn empty_list_returns_placeholder() {
        let (_guard, _dir) = fresh_session();
        let response = journal_view_list();
        assert!(response.ok);
        assert_eq!(response.screen.screen, "list");
        assert!(response.screen.rows.is_empty());
        assert!(response.screen.placeholder.is_some());
    }

    #[test]
    fn scripture_save_routes_to_list_with_selection() {
        let (_guard, _dir) = fresh_session();
        let saved = save_scripture();
        assert!(saved.ok, "{}", saved.message);
        let id = saved.entry_id.clone().expect("saved id");

        assert_eq!(saved.screen.screen, "list");
        let row = &saved.screen.rows[0];
        assert_eq!(row.id, id);
        assert_eq!(row.headline, "2024-01-01 | John 15:5");
        assert!(row.selected);

        let summary = journal_select(id.clone());
        assert_eq!(summary.screen.screen, "summary");
        assert_eq!(summary.screen.entry_id.as_deref(), Some(id.as_str()));
    }

    #[test]
    fn invalid_save_keeps_editor_and_reports_message() {
        let (_guard, _dir) = fresh_session();
        assert!(journal_add_inspirational().ok);
        let response = journal_save();
        assert!(!response.ok);
        assert!(response.message.contains("bookTitle"));
        assert_eq!(response.screen.screen, "editor");
        assert_eq!(response.screen.view, "editing-inspirational");
    }

    #[test]
    fn out_of_order_action_is_refused() {
        let (_guard, _dir) = fresh_session();
        let response = journal_cancel();
        assert!(!response.ok);
        assert_eq!(response.screen.screen, "menu");
    }

    #[test]
    fn delete_respects_confirmation() {
        let (_guard, _dir) = fresh_session();
        let id = save_scripture().entry_id.expect("saved id");

        let declined = journal_delete(id.clone(), false);
        assert!(declined.ok);
        assert_eq!(declined.screen.rows.len(), 1);

        let deleted = journal_delete(id.clone(), true);
        assert!(deleted.ok);
        assert!(deleted.screen.rows.is_empty());

        let missing = journal_delete(id, true);
        assert!(!missing.ok);
    }

    #[test]
    fn edit_of_missing_entry_opens_blank_form_of_kind() {
        let (_guard, _dir) = fresh_session();
        assert!(journal_view_list().ok);
        let response = journal_edit("gone".to_string(), "inspirational".to_string());
        assert!(response.ok, "{}", response.message);
        assert_eq!(response.screen.view, "editing-inspirational");
        assert_eq!(response.screen.submit_label.as_deref(), Some("Save and view summary"));
        assert!(response
            .screen
            .form_fields
            .iter()
            .all(|field| field.value.is_empty()));
    }

    #[test]
    fn back_from_list_returns_to_menu() {
        let (_guard, _dir) = fresh_session();
        assert!(journal_view_list().ok);
        let response = journal_back();
        assert!(response.ok);
        assert_eq!(response.screen.screen, "menu");
    }
}
