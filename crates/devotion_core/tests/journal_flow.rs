use devotion_core::view::list::ListBody;
use devotion_core::{
    open_db, open_db_in_memory, render, Action, DeleteOutcome, DraftError, Entry, EntryId,
    EntryKind, EntryRef, EntryStore, Journal, JournalError, LocalEntryStore, Screen,
    SqliteLocalStorage, StorageError, StoreError, StoreResult, View,
};
use std::cell::Cell;
use std::collections::HashSet;
use std::path::Path;

type SqliteStore = LocalEntryStore<SqliteLocalStorage>;

fn memory_journal() -> Journal<SqliteStore> {
    Journal::open(LocalEntryStore::new(SqliteLocalStorage::new(
        open_db_in_memory().unwrap(),
    )))
}

fn file_journal(path: &Path) -> Journal<SqliteStore> {
    Journal::open(LocalEntryStore::new(SqliteLocalStorage::new(
        open_db(path).unwrap(),
    )))
}

fn fill<S: EntryStore>(journal: &mut Journal<S>, values: &[(&str, &str)]) {
    for (key, value) in values {
        journal.set_field(key, *value).unwrap();
    }
}

fn save_scripture<S: EntryStore>(journal: &mut Journal<S>, date: &str, passage: &str) -> EntryId {
    journal.add_scripture().unwrap();
    fill(
        journal,
        &[
            ("date", date),
            ("scripture", passage),
            ("keyVerse", "I am the vine; you are the branches."),
            ("why", "Because apart from Him I can do nothing."),
            ("how", "Stay connected\nthrough the day."),
            ("what", "Pray before opening email."),
            ("prayer", "Lord, keep me close."),
            ("summary", "Abide first."),
        ],
    );
    journal.save().unwrap()
}

fn save_inspirational<S: EntryStore>(journal: &mut Journal<S>) -> EntryId {
    journal.add_inspirational().unwrap();
    fill(
        journal,
        &[
            ("date", "2024-02-10"),
            ("bookTitle", "Steps to Christ"),
            ("author", "Ellen G. White"),
            ("pageRange", "93-95"),
            ("excerpt", "Prayer is the opening of the heart to God as to a friend."),
            ("egwKey", "God as a friend"),
            ("reflection", "Talk to Him plainly."),
            ("egwPrayer", "Teach me to pray."),
            ("tags", "prayer, friendship"),
        ],
    );
    journal.save().unwrap()
}

fn yes(_: &str) -> bool {
    true
}

#[test]
fn starts_on_menu_with_empty_collection() {
    let journal = memory_journal();
    assert_eq!(journal.view(), View::Menu);
    assert!(journal.entries().is_empty());
    assert!(journal.editor().is_none());
    assert!(matches!(render(&journal), Screen::Menu(_)));
}

#[test]
fn empty_store_lists_placeholder() {
    let mut journal = memory_journal();
    journal.view_list().unwrap();

    let Screen::List(list) = render(&journal) else {
        panic!("expected list screen");
    };
    assert!(matches!(list.body, ListBody::Placeholder(text) if !text.is_empty()));
    assert!(list.rows().is_empty());
}

#[test]
fn saved_scripture_lists_date_and_passage_and_summarizes_verbatim() {
    let mut journal = memory_journal();
    let id = save_scripture(&mut journal, "2024-01-01", "John 15:5");

    assert_eq!(journal.view(), View::List);
    assert_eq!(journal.selected_id(), Some(&id));
    assert!(journal.editor().is_none());

    let Screen::List(list) = render(&journal) else {
        panic!("expected list screen");
    };
    let row = &list.rows()[0];
    assert!(row.headline.contains("2024-01-01"));
    assert!(row.headline.contains("John 15:5"));
    assert!(row.selected);

    journal.select(&id).unwrap();
    assert_eq!(journal.view(), View::ViewingSummaryScripture);
    let Screen::Summary(summary) = render(&journal) else {
        panic!("expected summary screen");
    };
    assert_eq!(summary.field("date"), Some("2024-01-01"));
    assert_eq!(summary.field("scripture"), Some("John 15:5"));
    assert_eq!(
        summary.field("keyVerse"),
        Some("I am the vine; you are the branches.")
    );
    assert_eq!(summary.field("how"), Some("Stay connected\nthrough the day."));
    assert_eq!(summary.field("summary"), Some("Abide first."));
    assert_eq!(summary.field("youtubeUrl"), None);
}

#[test]
fn saved_inspirational_routes_to_its_summary() {
    let mut journal = memory_journal();
    let id = save_inspirational(&mut journal);

    assert_eq!(journal.view(), View::ViewingSummaryInspirational);
    assert_eq!(journal.selected_id(), Some(&id));
    let Screen::Summary(summary) = render(&journal) else {
        panic!("expected summary screen");
    };
    assert_eq!(summary.kind, EntryKind::Inspirational);
    assert_eq!(summary.tags, vec!["prayer", "friendship"]);
}

#[test]
fn editing_one_field_keeps_id_and_other_fields() {
    let mut journal = memory_journal();
    let id = save_inspirational(&mut journal);
    let original = journal.entry(&id).cloned().unwrap();

    journal.back().unwrap();
    journal.view_list().unwrap();
    journal
        .edit(&EntryRef {
            id: id.clone(),
            kind: EntryKind::Inspirational,
        })
        .unwrap();
    assert_eq!(journal.view(), View::EditingInspirational);
    assert!(journal.editor().unwrap().is_edit_mode());

    journal.set_field("excerpt", "A new excerpt.").unwrap();
    let saved_id = journal.save().unwrap();

    assert_eq!(saved_id, id);
    assert_eq!(journal.entries().len(), 1);
    let (Entry::Inspirational(before), Some(Entry::Inspirational(after))) =
        (original, journal.entry(&id))
    else {
        panic!("expected inspirational entries");
    };
    assert_eq!(after.excerpt, "A new excerpt.");
    assert_eq!(after.id, before.id);
    assert_eq!(after.date, before.date);
    assert_eq!(after.book_title, before.book_title);
    assert_eq!(after.author, before.author);
    assert_eq!(after.page_range, before.page_range);
    assert_eq!(after.key_phrase, before.key_phrase);
    assert_eq!(after.reflection, before.reflection);
    assert_eq!(after.prayer, before.prayer);
    assert_eq!(after.tags, before.tags);
}

#[test]
fn edit_from_summary_opens_the_selected_entry() {
    let mut journal = memory_journal();
    let id = save_inspirational(&mut journal);

    journal.edit_selected().unwrap();
    let editor = journal.editor().unwrap();
    assert_eq!(editor.target(), Some(&id));
    assert_eq!(editor.draft().get("bookTitle"), Some("Steps to Christ"));
}

#[test]
fn cancel_discards_draft_and_returns_to_menu() {
    let mut journal = memory_journal();
    journal.add_scripture().unwrap();
    journal.set_field("scripture", "Romans 8:28").unwrap();
    journal.cancel().unwrap();

    assert_eq!(journal.view(), View::Menu);
    assert!(journal.editor().is_none());
    assert!(journal.entries().is_empty());
    assert!(journal.store().load().is_empty());
}

#[test]
fn invalid_draft_keeps_editor_open() {
    let mut journal = memory_journal();
    journal.add_scripture().unwrap();
    journal.set_field("date", "2024-01-01").unwrap();

    let err = journal.save().unwrap_err();
    assert!(matches!(
        err,
        JournalError::Draft(DraftError::MissingFields(ref keys)) if keys.contains(&"scripture")
    ));
    assert_eq!(journal.view(), View::EditingScripture);
    assert_eq!(
        journal.editor().unwrap().draft().get("date"),
        Some("2024-01-01")
    );
    assert!(journal.entries().is_empty());
}

#[test]
fn actions_outside_their_view_are_rejected_without_side_effects() {
    let mut journal = memory_journal();

    let err = journal.cancel().unwrap_err();
    assert!(matches!(
        err,
        JournalError::InvalidTransition {
            from: View::Menu,
            action: Action::Cancel
        }
    ));
    assert!(journal.save().is_err());
    assert!(journal.set_field("date", "2024-01-01").is_err());
    assert!(journal.back().is_err());

    journal.view_list().unwrap();
    assert!(journal.add_scripture().is_err());
    assert_eq!(journal.view(), View::List);
}

#[test]
fn delete_asks_first_and_honors_decline() {
    let mut journal = memory_journal();
    let id = save_scripture(&mut journal, "2024-01-01", "John 15:5");

    let prompts = Cell::new(0);
    let mut decline = |prompt: &str| {
        prompts.set(prompts.get() + 1);
        assert!(prompt.contains("2024-01-01"));
        false
    };
    assert_eq!(
        journal.delete(&id, &mut decline).unwrap(),
        DeleteOutcome::Declined
    );
    assert_eq!(prompts.get(), 1);
    assert_eq!(journal.entries().len(), 1);

    assert_eq!(
        journal.delete(&id, &mut yes).unwrap(),
        DeleteOutcome::Deleted
    );
    assert!(journal.entries().is_empty());
    assert!(journal.selected_id().is_none());
    assert!(journal.store().load().is_empty());
    assert_eq!(journal.view(), View::List);
}

#[test]
fn delete_removes_only_the_target_and_keeps_order() {
    let mut journal = memory_journal();
    let first = save_scripture(&mut journal, "2024-01-01", "John 15:5");
    journal.back().unwrap();
    let middle = save_inspirational(&mut journal);
    journal.back().unwrap();
    let last = save_scripture(&mut journal, "2024-01-03", "Psalm 23:1");
    journal.back().unwrap();
    journal.view_list().unwrap();
    assert!(journal.editor().is_none());
    let before: Vec<Entry> = journal.entries().to_vec();

    let mut decline = |_: &str| false;
    assert_eq!(
        journal.delete(&middle, &mut decline).unwrap(),
        DeleteOutcome::Declined
    );
    assert_eq!(journal.entries(), before.as_slice());
    assert_eq!(journal.store().load(), before);

    assert_eq!(
        journal.delete(&middle, &mut yes).unwrap(),
        DeleteOutcome::Deleted
    );
    let expected = vec![before[0].clone(), before[2].clone()];
    let ids: Vec<&EntryId> = journal.entries().iter().map(Entry::id).collect();
    assert_eq!(ids, vec![&first, &last]);
    assert_eq!(journal.entries(), expected.as_slice());
    assert_eq!(journal.store().load(), expected);
    assert_eq!(journal.view(), View::List);
}

#[test]
fn delete_of_unknown_id_does_not_prompt() {
    let mut journal = memory_journal();
    journal.view_list().unwrap();

    let mut never = |_: &str| -> bool { panic!("confirmation must not be requested") };
    assert_eq!(
        journal.delete(&EntryId::new("missing"), &mut never).unwrap(),
        DeleteOutcome::NotFound
    );
}

#[test]
fn delete_is_list_only() {
    let mut journal = memory_journal();
    let id = save_inspirational(&mut journal);
    let err = journal.delete(&id, &mut yes).unwrap_err();
    assert!(matches!(err, JournalError::InvalidTransition { .. }));
    assert_eq!(journal.entries().len(), 1);
}

#[test]
fn editing_an_entry_deleted_elsewhere_falls_back_to_blank_form() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("journal.sqlite3");
    let mut first = file_journal(&path);
    let id = save_scripture(&mut first, "2024-01-01", "John 15:5");

    let mut second = file_journal(&path);
    second.view_list().unwrap();
    second.delete(&id, &mut yes).unwrap();

    first.reload();
    assert_eq!(first.view(), View::List);
    assert!(first.selected_id().is_none());

    first
        .edit(&EntryRef {
            id: id.clone(),
            kind: EntryKind::Scripture,
        })
        .unwrap();
    let editor = first.editor().unwrap();
    assert_eq!(first.view(), View::EditingScripture);
    assert!(!editor.is_edit_mode());
    assert_eq!(editor.draft().get("scripture"), Some(""));
}

#[test]
fn reload_blanks_an_open_editor_whose_target_vanished() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("journal.sqlite3");
    let mut first = file_journal(&path);
    let id = save_inspirational(&mut first);
    first.edit_selected().unwrap();

    let mut second = file_journal(&path);
    second.view_list().unwrap();
    second.delete(&id, &mut yes).unwrap();

    first.reload();
    let editor = first.editor().unwrap();
    assert_eq!(editor.kind(), EntryKind::Inspirational);
    assert!(editor.target().is_none());
    assert_eq!(editor.draft().get("bookTitle"), Some(""));
}

#[test]
fn reload_moves_summary_to_list_when_selection_vanished() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("journal.sqlite3");
    let mut first = file_journal(&path);
    let id = save_inspirational(&mut first);
    assert!(first.view().is_summary());

    let mut second = file_journal(&path);
    second.view_list().unwrap();
    second.delete(&id, &mut yes).unwrap();

    first.reload();
    assert_eq!(first.view(), View::List);
    assert!(matches!(render(&first), Screen::List(_)));
}

#[test]
fn saves_persist_across_sessions() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("journal.sqlite3");
    let id = {
        let mut journal = file_journal(&path);
        save_scripture(&mut journal, "2024-05-05", "Psalm 23:1")
    };

    let reopened = file_journal(&path);
    assert_eq!(reopened.entries().len(), 1);
    assert_eq!(reopened.entries()[0].id(), &id);
    assert_eq!(reopened.view(), View::Menu);
}

#[test]
fn new_entries_get_unique_ids_and_append_in_order() {
    let mut journal = memory_journal();
    for day in 1..=20 {
        save_scripture(&mut journal, &format!("2024-01-{day:02}"), "Psalm 1:1");
        journal.back().unwrap();
    }

    let ids: HashSet<&EntryId> = journal.entries().iter().map(Entry::id).collect();
    assert_eq!(ids.len(), 20);
    assert_eq!(journal.entries()[0].date(), "2024-01-01");
    assert_eq!(journal.entries()[19].date(), "2024-01-20");
}

struct FailingStore;

impl EntryStore for FailingStore {
    fn load(&self) -> Vec<Entry> {
        Vec::new()
    }

    fn save(&self, _entries: &[Entry]) -> StoreResult<()> {
        Err(StoreError::Storage(StorageError::BlankKey))
    }
}

#[test]
fn failed_write_leaves_collection_and_editor_untouched() {
    let mut journal = Journal::open(FailingStore);
    journal.add_scripture().unwrap();
    fill(
        &mut journal,
        &[
            ("date", "2024-01-01"),
            ("scripture", "John 1:1"),
            ("keyVerse", "k"),
            ("why", "w"),
            ("how", "h"),
            ("what", "t"),
            ("prayer", "p"),
            ("summary", "s"),
        ],
    );

    let err = journal.save().unwrap_err();
    assert!(matches!(err, JournalError::Store(_)));
    assert!(journal.entries().is_empty());
    assert_eq!(journal.view(), View::EditingScripture);
    assert!(journal.editor().is_some());
}
