//! Entry list projection.

use crate::model::entry::{Entry, EntryId};
use crate::service::journal::EntryRef;

pub const LIST_TITLE: &str = "Saved reflections";
pub const EMPTY_LIST_PLACEHOLDER: &str = "No reflections saved yet.";

/// Linked sermon video.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoLink {
    pub title: String,
    pub url: String,
}

/// One list item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRow {
    /// Dispatch handle for select/edit/delete.
    pub target: EntryRef,
    /// `"{date} | {passage or book title}"`.
    pub headline: String,
    /// One-line summary or key phrase.
    pub detail: String,
    pub video: Option<VideoLink>,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListBody {
    /// Shown instead of an empty container.
    Placeholder(&'static str),
    Rows(Vec<ListRow>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListScreen {
    pub title: &'static str,
    pub body: ListBody,
}

impl ListScreen {
    pub fn rows(&self) -> &[ListRow] {
        match &self.body {
            ListBody::Rows(rows) => rows,
            ListBody::Placeholder(_) => &[],
        }
    }
}

pub fn list_screen(entries: &[Entry], selected: Option<&EntryId>) -> ListScreen {
    let body = if entries.is_empty() {
        ListBody::Placeholder(EMPTY_LIST_PLACEHOLDER)
    } else {
        ListBody::Rows(
            entries
                .iter()
                .map(|entry| list_row(entry, selected == Some(entry.id())))
                .collect(),
        )
    };
    ListScreen {
        title: LIST_TITLE,
        body,
    }
}

fn list_row(entry: &Entry, selected: bool) -> ListRow {
    let (headline, detail, video) = match entry {
        Entry::Scripture(entry) => (
            format!("{} | {}", entry.date, entry.passage),
            entry.summary.clone(),
            entry.video().map(|(title, url)| VideoLink {
                title: title.to_string(),
                url: url.to_string(),
            }),
        ),
        Entry::Inspirational(entry) => (
            format!("{} | {}", entry.date, entry.book_title),
            entry.key_phrase.clone(),
            None,
        ),
    };
    ListRow {
        target: EntryRef::from(entry),
        headline,
        detail,
        video,
        selected,
    }
}
