//! Read-only summary projections, one per entry kind.
//!
//! Values are reproduced verbatim; optional fields are left out when empty.

use crate::model::entry::{Entry, EntryId, EntryKind, InspirationalEntry, ScriptureEntry};

/// One labeled value on a summary card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryField {
    /// Persisted field key.
    pub key: &'static str,
    pub label: &'static str,
    pub value: String,
    /// Rendered as a block rather than inline.
    pub block: bool,
}

impl SummaryField {
    fn inline(key: &'static str, label: &'static str, value: &str) -> Self {
        Self {
            key,
            label,
            value: value.to_string(),
            block: false,
        }
    }

    fn block(key: &'static str, label: &'static str, value: &str) -> Self {
        Self {
            block: true,
            ..Self::inline(key, label, value)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryScreen {
    pub id: EntryId,
    pub kind: EntryKind,
    pub title: &'static str,
    pub fields: Vec<SummaryField>,
    /// Parsed tags; empty for scripture entries.
    pub tags: Vec<String>,
}

impl SummaryScreen {
    pub fn field(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|field| field.key == key)
            .map(|field| field.value.as_str())
    }
}

pub fn summary_screen(entry: &Entry) -> SummaryScreen {
    match entry {
        Entry::Scripture(entry) => scripture_summary(entry),
        Entry::Inspirational(entry) => inspirational_summary(entry),
    }
}

fn scripture_summary(entry: &ScriptureEntry) -> SummaryScreen {
    let mut fields = vec![
        SummaryField::inline("date", "Date", &entry.date),
        SummaryField::inline("scripture", "Passage", &entry.passage),
        SummaryField::inline("keyVerse", "Key verse", &entry.key_verse),
        SummaryField::inline("summary", "Today's line", &entry.summary),
    ];
    if let Some((title, url)) = entry.video() {
        fields.push(SummaryField::inline("youtubeTitle", "Video", title));
        fields.push(SummaryField::inline("youtubeUrl", "Video link", url));
    }
    fields.extend([
        SummaryField::block("why", "1. WHY - Why does this word matter?", &entry.why),
        SummaryField::block("how", "2. HOW - How should I live?", &entry.how),
        SummaryField::block("what", "3. WHAT - What will I do?", &entry.what),
        SummaryField::block("prayer", "Golden circle prayer", &entry.prayer),
    ]);

    SummaryScreen {
        id: entry.id.clone(),
        kind: EntryKind::Scripture,
        title: "Today's reflection",
        fields,
        tags: Vec::new(),
    }
}

fn inspirational_summary(entry: &InspirationalEntry) -> SummaryScreen {
    let mut fields = vec![
        SummaryField::inline("date", "Date", &entry.date),
        SummaryField::inline("bookTitle", "Book", &entry.book_title),
    ];
    if !entry.author.trim().is_empty() {
        fields.push(SummaryField::inline("author", "Author", &entry.author));
    }
    fields.extend([
        SummaryField::inline("pageRange", "Pages", &entry.page_range),
        SummaryField::inline("tags", "Tags", &entry.tags),
        SummaryField::block("excerpt", "Excerpt", &entry.excerpt),
        SummaryField::block("egwKey", "Key phrase", &entry.key_phrase),
    ]);
    if !entry.reflection.trim().is_empty() {
        fields.push(SummaryField::block(
            "reflection",
            "Reflection",
            &entry.reflection,
        ));
    }
    fields.push(SummaryField::block("egwPrayer", "Prayer", &entry.prayer));

    SummaryScreen {
        id: entry.id.clone(),
        kind: EntryKind::Inspirational,
        title: "Inspirational reading summary",
        fields,
        tags: entry.tag_list().into_iter().map(str::to_string).collect(),
    }
}
