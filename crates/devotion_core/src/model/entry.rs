//! Journal entry domain model.
//!
//! # Responsibility
//! - Define the two entry variants and the discriminated `Entry` union.
//! - Mint stable entry ids.
//! - Own the persisted JSON shape and the legacy shapes accepted on read.
//!
//! # Invariants
//! - `EntryId` is never blank and never reused for another entry.
//! - Exactly one variant's fields exist per entry; the variant is the type.
//! - Optional fields are empty strings, never absent, once constructed.
//! - Every variant field is written on serialize, so edits merge predictably.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

const ID_SUFFIX_LEN: usize = 6;

/// Opaque entry identifier: creation time in epoch millis plus a random
/// base-36 suffix, e.g. `1704067200000-k3x9qa`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(String);

impl EntryId {
    /// Wraps an existing identifier (read from storage or a UI event).
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Mints a fresh id that is not present in `existing`.
    pub fn mint<'a>(existing: impl IntoIterator<Item = &'a EntryId>) -> Self {
        let taken: HashSet<&str> = existing.into_iter().map(EntryId::as_str).collect();
        loop {
            let candidate = Self(format!("{}-{}", now_epoch_ms(), random_suffix()));
            if !taken.contains(candidate.as_str()) {
                return candidate;
            }
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl Display for EntryId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

fn now_epoch_ms() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis())
        .unwrap_or_default()
}

fn random_suffix() -> String {
    // Low bits of a v4 uuid are uniformly random.
    let mut bits = Uuid::new_v4().as_u128();
    let mut suffix = String::with_capacity(ID_SUFFIX_LEN);
    for _ in 0..ID_SUFFIX_LEN {
        let digit = (bits % 36) as u32;
        bits /= 36;
        suffix.push(char::from_digit(digit, 36).unwrap_or('0'));
    }
    suffix
}

/// Entry discriminant, persisted as the `type` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    /// Golden-circle reflection on a scripture passage.
    Scripture,
    /// Reflection on a passage from an inspirational book.
    Inspirational,
}

impl EntryKind {
    /// Stable persisted value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Scripture => KIND_SCRIPTURE,
            Self::Inspirational => KIND_INSPIRATIONAL,
        }
    }

    /// Short human-facing name.
    pub fn label(self) -> &'static str {
        match self {
            Self::Scripture => "Scripture reflection",
            Self::Inspirational => "Inspirational reading",
        }
    }
}

impl Display for EntryKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

const KIND_SCRIPTURE: &str = "scripture";
const KIND_INSPIRATIONAL: &str = "inspirational";
/// Discriminant written by earlier builds for inspirational entries.
const KIND_INSPIRATIONAL_LEGACY: &str = "egw";

/// Scripture reflection entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptureEntry {
    pub id: EntryId,
    /// Calendar date, `YYYY-MM-DD`.
    pub date: String,
    /// Passage reference, e.g. `John 15:5`.
    pub passage: String,
    pub key_verse: String,
    /// Why does this word matter.
    pub why: String,
    /// How should I live by it.
    pub how: String,
    /// What will I do today.
    pub what: String,
    pub prayer: String,
    /// One-line takeaway shown in the list.
    pub summary: String,
    /// Optional; empty when no video is linked.
    pub video_title: String,
    /// Optional; empty when no video is linked.
    pub video_url: String,
}

impl ScriptureEntry {
    /// Video link, only when both title and url are filled.
    pub fn video(&self) -> Option<(&str, &str)> {
        if self.video_title.trim().is_empty() || self.video_url.trim().is_empty() {
            return None;
        }
        Some((self.video_title.as_str(), self.video_url.as_str()))
    }
}

/// Inspirational reading entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InspirationalEntry {
    pub id: EntryId,
    /// Calendar date, `YYYY-MM-DD`.
    pub date: String,
    pub book_title: String,
    /// Optional.
    pub author: String,
    /// Free-form page range, e.g. `12-15`.
    pub page_range: String,
    pub excerpt: String,
    pub key_phrase: String,
    /// Optional.
    pub reflection: String,
    pub prayer: String,
    /// Optional, comma separated as typed.
    pub tags: String,
}

impl InspirationalEntry {
    /// Tags split on commas; blanks dropped, order kept.
    pub fn tag_list(&self) -> Vec<&str> {
        self.tags
            .split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .collect()
    }
}

/// One persisted journal record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "EntryRecord", into = "EntryRecord")]
pub enum Entry {
    Scripture(ScriptureEntry),
    Inspirational(InspirationalEntry),
}

impl Entry {
    pub fn id(&self) -> &EntryId {
        match self {
            Self::Scripture(entry) => &entry.id,
            Self::Inspirational(entry) => &entry.id,
        }
    }

    pub fn kind(&self) -> EntryKind {
        match self {
            Self::Scripture(_) => EntryKind::Scripture,
            Self::Inspirational(_) => EntryKind::Inspirational,
        }
    }

    pub fn date(&self) -> &str {
        match self {
            Self::Scripture(entry) => &entry.date,
            Self::Inspirational(entry) => &entry.date,
        }
    }

    /// Checks identity and required fields.
    ///
    /// Date format is enforced by the editor, not here, so records from
    /// older builds still load.
    pub fn validate(&self) -> Result<(), EntryValidationError> {
        if self.id().is_blank() {
            return Err(EntryValidationError::BlankId);
        }

        let required: Vec<(&'static str, &str)> = match self {
            Self::Scripture(entry) => vec![
                ("date", entry.date.as_str()),
                ("scripture", entry.passage.as_str()),
                ("keyVerse", entry.key_verse.as_str()),
                ("why", entry.why.as_str()),
                ("how", entry.how.as_str()),
                ("what", entry.what.as_str()),
                ("prayer", entry.prayer.as_str()),
                ("summary", entry.summary.as_str()),
            ],
            Self::Inspirational(entry) => vec![
                ("date", entry.date.as_str()),
                ("bookTitle", entry.book_title.as_str()),
                ("pageRange", entry.page_range.as_str()),
                ("excerpt", entry.excerpt.as_str()),
                ("egwKey", entry.key_phrase.as_str()),
                ("egwPrayer", entry.prayer.as_str()),
            ],
        };

        match required.into_iter().find(|(_, value)| value.trim().is_empty()) {
            Some((field, _)) => Err(EntryValidationError::MissingField {
                id: self.id().clone(),
                field,
            }),
            None => Ok(()),
        }
    }
}

/// Reasons a record cannot be an `Entry`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryValidationError {
    BlankId,
    MissingField { id: EntryId, field: &'static str },
    UnknownKind(String),
}

impl Display for EntryValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankId => write!(f, "entry id must not be blank"),
            Self::MissingField { id, field } => {
                write!(f, "entry {id} is missing required field `{field}`")
            }
            Self::UnknownKind(kind) => write!(f, "unknown entry type `{kind}`"),
        }
    }
}

impl Error for EntryValidationError {}

/// Flat persisted shape. Variant fields are optional on read so records
/// written by older builds (no `type`, sparse optionals) still decode.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EntryRecord {
    #[serde(default)]
    id: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    kind: Option<String>,
    #[serde(default)]
    date: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    scripture: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    key_verse: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    why: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    how: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    what: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    prayer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    youtube_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    youtube_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    book_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    page_range: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    excerpt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    egw_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    reflection: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    egw_prayer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    tags: Option<String>,
}

impl TryFrom<EntryRecord> for Entry {
    type Error = EntryValidationError;

    fn try_from(record: EntryRecord) -> Result<Self, Self::Error> {
        let kind = match record.kind.as_deref() {
            None | Some(KIND_SCRIPTURE) => EntryKind::Scripture,
            Some(KIND_INSPIRATIONAL) | Some(KIND_INSPIRATIONAL_LEGACY) => EntryKind::Inspirational,
            Some(other) => return Err(EntryValidationError::UnknownKind(other.to_string())),
        };

        let id = EntryId::new(record.id);
        let entry = match kind {
            EntryKind::Scripture => Entry::Scripture(ScriptureEntry {
                id,
                date: record.date,
                passage: record.scripture.unwrap_or_default(),
                key_verse: record.key_verse.unwrap_or_default(),
                why: record.why.unwrap_or_default(),
                how: record.how.unwrap_or_default(),
                what: record.what.unwrap_or_default(),
                prayer: record.prayer.unwrap_or_default(),
                summary: record.summary.unwrap_or_default(),
                video_title: record.youtube_title.unwrap_or_default(),
                video_url: record.youtube_url.unwrap_or_default(),
            }),
            EntryKind::Inspirational => Entry::Inspirational(InspirationalEntry {
                id,
                date: record.date,
                book_title: record.book_title.unwrap_or_default(),
                author: record.author.unwrap_or_default(),
                page_range: record.page_range.unwrap_or_default(),
                excerpt: record.excerpt.unwrap_or_default(),
                key_phrase: record.egw_key.unwrap_or_default(),
                reflection: record.reflection.unwrap_or_default(),
                prayer: record.egw_prayer.unwrap_or_default(),
                tags: record.tags.unwrap_or_default(),
            }),
        };

        entry.validate()?;
        Ok(entry)
    }
}

impl From<Entry> for EntryRecord {
    fn from(entry: Entry) -> Self {
        match entry {
            Entry::Scripture(entry) => Self {
                id: entry.id.0,
                kind: Some(KIND_SCRIPTURE.to_string()),
                date: entry.date,
                scripture: Some(entry.passage),
                key_verse: Some(entry.key_verse),
                why: Some(entry.why),
                how: Some(entry.how),
                what: Some(entry.what),
                prayer: Some(entry.prayer),
                summary: Some(entry.summary),
                youtube_title: Some(entry.video_title),
                youtube_url: Some(entry.video_url),
                ..Self::default()
            },
            Entry::Inspirational(entry) => Self {
                id: entry.id.0,
                kind: Some(KIND_INSPIRATIONAL.to_string()),
                date: entry.date,
                book_title: Some(entry.book_title),
                author: Some(entry.author),
                page_range: Some(entry.page_range),
                excerpt: Some(entry.excerpt),
                egw_key: Some(entry.key_phrase),
                reflection: Some(entry.reflection),
                egw_prayer: Some(entry.prayer),
                tags: Some(entry.tags),
                ..Self::default()
            },
        }
    }
}
