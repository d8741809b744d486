//! In-progress form values for both editors.
//!
//! # Invariants
//! - Every field starts as an empty string, never absent.
//! - A draft never carries `id` or `type`; the editor attaches both on submit.

use super::fields::{FieldInput, FieldSpec, INSPIRATIONAL_FIELDS, SCRIPTURE_FIELDS};
use crate::model::entry::{Entry, EntryId, EntryKind, InspirationalEntry, ScriptureEntry};
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

static DATE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d{4}-(0[1-9]|1[0-2])-(0[1-9]|[12]\d|3[01])$").expect("valid date regex")
});
static URL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*://[^\s/?#]+\S*$").expect("valid url regex"));

/// Returns whether `value` is a `YYYY-MM-DD` calendar date.
pub fn is_calendar_date(value: &str) -> bool {
    DATE_RE.is_match(value)
}

/// Draft rejection reasons, mirroring native form validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftError {
    /// Required fields left blank, by persisted key, in form order.
    MissingFields(Vec<&'static str>),
    InvalidDate(String),
    InvalidUrl(String),
    /// `set` was called with a key the form does not have.
    UnknownField(String),
}

impl Display for DraftError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingFields(keys) => {
                write!(f, "required fields are empty: {}", keys.join(", "))
            }
            Self::InvalidDate(value) => write!(f, "date must be YYYY-MM-DD, got `{value}`"),
            Self::InvalidUrl(value) => write!(f, "not an absolute URL: `{value}`"),
            Self::UnknownField(key) => write!(f, "unknown form field `{key}`"),
        }
    }
}

impl Error for DraftError {}

/// Scripture form values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScriptureDraft {
    pub date: String,
    pub scripture: String,
    pub key_verse: String,
    pub why: String,
    pub how: String,
    pub what: String,
    pub prayer: String,
    pub summary: String,
    pub youtube_title: String,
    pub youtube_url: String,
}

impl ScriptureDraft {
    fn slot(&self, key: &str) -> Option<&String> {
        Some(match key {
            "date" => &self.date,
            "scripture" => &self.scripture,
            "keyVerse" => &self.key_verse,
            "why" => &self.why,
            "how" => &self.how,
            "what" => &self.what,
            "prayer" => &self.prayer,
            "summary" => &self.summary,
            "youtubeTitle" => &self.youtube_title,
            "youtubeUrl" => &self.youtube_url,
            _ => return None,
        })
    }

    fn slot_mut(&mut self, key: &str) -> Option<&mut String> {
        Some(match key {
            "date" => &mut self.date,
            "scripture" => &mut self.scripture,
            "keyVerse" => &mut self.key_verse,
            "why" => &mut self.why,
            "how" => &mut self.how,
            "what" => &mut self.what,
            "prayer" => &mut self.prayer,
            "summary" => &mut self.summary,
            "youtubeTitle" => &mut self.youtube_title,
            "youtubeUrl" => &mut self.youtube_url,
            _ => return None,
        })
    }
}

impl From<&ScriptureEntry> for ScriptureDraft {
    fn from(entry: &ScriptureEntry) -> Self {
        Self {
            date: entry.date.clone(),
            scripture: entry.passage.clone(),
            key_verse: entry.key_verse.clone(),
            why: entry.why.clone(),
            how: entry.how.clone(),
            what: entry.what.clone(),
            prayer: entry.prayer.clone(),
            summary: entry.summary.clone(),
            youtube_title: entry.video_title.clone(),
            youtube_url: entry.video_url.clone(),
        }
    }
}

/// Inspirational form values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InspirationalDraft {
    pub date: String,
    pub book_title: String,
    pub author: String,
    pub page_range: String,
    pub excerpt: String,
    pub egw_key: String,
    pub reflection: String,
    pub egw_prayer: String,
    pub tags: String,
}

impl InspirationalDraft {
    fn slot(&self, key: &str) -> Option<&String> {
        Some(match key {
            "date" => &self.date,
            "bookTitle" => &self.book_title,
            "author" => &self.author,
            "pageRange" => &self.page_range,
            "excerpt" => &self.excerpt,
            "egwKey" => &self.egw_key,
            "reflection" => &self.reflection,
            "egwPrayer" => &self.egw_prayer,
            "tags" => &self.tags,
            _ => return None,
        })
    }

    fn slot_mut(&mut self, key: &str) -> Option<&mut String> {
        Some(match key {
            "date" => &mut self.date,
            "bookTitle" => &mut self.book_title,
            "author" => &mut self.author,
            "pageRange" => &mut self.page_range,
            "excerpt" => &mut self.excerpt,
            "egwKey" => &mut self.egw_key,
            "reflection" => &mut self.reflection,
            "egwPrayer" => &mut self.egw_prayer,
            "tags" => &mut self.tags,
            _ => return None,
        })
    }
}

impl From<&InspirationalEntry> for InspirationalDraft {
    fn from(entry: &InspirationalEntry) -> Self {
        Self {
            date: entry.date.clone(),
            book_title: entry.book_title.clone(),
            author: entry.author.clone(),
            page_range: entry.page_range.clone(),
            excerpt: entry.excerpt.clone(),
            egw_key: entry.key_phrase.clone(),
            reflection: entry.reflection.clone(),
            egw_prayer: entry.prayer.clone(),
            tags: entry.tags.clone(),
        }
    }
}

/// Form values for one editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Draft {
    Scripture(ScriptureDraft),
    Inspirational(InspirationalDraft),
}

impl Draft {
    /// Empty form of the given kind.
    pub fn empty(kind: EntryKind) -> Self {
        match kind {
            EntryKind::Scripture => Self::Scripture(ScriptureDraft::default()),
            EntryKind::Inspirational => Self::Inspirational(InspirationalDraft::default()),
        }
    }

    /// Form seeded from an existing entry, minus `id` and `type`.
    pub fn from_entry(entry: &Entry) -> Self {
        match entry {
            Entry::Scripture(entry) => Self::Scripture(entry.into()),
            Entry::Inspirational(entry) => Self::Inspirational(entry.into()),
        }
    }

    pub fn kind(&self) -> EntryKind {
        match self {
            Self::Scripture(_) => EntryKind::Scripture,
            Self::Inspirational(_) => EntryKind::Inspirational,
        }
    }

    /// Field layout in form order.
    pub fn fields(&self) -> &'static [FieldSpec] {
        match self {
            Self::Scripture(_) => SCRIPTURE_FIELDS,
            Self::Inspirational(_) => INSPIRATIONAL_FIELDS,
        }
    }

    /// Current value of a field; `None` for keys the form does not have.
    pub fn get(&self, key: &str) -> Option<&str> {
        let slot = match self {
            Self::Scripture(draft) => draft.slot(key),
            Self::Inspirational(draft) => draft.slot(key),
        };
        slot.map(String::as_str)
    }

    /// Replaces one field value. Date and url inputs are stored trimmed.
    pub fn set(&mut self, key: &str, value: impl Into<String>) -> Result<(), DraftError> {
        let mut value = value.into();
        let trims = self.fields().iter().any(|field| {
            field.key == key && matches!(field.input, FieldInput::Date | FieldInput::Url)
        });
        if trims {
            value = value.trim().to_string();
        }
        let slot = match self {
            Self::Scripture(draft) => draft.slot_mut(key),
            Self::Inspirational(draft) => draft.slot_mut(key),
        };
        match slot {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(DraftError::UnknownField(key.to_string())),
        }
    }

    /// Checks required fields, then date and url shapes.
    pub fn validate(&self) -> Result<(), DraftError> {
        let missing: Vec<&'static str> = self
            .fields()
            .iter()
            .filter(|field| field.required)
            .filter(|field| self.get(field.key).map_or(true, |v| v.trim().is_empty()))
            .map(|field| field.key)
            .collect();
        if !missing.is_empty() {
            return Err(DraftError::MissingFields(missing));
        }

        for field in self.fields() {
            let value = self.get(field.key).unwrap_or_default();
            match field.input {
                FieldInput::Date if !is_calendar_date(value) => {
                    return Err(DraftError::InvalidDate(value.to_string()));
                }
                FieldInput::Url if !value.is_empty() && !URL_RE.is_match(value) => {
                    return Err(DraftError::InvalidUrl(value.to_string()));
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Builds the entry this draft describes under `id`.
    ///
    /// Does not validate; callers run `validate()` first.
    pub fn to_entry(&self, id: EntryId) -> Entry {
        match self {
            Self::Scripture(draft) => Entry::Scripture(ScriptureEntry {
                id,
                date: draft.date.clone(),
                passage: draft.scripture.clone(),
                key_verse: draft.key_verse.clone(),
                why: draft.why.clone(),
                how: draft.how.clone(),
                what: draft.what.clone(),
                prayer: draft.prayer.clone(),
                summary: draft.summary.clone(),
                video_title: draft.youtube_title.clone(),
                video_url: draft.youtube_url.clone(),
            }),
            Self::Inspirational(draft) => Entry::Inspirational(InspirationalEntry {
                id,
                date: draft.date.clone(),
                book_title: draft.book_title.clone(),
                author: draft.author.clone(),
                page_range: draft.page_range.clone(),
                excerpt: draft.excerpt.clone(),
                key_phrase: draft.egw_key.clone(),
                reflection: draft.reflection.clone(),
                prayer: draft.egw_prayer.clone(),
                tags: draft.tags.clone(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{is_calendar_date, Draft, DraftError};
    use crate::model::entry::{Entry, EntryId, EntryKind};

    fn filled_scripture() -> Draft {
        let mut draft = Draft::empty(EntryKind::Scripture);
        for (key, value) in [
            ("date", "2024-01-01"),
            ("scripture", "John 15:5"),
            ("keyVerse", "I am the vine"),
            ("why", "He wants closeness"),
            ("how", "Abide daily"),
            ("what", "Read before the phone"),
            ("prayer", "Father, keep me close. Amen."),
            ("summary", "Stay connected"),
        ] {
            draft.set(key, value).expect("known key");
        }
        draft
    }

    #[test]
    fn empty_draft_has_every_field_as_empty_string() {
        for kind in [EntryKind::Scripture, EntryKind::Inspirational] {
            let draft = Draft::empty(kind);
            for field in draft.fields() {
                assert_eq!(draft.get(field.key), Some(""), "field {}", field.key);
            }
        }
    }

    #[test]
    fn validate_lists_missing_required_fields_in_form_order() {
        let mut draft = Draft::empty(EntryKind::Inspirational);
        draft.set("date", "2024-02-02").unwrap();
        draft.set("excerpt", "   ").unwrap();

        let err = draft.validate().unwrap_err();
        assert_eq!(
            err,
            DraftError::MissingFields(vec![
                "bookTitle",
                "pageRange",
                "excerpt",
                "egwKey",
                "egwPrayer"
            ])
        );
    }

    #[test]
    fn date_and_url_are_stored_trimmed_but_text_is_verbatim() {
        let mut draft = filled_scripture();
        draft.set("date", "  2024-03-04 \n").unwrap();
        draft
            .set("youtubeUrl", " https://youtube.com/watch?v=abc ")
            .unwrap();
        draft.set("why", "  indented\n").unwrap();

        draft.validate().expect("valid draft");
        assert_eq!(draft.get("date"), Some("2024-03-04"));
        assert_eq!(draft.get("youtubeUrl"), Some("https://youtube.com/watch?v=abc"));
        assert_eq!(draft.get("why"), Some("  indented\n"));
    }

    #[test]
    fn validate_rejects_malformed_date_and_url() {
        let mut draft = filled_scripture();
        draft.set("date", "01/01/2024").unwrap();
        assert!(matches!(draft.validate(), Err(DraftError::InvalidDate(_))));

        draft.set("date", "2024-01-01").unwrap();
        draft.set("youtubeUrl", "youtube dot com").unwrap();
        assert!(matches!(draft.validate(), Err(DraftError::InvalidUrl(_))));

        draft
            .set("youtubeUrl", "https://youtube.com/watch?v=abc")
            .unwrap();
        draft.validate().expect("valid draft");
    }

    #[test]
    fn set_rejects_keys_from_the_other_form() {
        let mut draft = Draft::empty(EntryKind::Scripture);
        let err = draft.set("egwKey", "x").unwrap_err();
        assert_eq!(err, DraftError::UnknownField("egwKey".to_string()));
    }

    #[test]
    fn entry_seeded_draft_reproduces_entry() {
        let entry = filled_scripture().to_entry(EntryId::new("1-abcdef"));
        let draft = Draft::from_entry(&entry);
        assert_eq!(draft.get("scripture"), Some("John 15:5"));
        assert_eq!(draft.to_entry(entry.id().clone()), entry);
        assert!(matches!(entry, Entry::Scripture(_)));
    }

    #[test]
    fn calendar_date_shape() {
        assert!(is_calendar_date("2024-12-31"));
        assert!(!is_calendar_date("2024-13-01"));
        assert!(!is_calendar_date("2024-1-1"));
        assert!(!is_calendar_date(""));
    }
}
