//! Static form layouts for both entry editors.

/// Input semantics of one form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldInput {
    /// Single-line free text.
    Text,
    /// Multi-line free text.
    TextArea,
    /// Calendar date, `YYYY-MM-DD`.
    Date,
    /// Absolute URL.
    Url,
}

/// One labeled form field, keyed by its persisted name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub key: &'static str,
    pub label: &'static str,
    pub placeholder: &'static str,
    pub required: bool,
    pub input: FieldInput,
}

impl FieldSpec {
    const fn new(
        key: &'static str,
        label: &'static str,
        placeholder: &'static str,
        required: bool,
        input: FieldInput,
    ) -> Self {
        Self {
            key,
            label,
            placeholder,
            required,
            input,
        }
    }

    pub fn is_multiline(&self) -> bool {
        self.input == FieldInput::TextArea
    }
}

pub const SCRIPTURE_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("date", "Date", "YYYY-MM-DD", true, FieldInput::Date),
    FieldSpec::new(
        "scripture",
        "Today's passage",
        "e.g. John 15:5",
        true,
        FieldInput::Text,
    ),
    FieldSpec::new(
        "youtubeTitle",
        "Sermon video title",
        "e.g. The secret of a victorious life",
        false,
        FieldInput::Text,
    ),
    FieldSpec::new(
        "youtubeUrl",
        "Sermon video URL",
        "https://youtube.com/...",
        false,
        FieldInput::Url,
    ),
    FieldSpec::new(
        "keyVerse",
        "Key verse",
        "The verse that stood out",
        true,
        FieldInput::Text,
    ),
    FieldSpec::new(
        "why",
        "1. WHY - Why does this word matter? (God's heart)",
        "What is God saying through this word?",
        true,
        FieldInput::TextArea,
    ),
    FieldSpec::new(
        "how",
        "2. HOW - How should I live? (application)",
        "What attitude should I take today?",
        true,
        FieldInput::TextArea,
    ),
    FieldSpec::new(
        "what",
        "3. WHAT - What will I do? (action)",
        "One concrete thing to do today",
        true,
        FieldInput::TextArea,
    ),
    FieldSpec::new(
        "prayer",
        "Golden circle prayer",
        "Why: thanks / How: confession / What: petition",
        true,
        FieldInput::TextArea,
    ),
    FieldSpec::new(
        "summary",
        "Today's reflection in one line",
        "The one line to remember today",
        true,
        FieldInput::Text,
    ),
];

pub const INSPIRATIONAL_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("date", "Date", "YYYY-MM-DD", true, FieldInput::Date),
    FieldSpec::new(
        "bookTitle",
        "Book title",
        "e.g. Steps to Christ",
        true,
        FieldInput::Text,
    ),
    FieldSpec::new(
        "author",
        "Author",
        "e.g. Ellen G. White",
        false,
        FieldInput::Text,
    ),
    FieldSpec::new("pageRange", "Pages", "e.g. 12-15", true, FieldInput::Text),
    FieldSpec::new(
        "excerpt",
        "Excerpt",
        "A sentence or paragraph that stood out",
        true,
        FieldInput::TextArea,
    ),
    FieldSpec::new(
        "egwKey",
        "Key phrase",
        "One-sentence summary or keyword",
        true,
        FieldInput::Text,
    ),
    FieldSpec::new(
        "reflection",
        "Reflection",
        "What I felt and how it applies",
        false,
        FieldInput::TextArea,
    ),
    FieldSpec::new(
        "egwPrayer",
        "Prayer",
        "Today's resolve and prayer",
        true,
        FieldInput::TextArea,
    ),
    FieldSpec::new(
        "tags",
        "Tags (comma separated)",
        "faith, obedience, hope",
        false,
        FieldInput::Text,
    ),
];

/// Looks up a field by persisted key.
pub fn find_field(fields: &'static [FieldSpec], key: &str) -> Option<&'static FieldSpec> {
    fields.iter().find(|field| field.key == key)
}

#[cfg(test)]
mod tests {
    use super::{find_field, FieldInput, INSPIRATIONAL_FIELDS, SCRIPTURE_FIELDS};
    use std::collections::HashSet;

    #[test]
    fn keys_are_unique_per_form() {
        for fields in [SCRIPTURE_FIELDS, INSPIRATIONAL_FIELDS] {
            let keys: HashSet<_> = fields.iter().map(|field| field.key).collect();
            assert_eq!(keys.len(), fields.len());
        }
    }

    #[test]
    fn both_forms_start_with_a_required_date() {
        for fields in [SCRIPTURE_FIELDS, INSPIRATIONAL_FIELDS] {
            let first = fields[0];
            assert_eq!(first.key, "date");
            assert!(first.required);
            assert_eq!(first.input, FieldInput::Date);
        }
    }

    #[test]
    fn optional_fields_match_form_layout() {
        let optional = |fields: &'static [super::FieldSpec]| {
            fields
                .iter()
                .filter(|field| !field.required)
                .map(|field| field.key)
                .collect::<Vec<_>>()
        };
        assert_eq!(optional(SCRIPTURE_FIELDS), ["youtubeTitle", "youtubeUrl"]);
        assert_eq!(
            optional(INSPIRATIONAL_FIELDS),
            ["author", "reflection", "tags"]
        );
    }

    #[test]
    fn find_field_resolves_known_keys_only() {
        assert!(find_field(SCRIPTURE_FIELDS, "keyVerse").is_some());
        assert!(find_field(SCRIPTURE_FIELDS, "egwKey").is_none());
    }
}
