//! Slide record type deserialized from the input deck.
//!
//! A deck is an ordered JSON array of these records. Every field is
//! optional in the input; missing fields default to empty and extra
//! fields are ignored.

use serde::Deserialize;

/// One slide description from the input deck.
///
/// Immutable after parse. A record has no identity beyond its position in
/// the input sequence; the builder assigns fresh object identifiers when
/// translating it into edit operations.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SlideRecord {
    /// Slide title. When absent, the builder substitutes a default.
    #[serde(default)]
    pub title: Option<String>,

    /// Body paragraphs, joined with newlines by the text composer.
    #[serde(default)]
    pub content: Vec<String>,

    /// Speaker notes, appended to the body and styled bold+italic.
    #[serde(default)]
    pub notes: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_full_record() {
        let record: SlideRecord = serde_json::from_str(
            r#"{"title": "Intro", "content": ["A", "B"], "notes": "Remember"}"#,
        )
        .expect("valid record");
        assert_eq!(record.title.as_deref(), Some("Intro"));
        assert_eq!(record.content, vec!["A".to_string(), "B".to_string()]);
        assert_eq!(record.notes, "Remember");
    }

    #[test]
    fn all_fields_default_when_absent() {
        let record: SlideRecord = serde_json::from_str("{}").expect("empty object is valid");
        assert_eq!(record.title, None);
        assert!(record.content.is_empty());
        assert!(record.notes.is_empty());
    }

    #[test]
    fn extra_fields_are_ignored() {
        let record: SlideRecord = serde_json::from_str(
            r#"{"title": "One", "content": ["a"], "notes": "", "layout": "WIDE"}"#,
        )
        .expect("extra fields are tolerated");
        assert_eq!(record.title.as_deref(), Some("One"));
        assert_eq!(record.content, vec!["a".to_string()]);
    }
}
