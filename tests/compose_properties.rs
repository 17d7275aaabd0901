//! Property-based tests for the text composer.
//!
//! Tests validate:
//! 1. Empty notes produce no style range and leave the body untouched
//! 2. The style range always covers exactly the trimmed notes
//! 3. Range bounds stay within the combined text
//! 4. Composition is deterministic

use json2slides::compose::{compose, utf16_len};
use proptest::prelude::*;

/// Slice a string by UTF-16 code unit offsets.
fn utf16_slice(s: &str, start: u32, end: u32) -> String {
    let units: Vec<u16> = s.encode_utf16().collect();
    String::from_utf16(&units[start as usize..end as usize])
        .expect("style range boundaries fall on code unit boundaries")
}

fn content_strategy() -> impl Strategy<Value = Vec<String>> {
    proptest::collection::vec(any::<String>(), 0..5)
}

proptest! {
    #[test]
    fn empty_notes_means_no_style_range(content in content_strategy(), notes in "[ \t\n]*") {
        let composed = compose(&content, &notes);
        prop_assert!(composed.style_range.is_none());
        prop_assert_eq!(composed.text, content.join("\n").trim().to_string());
    }

    #[test]
    fn style_range_covers_exactly_the_trimmed_notes(
        content in content_strategy(),
        notes in any::<String>(),
    ) {
        let composed = compose(&content, &notes);
        let trimmed_notes = notes.trim();

        if trimmed_notes.is_empty() {
            prop_assert!(composed.style_range.is_none());
        } else {
            let range = composed.style_range.expect("notes present");
            let styled = utf16_slice(&composed.text, range.start, range.end);
            prop_assert_eq!(styled, trimmed_notes.to_string());
        }
    }

    #[test]
    fn range_starts_after_body_and_separator(
        content in content_strategy(),
        notes in any::<String>(),
    ) {
        let body = content.join("\n");
        let body = body.trim();
        let composed = compose(&content, &notes);

        if let Some(range) = composed.style_range {
            if body.is_empty() {
                prop_assert_eq!(range.start, 0);
            } else {
                prop_assert_eq!(range.start, utf16_len(body) + 2);
            }
            prop_assert_eq!(range.end, utf16_len(&composed.text));
        }
    }

    #[test]
    fn range_bounds_stay_within_combined_text(
        content in content_strategy(),
        notes in any::<String>(),
    ) {
        let composed = compose(&content, &notes);
        if let Some(range) = composed.style_range {
            prop_assert!(range.start <= range.end);
            prop_assert!(range.end <= utf16_len(&composed.text));
        }
    }

    #[test]
    fn compose_is_pure(content in content_strategy(), notes in any::<String>()) {
        prop_assert_eq!(compose(&content, &notes), compose(&content, &notes));
    }

    #[test]
    fn combined_text_has_no_surrounding_whitespace(
        content in content_strategy(),
        notes in any::<String>(),
    ) {
        let composed = compose(&content, &notes);
        prop_assert_eq!(composed.text.trim(), composed.text.as_str());
    }
}
