//! Text composer: combines body paragraphs and notes into one string and
//! computes the styled notes range.
//!
//! Pure, deterministic, and total: any input, including empty strings, is
//! valid. Offsets are measured in UTF-16 code units because that is the
//! unit the Slides API indexes text ranges by. For ASCII decks this equals
//! the character count.

/// Half-open range over the combined text marking the bold+italic region.
///
/// Invariant: `0 <= start <= end <= utf16_len(combined_text)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleRange {
    /// Inclusive start offset, in UTF-16 code units.
    pub start: u32,
    /// Exclusive end offset, in UTF-16 code units.
    pub end: u32,
}

/// Output of the composer: the combined body text and, when notes are
/// present, the range within it that receives emphasis styling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Composed {
    /// Body paragraphs and notes combined into one string.
    pub text: String,
    /// Range of the notes within `text`, absent when notes are empty.
    pub style_range: Option<StyleRange>,
}

/// Length of a string in UTF-16 code units.
pub fn utf16_len(s: &str) -> u32 {
    s.encode_utf16().count() as u32
}

/// Combine body paragraphs and notes.
///
/// The body is the paragraphs joined with single newlines, trimmed of
/// surrounding whitespace; notes are trimmed likewise. Non-empty notes are
/// appended after a blank line and marked with a [`StyleRange`]; the two
/// separator newlines are not part of the range.
pub fn compose(content: &[String], notes: &str) -> Composed {
    let body = content.join("\n");
    let body = body.trim();
    let notes = notes.trim();

    if notes.is_empty() {
        return Composed {
            text: body.to_string(),
            style_range: None,
        };
    }

    if body.is_empty() {
        return Composed {
            text: notes.to_string(),
            style_range: Some(StyleRange {
                start: 0,
                end: utf16_len(notes),
            }),
        };
    }

    let text = format!("{body}\n\n{notes}");
    let start = utf16_len(body) + 2;
    let end = utf16_len(&text);
    Composed {
        text,
        style_range: Some(StyleRange { start, end }),
    }
}
