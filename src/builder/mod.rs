//! Request builder: translates one slide record into its ordered batch of
//! edit operations.
//!
//! The order is a remote-API precondition, not an accident of appending:
//! the slide must exist before its shapes are created, and text must be
//! inserted before style ranges referencing it are applied.

use crate::compose::{compose, Composed};
use crate::model::{BoxGeometry, EditOperation, SlideObjectIds, SlideRecord};

/// Title inserted when a record carries none.
pub const DEFAULT_SLIDE_TITLE: &str = "Untitled Slide";

/// Fixed geometry of the title text box.
pub const TITLE_BOX: BoxGeometry = BoxGeometry {
    width_pt: 400.0,
    height_pt: 60.0,
    translate_x_pt: 50.0,
    translate_y_pt: 20.0,
};

/// Fixed geometry of the content text box, below the title.
pub const CONTENT_BOX: BoxGeometry = BoxGeometry {
    width_pt: 400.0,
    height_pt: 300.0,
    translate_x_pt: 50.0,
    translate_y_pt: 100.0,
};

/// Build the ordered operation sequence for one slide.
///
/// Pure data transformation with no error cases: create a blank slide,
/// create the title box and insert the title, create the content box and
/// insert the combined body text, then style the notes range when one
/// exists. Empty text is never inserted (the API rejects empty inserts).
pub fn build_slide_requests(record: &SlideRecord, ids: &SlideObjectIds) -> Vec<EditOperation> {
    let Composed { text, style_range } = compose(&record.content, &record.notes);

    let mut requests = Vec::with_capacity(6);
    requests.push(EditOperation::create_slide(ids.slide()));

    requests.push(EditOperation::create_text_box(
        ids.title_box(),
        ids.slide(),
        TITLE_BOX,
    ));
    let title = record.title.as_deref().unwrap_or(DEFAULT_SLIDE_TITLE);
    if !title.is_empty() {
        requests.push(EditOperation::insert_text(ids.title_box(), title));
    }

    requests.push(EditOperation::create_text_box(
        ids.content_box(),
        ids.slide(),
        CONTENT_BOX,
    ));
    if !text.is_empty() {
        requests.push(EditOperation::insert_text(ids.content_box(), &text));
    }
    if let Some(range) = style_range {
        requests.push(EditOperation::style_bold_italic(ids.content_box(), range));
    }

    requests
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(title: Option<&str>, content: &[&str], notes: &str) -> SlideRecord {
        SlideRecord {
            title: title.map(String::from),
            content: content.iter().map(|s| s.to_string()).collect(),
            notes: notes.to_string(),
        }
    }

    fn ids() -> SlideObjectIds {
        SlideObjectIds::from_token("t0")
    }

    #[test]
    fn full_slide_produces_six_operations_in_order() {
        let requests = build_slide_requests(
            &record(Some("Intro"), &["Hello"], "Remember this"),
            &ids(),
        );
        assert_eq!(requests.len(), 6);
        assert!(matches!(requests[0], EditOperation::CreateSlide(_)));
        assert!(matches!(requests[1], EditOperation::CreateShape(_)));
        assert!(matches!(requests[2], EditOperation::InsertText(_)));
        assert!(matches!(requests[3], EditOperation::CreateShape(_)));
        assert!(matches!(requests[4], EditOperation::InsertText(_)));
        assert!(matches!(requests[5], EditOperation::UpdateTextStyle(_)));
    }

    #[test]
    fn no_notes_means_no_style_operation() {
        let requests = build_slide_requests(&record(Some("Intro"), &["Hello"], ""), &ids());
        assert_eq!(requests.len(), 5);
        assert!(!requests
            .iter()
            .any(|op| matches!(op, EditOperation::UpdateTextStyle(_))));
    }

    #[test]
    fn missing_title_inserts_default() {
        let requests = build_slide_requests(&record(None, &["Hello"], ""), &ids());
        let title_insert = requests
            .iter()
            .find_map(|op| match op {
                EditOperation::InsertText(insert) if insert.object_id == ids().title_box() => {
                    Some(insert.text.clone())
                }
                _ => None,
            })
            .expect("title insert present");
        assert_eq!(title_insert, DEFAULT_SLIDE_TITLE);
    }

    #[test]
    fn empty_body_and_notes_skip_content_insert() {
        let requests = build_slide_requests(&record(Some("Intro"), &[], ""), &ids());
        // Slide, title box, title text, content box. No empty insert.
        assert_eq!(requests.len(), 4);
        assert!(!requests.iter().any(|op| match op {
            EditOperation::InsertText(insert) => insert.object_id == ids().content_box(),
            _ => false,
        }));
    }

    #[test]
    fn shapes_are_created_on_the_new_slide() {
        let requests = build_slide_requests(&record(Some("Intro"), &["Hello"], "n"), &ids());
        for op in &requests {
            if let EditOperation::CreateShape(shape) = op {
                assert_eq!(shape.element_properties.page_object_id, ids().slide());
            }
        }
    }

    #[test]
    fn style_range_targets_content_box() {
        let requests = build_slide_requests(&record(Some("Intro"), &["Hello"], "note"), &ids());
        let style = requests
            .iter()
            .find_map(|op| match op {
                EditOperation::UpdateTextStyle(style) => Some(style),
                _ => None,
            })
            .expect("style operation present");
        assert_eq!(style.object_id, ids().content_box());
        assert_eq!(style.text_range.start_index, 7);
        assert_eq!(style.text_range.end_index, 11);
    }
}
