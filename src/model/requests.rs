//! Edit operations serializing to the Slides `batchUpdate` wire format.
//!
//! Each variant is one remote mutation. The externally-tagged serde
//! representation produces exactly the JSON the API consumes, e.g.
//! `{"createSlide": {"objectId": "...", ...}}`.
//!
//! Operation order within a batch is significant: the slide must exist
//! before shapes are created in it, and text must be inserted before any
//! style range referencing it is applied.

use crate::compose::StyleRange;
use serde::Serialize;

const LAYOUT_BLANK: &str = "BLANK";
const SHAPE_TEXT_BOX: &str = "TEXT_BOX";
const UNIT_PT: &str = "PT";
const RANGE_FIXED: &str = "FIXED_RANGE";
const FIELDS_BOLD_ITALIC: &str = "italic,bold";

/// One remote mutation submitted as part of a slide's batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum EditOperation {
    /// Create a blank slide page.
    CreateSlide(CreateSlide),
    /// Create a text box shape on an existing slide.
    CreateShape(CreateShape),
    /// Insert text into an existing shape.
    InsertText(InsertText),
    /// Apply character styling to a fixed range of existing text.
    UpdateTextStyle(UpdateTextStyle),
}

impl EditOperation {
    /// Create-slide operation with the blank predefined layout.
    pub fn create_slide(object_id: &str) -> Self {
        EditOperation::CreateSlide(CreateSlide {
            object_id: object_id.to_string(),
            slide_layout_reference: SlideLayoutReference {
                predefined_layout: LAYOUT_BLANK.to_string(),
            },
        })
    }

    /// Create-shape operation for a text box with fixed geometry.
    pub fn create_text_box(object_id: &str, page_object_id: &str, geometry: BoxGeometry) -> Self {
        EditOperation::CreateShape(CreateShape {
            object_id: object_id.to_string(),
            shape_type: SHAPE_TEXT_BOX.to_string(),
            element_properties: ElementProperties {
                page_object_id: page_object_id.to_string(),
                size: ShapeSize {
                    height: Dimension::points(geometry.height_pt),
                    width: Dimension::points(geometry.width_pt),
                },
                transform: Transform {
                    scale_x: 1.0,
                    scale_y: 1.0,
                    translate_x: geometry.translate_x_pt,
                    translate_y: geometry.translate_y_pt,
                    unit: UNIT_PT.to_string(),
                },
            },
        })
    }

    /// Insert-text operation at the start of a shape's text.
    pub fn insert_text(object_id: &str, text: &str) -> Self {
        EditOperation::InsertText(InsertText {
            object_id: object_id.to_string(),
            insertion_index: 0,
            text: text.to_string(),
        })
    }

    /// Bold+italic styling over a fixed range of a shape's text.
    ///
    /// Precondition: the text covering `range` must already have been
    /// inserted by an earlier operation in the same batch.
    pub fn style_bold_italic(object_id: &str, range: StyleRange) -> Self {
        EditOperation::UpdateTextStyle(UpdateTextStyle {
            object_id: object_id.to_string(),
            style: TextStyle {
                italic: true,
                bold: true,
            },
            text_range: TextRange {
                kind: RANGE_FIXED.to_string(),
                start_index: range.start,
                end_index: range.end,
            },
            fields: FIELDS_BOLD_ITALIC.to_string(),
        })
    }
}

/// Fixed position and size for a text box, in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxGeometry {
    /// Box width in points.
    pub width_pt: f64,
    /// Box height in points.
    pub height_pt: f64,
    /// Horizontal offset from the page origin, in points.
    pub translate_x_pt: f64,
    /// Vertical offset from the page origin, in points.
    pub translate_y_pt: f64,
}

/// Payload of a create-slide operation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSlide {
    /// Object id assigned to the new slide.
    pub object_id: String,
    /// Layout the slide is created from.
    pub slide_layout_reference: SlideLayoutReference,
}

/// Reference to a predefined slide layout.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlideLayoutReference {
    /// Predefined layout name, e.g. `BLANK`.
    pub predefined_layout: String,
}

/// Payload of a create-shape operation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateShape {
    /// Object id assigned to the new shape.
    pub object_id: String,
    /// Shape type, e.g. `TEXT_BOX`.
    pub shape_type: String,
    /// Placement of the shape on its page.
    pub element_properties: ElementProperties,
}

/// Page placement (size and transform) for a created shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementProperties {
    /// Slide page the shape belongs to.
    pub page_object_id: String,
    /// Shape size.
    pub size: ShapeSize,
    /// Affine transform positioning the shape on the page.
    pub transform: Transform,
}

/// Width and height of a shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeSize {
    /// Shape height.
    pub height: Dimension,
    /// Shape width.
    pub width: Dimension,
}

/// A magnitude with a unit, as the API represents lengths.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dimension {
    /// Length magnitude.
    pub magnitude: f64,
    /// Length unit, e.g. `PT`.
    pub unit: String,
}

impl Dimension {
    /// A dimension measured in points.
    pub fn points(magnitude: f64) -> Self {
        Self {
            magnitude,
            unit: UNIT_PT.to_string(),
        }
    }
}

/// Affine transform placing a shape on its page.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Transform {
    /// Horizontal scale factor.
    pub scale_x: f64,
    /// Vertical scale factor.
    pub scale_y: f64,
    /// Horizontal translation.
    pub translate_x: f64,
    /// Vertical translation.
    pub translate_y: f64,
    /// Unit of the translation components.
    pub unit: String,
}

/// Payload of an insert-text operation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertText {
    /// Shape whose text is edited.
    pub object_id: String,
    /// Insertion offset within the shape's existing text.
    pub insertion_index: u32,
    /// Text to insert.
    pub text: String,
}

/// Payload of an update-text-style operation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTextStyle {
    /// Shape whose text is styled.
    pub object_id: String,
    /// Style flags to apply.
    pub style: TextStyle,
    /// Range of text the style applies to.
    pub text_range: TextRange,
    /// Field mask naming the style flags being set.
    pub fields: String,
}

/// Character style flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStyle {
    /// Italic flag.
    pub italic: bool,
    /// Bold flag.
    pub bold: bool,
}

/// A fixed text range, indexed in UTF-16 code units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextRange {
    /// Range type discriminator, always `FIXED_RANGE` here.
    #[serde(rename = "type")]
    pub kind: String,
    /// Inclusive start offset.
    pub start_index: u32,
    /// Exclusive end offset.
    pub end_index: u32,
}
