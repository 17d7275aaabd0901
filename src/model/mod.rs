//! Domain model: slide records, edit operations, identifiers, and errors.

mod deck;
mod error;
mod identifiers;
mod requests;

pub use deck::SlideRecord;
pub use error::{AppError, DeckError};
pub use identifiers::{FolderId, InvalidId, PresentationId, SlideObjectIds};
pub use requests::{
    BoxGeometry, CreateShape, CreateSlide, Dimension, EditOperation, ElementProperties,
    InsertText, ShapeSize, SlideLayoutReference, TextRange, TextStyle, Transform,
    UpdateTextStyle,
};
