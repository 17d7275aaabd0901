//! Identifier newtypes with smart constructors.
//!
//! Remote object identifiers are opaque strings returned by the Google
//! APIs. The newtypes validate non-empty strings at construction time;
//! the raw constructors are never exported.

use std::fmt;

/// Identifier of a created presentation, returned by the Slides API.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PresentationId(String);

impl PresentationId {
    /// Smart constructor: rejects empty identifiers.
    pub fn new(raw: impl Into<String>) -> Result<Self, InvalidId> {
        let raw = raw.into();
        if raw.is_empty() {
            Err(InvalidId::Empty)
        } else {
            Ok(Self(raw))
        }
    }

    /// The raw identifier string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PresentationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of a Drive folder.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FolderId(String);

impl FolderId {
    /// Smart constructor: rejects empty identifiers.
    pub fn new(raw: impl Into<String>) -> Result<Self, InvalidId> {
        let raw = raw.into();
        if raw.is_empty() {
            Err(InvalidId::Empty)
        } else {
            Ok(Self(raw))
        }
    }

    /// The raw identifier string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FolderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Error returned by identifier smart constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidId {
    /// The identifier string was empty.
    #[error("Identifier cannot be empty")]
    Empty,
}

/// The three object identifiers for one slide.
///
/// All three are derived from a single generated token so that every
/// operation in a slide's batch references consistent identifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlideObjectIds {
    slide: String,
    title_box: String,
    content_box: String,
}

impl SlideObjectIds {
    /// Derive identifiers from a freshly generated unique token.
    pub fn generate() -> Self {
        Self::from_token(uuid::Uuid::new_v4().simple().to_string().as_str())
    }

    /// Derive identifiers from a caller-supplied token (deterministic,
    /// used by tests).
    pub fn from_token(token: &str) -> Self {
        let slide = format!("slide_{token}");
        Self {
            title_box: format!("{slide}_title_box"),
            content_box: format!("{slide}_content_box"),
            slide,
        }
    }

    /// Object id of the slide page.
    pub fn slide(&self) -> &str {
        &self.slide
    }

    /// Object id of the title text box.
    pub fn title_box(&self) -> &str {
        &self.title_box
    }

    /// Object id of the content text box.
    pub fn content_box(&self) -> &str {
        &self.content_box
    }
}
