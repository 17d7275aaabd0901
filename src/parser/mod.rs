//! Deck loader: reads an ordered sequence of slide records from a JSON
//! file.
//!
//! The file holds a JSON array of slide objects. Order is preserved; a
//! record has no identity beyond its position.

use crate::model::{DeckError, SlideRecord};
use std::fs;
use std::path::Path;

/// Parse a deck from raw JSON text.
pub fn parse_deck(raw: &str) -> Result<Vec<SlideRecord>, serde_json::Error> {
    serde_json::from_str(raw)
}

/// Load a deck from a JSON file.
///
/// A missing file is reported distinctly from an unreadable or malformed
/// one so the top-level message stays actionable.
pub fn load_deck(path: &Path) -> Result<Vec<SlideRecord>, DeckError> {
    if !path.exists() {
        return Err(DeckError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let contents = fs::read_to_string(path).map_err(|source| DeckError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    parse_deck(&contents).map_err(|e| DeckError::InvalidJson {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}
