//! Error types for the json2slides application.
//!
//! A hierarchical taxonomy using `thiserror`: the top-level [`AppError`]
//! wraps the domain-specific failures via `From` conversions so the whole
//! pipeline composes with `?`.
//!
//! Recovery strategy: authorization expiry is handled inside the auth
//! layer (refresh, or re-run the interactive flow) and never surfaces
//! here. Everything else is terminal — this is an unattended one-shot
//! batch tool, so the top level logs the error once and exits.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error encompassing all failure modes.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration file could not be read or parsed.
    #[error("Failed to load configuration: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// Deck file could not be read or parsed.
    #[error("Failed to load slide deck: {0}")]
    Deck(#[from] DeckError),

    /// Authorization failed outside the recoverable refresh path.
    #[error("Authorization failed: {0}")]
    Auth(#[from] crate::auth::AuthError),

    /// A remote Slides or Drive call failed.
    #[error("Remote API call failed: {0}")]
    Api(#[from] crate::api::ApiError),

    /// Tracing subscriber could not be initialized.
    #[error("Failed to initialize logging: {0}")]
    Logging(#[from] crate::logging::LoggingError),

    /// Request JSON could not be rendered (dry-run output).
    #[error("Failed to render requests: {0}")]
    Render(#[from] serde_json::Error),
}

/// Errors encountered loading the slide deck.
///
/// Distinct variants for missing file, unreadable file, and malformed
/// JSON keep the top-level message actionable without carrying
/// `serde_json` state through the application.
#[derive(Debug, Error)]
pub enum DeckError {
    /// The deck file does not exist at the given path.
    #[error("Deck file not found: {path}")]
    NotFound {
        /// The filesystem path that was not found.
        path: PathBuf,
    },

    /// The deck file exists but could not be read.
    #[error("Failed to read deck file {path}: {source}")]
    Io {
        /// The path that failed to read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The deck file is not a valid JSON array of slide records.
    #[error("Invalid deck JSON in {path}: {message}")]
    InvalidJson {
        /// The path containing invalid JSON.
        path: PathBuf,
        /// The JSON parser error message.
        message: String,
    },
}
