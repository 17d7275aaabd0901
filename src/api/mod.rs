//! Remote service clients and their contracts.
//!
//! The [`SlidesService`] and [`DriveService`] traits are the seams the
//! pipeline is written against; the concrete clients speak the Google
//! REST APIs over a shared authorized HTTP wrapper. Tests substitute
//! in-memory fakes.

mod drive;
mod http;
mod slides;

pub use drive::DriveClient;
pub use http::ApiClient;
pub use slides::SlidesClient;

use crate::model::{EditOperation, FolderId, PresentationId};
use thiserror::Error;

/// Contract of the remote presentation-editing service.
pub trait SlidesService {
    /// Create an empty presentation with the given title.
    fn create_presentation(&mut self, title: &str) -> Result<PresentationId, ApiError>;

    /// Apply one slide's operations as a single batched submission.
    ///
    /// Precondition: operations are ordered so that referenced objects
    /// and text exist before the operations that use them.
    fn batch_update(
        &mut self,
        presentation: &PresentationId,
        operations: &[EditOperation],
    ) -> Result<(), ApiError>;
}

/// Contract of the remote storage service.
pub trait DriveService {
    /// Find an existing, non-trashed folder with exactly this name.
    fn find_folder(&mut self, name: &str) -> Result<Option<FolderId>, ApiError>;

    /// Create a folder with this name, returning its identifier.
    fn create_folder(&mut self, name: &str) -> Result<FolderId, ApiError>;

    /// Current parent identifiers of a file.
    fn parents(&mut self, file: &PresentationId) -> Result<Vec<String>, ApiError>;

    /// Reparent a file: add one folder and remove the given previous
    /// parents in a single update.
    fn move_file(
        &mut self,
        file: &PresentationId,
        add: &FolderId,
        remove: &[String],
    ) -> Result<(), ApiError>;
}

/// Errors raised by remote API calls.
///
/// Authorization expiry never appears here as a plain 401: the HTTP
/// wrapper refreshes once and retries before surfacing anything.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Could not obtain a usable access token.
    #[error("Authorization failed: {0}")]
    Auth(#[from] crate::auth::AuthError),

    /// Transport-level failure (connection, TLS, timeout).
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("{url} returned HTTP {status}: {body}")]
    Status {
        /// Request URL.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Response body, verbatim.
        body: String,
    },

    /// The service answered 2xx but the body was not what the contract
    /// promises.
    #[error("Malformed response from {url}: {reason}")]
    MalformedResponse {
        /// Request URL.
        url: String,
        /// What was wrong with the body.
        reason: String,
    },
}
