//! Credential provider with explicit load/refresh/persist operations.
//!
//! Rather than touching an on-disk token file as ambient state, the
//! [`Authenticator`] owns the token cache and the OAuth flows and is
//! injected into the HTTP client. Authorization expiry is recoverable:
//! an expired token is refreshed, and a failed refresh falls back to the
//! interactive installed-app flow.

mod flow;
mod tokens;

pub use flow::{Authenticator, ClientSecrets, SCOPES};
pub use tokens::{StoredToken, TokenStore};

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the credential provider.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The client secrets file does not exist.
    #[error("Client secrets file not found: {path}")]
    CredentialsNotFound {
        /// The path that was looked up.
        path: PathBuf,
    },

    /// The client secrets file could not be parsed.
    #[error("Invalid client secrets file {path}: {reason}")]
    InvalidCredentials {
        /// The offending file.
        path: PathBuf,
        /// Parse failure details.
        reason: String,
    },

    /// The token cache could not be read or written.
    #[error("Failed to access token cache {path}: {reason}")]
    TokenCache {
        /// The token cache path.
        path: PathBuf,
        /// I/O or parse failure details.
        reason: String,
    },

    /// The token endpoint rejected a refresh or code exchange.
    #[error("Token endpoint returned HTTP {status}: {body}")]
    TokenEndpoint {
        /// HTTP status code.
        status: u16,
        /// Response body, verbatim.
        body: String,
    },

    /// The token endpoint response was missing required fields.
    #[error("Malformed token endpoint response: {reason}")]
    MalformedToken {
        /// What was wrong with the response.
        reason: String,
    },

    /// The user denied the authorization request.
    #[error("Authorization was denied: {reason}")]
    Denied {
        /// Error code reported in the redirect.
        reason: String,
    },

    /// The redirect's state parameter did not match the one we issued.
    #[error("Authorization redirect did not match the expected state")]
    StateMismatch,

    /// The authorization redirect could not be parsed.
    #[error("Malformed authorization redirect: {reason}")]
    MalformedRedirect {
        /// What was wrong with the redirect request.
        reason: String,
    },

    /// HTTP transport failure talking to the token endpoint.
    #[error("HTTP error during authorization: {0}")]
    Http(#[from] reqwest::Error),

    /// I/O failure on the loopback redirect listener.
    #[error("IO error during authorization: {0}")]
    Io(#[from] std::io::Error),
}
