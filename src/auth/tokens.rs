//! Persisted token cache.
//!
//! A small JSON artifact holding the access token, the refresh token, and
//! the access token's expiry. Read at startup, rewritten after every
//! refresh or interactive authorization.

use crate::auth::AuthError;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Refresh this long before the nominal expiry to absorb clock skew and
/// request latency.
const EXPIRY_SKEW_SECONDS: i64 = 60;

/// The persisted token artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredToken {
    /// Bearer token presented to the APIs.
    pub access_token: String,

    /// Long-lived token used to mint new access tokens. Absent when the
    /// authorization server did not grant offline access.
    #[serde(default)]
    pub refresh_token: Option<String>,

    /// When the access token stops being accepted. Absent expiry is
    /// treated as already expired.
    #[serde(default)]
    pub expiry: Option<DateTime<Utc>>,
}

impl StoredToken {
    /// Whether the access token can still be presented at `now`.
    pub fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        match self.expiry {
            Some(expiry) => now + Duration::seconds(EXPIRY_SKEW_SECONDS) < expiry,
            None => false,
        }
    }
}

/// Reads and writes the token cache file.
#[derive(Debug, Clone)]
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    /// A store backed by the given file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the cached token. A missing file yields `Ok(None)`.
    pub fn load(&self) -> Result<Option<StoredToken>, AuthError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let contents = std::fs::read_to_string(&self.path).map_err(|e| AuthError::TokenCache {
            path: self.path.clone(),
            reason: e.to_string(),
        })?;

        let token = serde_json::from_str(&contents).map_err(|e| AuthError::TokenCache {
            path: self.path.clone(),
            reason: e.to_string(),
        })?;

        Ok(Some(token))
    }

    /// Persist a token, creating parent directories as needed.
    pub fn save(&self, token: &StoredToken) -> Result<(), AuthError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| AuthError::TokenCache {
                path: self.path.clone(),
                reason: e.to_string(),
            })?;
        }

        let contents =
            serde_json::to_string_pretty(token).map_err(|e| AuthError::TokenCache {
                path: self.path.clone(),
                reason: e.to_string(),
            })?;

        std::fs::write(&self.path, contents).map_err(|e| AuthError::TokenCache {
            path: self.path.clone(),
            reason: e.to_string(),
        })
    }
}
