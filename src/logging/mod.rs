//! Tracing subscriber initialization.
//!
//! Progress and errors go to stdout so the tool reads like a normal batch
//! CLI. Respects `RUST_LOG`, defaulting to `info`.

use thiserror::Error;

/// Error type for logging initialization failures.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// Tracing subscriber already initialized
    #[error("Tracing subscriber already initialized")]
    SubscriberAlreadySet,
}

/// Initialize the tracing subscriber with stdout output.
///
/// Respects the RUST_LOG environment variable, defaults to "info" level.
pub fn init() -> Result<(), LoggingError> {
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .try_init()
        .map_err(|_| LoggingError::SubscriberAlreadySet)
}
