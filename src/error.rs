//! Error types and result aliases

use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, WatchError>;

/// Errors produced while watching the portal
#[derive(Debug, Error)]
pub enum WatchError {
    /// A required credential or configuration field is missing or invalid.
    /// Fatal at startup, before any navigation happens.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The browser process could not be started
    #[error("failed to launch browser: {0}")]
    LaunchFailed(String),

    /// The browser session rejected or failed an operation
    #[error("browser session error: {0}")]
    Session(String),

    /// A required frame did not appear within the wait bound
    #[error("timed out after {seconds}s waiting for frame '{region}'")]
    NavigationTimeout { region: String, seconds: u64 },

    /// A locator matched nothing in the focused document
    #[error("element '{0}' not found")]
    ElementNotFound(String),

    /// The results table did not have the expected shape
    #[error("extraction failed: {0}")]
    Extraction(String),

    /// A notification sink failed to deliver. Always absorbed by the
    /// dispatcher, never escalated to the polling loop.
    #[error("delivery through sink '{sink}' failed: {reason}")]
    Delivery { sink: String, reason: String },
}
