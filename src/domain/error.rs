//! Error types for the cinefind plugin.
//!
//! [`CinefindError`] is the crate-wide error with a [`Result`] alias. Catalog
//! failures get their own [`CatalogError`] because the orchestrator absorbs
//! them into UI state instead of propagating them.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure of a single catalog request.
///
/// Every variant is absorbed by the orchestrator and shown through the error
/// banner; none of them is fatal to the plugin.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum CatalogError {
    /// The request never produced an API answer (connectivity, DNS, timeout).
    #[error("network error: {0}")]
    Network(String),

    /// The API answered with a non-success status.
    ///
    /// `message` is the API's `status_message` when it sent one.
    #[error("api error ({status}): {message}")]
    Api {
        /// HTTP status code of the reply.
        status: u16,
        /// Message reported by the API.
        message: String,
    },

    /// The API answered with a success status but the body did not decode.
    #[error("malformed response: {0}")]
    Malformed(String),
}

impl CatalogError {
    /// Returns the text shown to the user in the error banner.
    ///
    /// Transport details are kept out of the banner; they are only logged.
    /// API messages are shown as-is since TMDB writes them for end users
    /// (for example "Invalid API key: You must be granted a valid key.").
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Network(_) => {
                "Could not reach the movie database. Check your connection and try again."
                    .to_string()
            }
            Self::Api { message, .. } if !message.trim().is_empty() => message.trim().to_string(),
            Self::Api { status: 401, .. } => {
                "The movie database rejected the request: invalid or missing API token.".to_string()
            }
            Self::Api { status: 429, .. } => {
                "Too many requests. Wait a moment and try again.".to_string()
            }
            Self::Api { .. } => "Something went wrong while talking to the movie database.".to_string(),
            Self::Malformed(_) => "The movie database sent a response that could not be read.".to_string(),
        }
    }
}

/// The main error type for cinefind plugin operations.
#[derive(Debug, Error)]
pub enum CinefindError {
    /// A catalog request failed.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Theme parsing or loading failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Configuration is invalid or incomplete.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A request or reply could not be encoded for the host.
    #[error("Encoding error: {0}")]
    Encode(String),
}

/// A specialized `Result` type for cinefind operations.
pub type Result<T> = std::result::Result<T, CinefindError>;
