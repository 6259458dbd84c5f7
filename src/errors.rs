/*!
 * Error types for the desi-translate client.
 *
 * Two kinds of failure reach the user: validation failures, caught before any
 * request is sent, and request failures, which replace a page's result area
 * with a static placeholder. Both are defined here with thiserror.
 */

use thiserror::Error;

/// Failures detected locally, before any network call.
///
/// The `Display` text of each variant is exactly what the page shows in its
/// inline message element.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required input was empty; carries the page-specific prompt
    #[error("{0}")]
    MissingInput(&'static str),

    /// Registration password and confirmation differ
    #[error("Passwords do not match")]
    PasswordMismatch,

    /// Registration password is under the minimum length
    #[error("Password must be at least {min} characters long")]
    PasswordTooShort {
        /// Minimum accepted length
        min: usize,
    },

    /// Subtitle input produced no caption text at all
    #[error("Could not extract subtitle text. Please check the file format.")]
    NoCuesExtracted,

    /// Uploaded file has an extension the page does not accept
    #[error("Unsupported subtitle file type: {0}")]
    UnsupportedFile(String),

    /// Uploaded file exceeds the configured size
    #[error("File is too large ({size} bytes, maximum is {max} bytes)")]
    FileTooLarge {
        /// Actual size in bytes
        size: u64,
        /// Configured limit in bytes
        max: u64,
    },

    /// Nothing to hand to the speech engine
    #[error("{0}")]
    NothingToSpeak(&'static str),

    /// Speech recognition is unavailable
    #[error("Speech Recognition not supported in your browser")]
    RecognitionUnsupported,

    /// Clipboard write was rejected
    #[error("Failed to copy text")]
    CopyFailed,
}

/// Errors that can occur when talking to the translation backend
#[derive(Error, Debug)]
pub enum ApiError {
    /// The request could not be sent or the response body could not be read
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// The response body was not the JSON we expected
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// The backend answered with a non-2xx status
    #[error("API responded with error: {status_code}{}", message_suffix(.message))]
    Status {
        /// HTTP status code
        status_code: u16,
        /// `message` field of the body, when the body had one
        message: Option<String>,
    },
}

fn message_suffix(message: &Option<String>) -> String {
    message.as_deref().map(|m| format!(" - {}", m)).unwrap_or_default()
}

impl ApiError {
    /// True when the backend answered but refused the request
    pub fn is_status(&self) -> bool {
        matches!(self, Self::Status { .. })
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            Self::ParseError(error.to_string())
        } else {
            Self::RequestFailed(error.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(error: serde_json::Error) -> Self {
        Self::ParseError(error.to_string())
    }
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Input rejected before sending
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// Backend failure
    #[error("Backend error: {0}")]
    Api(#[from] ApiError),

    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Invalid or unreadable configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
