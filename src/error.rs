//! Unified error types for chatlens.
//!
//! This module provides a single [`ChatlensError`] enum that covers all error
//! cases in the library.
//!
//! # What is *not* an error
//!
//! - A transcript line that does not match the header grammar is dropped.
//! - A transcript with zero matched lines parses to an empty table.
//! - An analysis without enough data returns `None` or an empty collection.
//!
//! Only I/O failures, missing external resources, bad configuration and
//! malformed user input (dates, encodings) surface as [`ChatlensError`].

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A specialized [`Result`] type for chatlens operations.
///
/// # Example
///
/// ```rust
/// use chatlens::error::Result;
/// use chatlens::ChatTable;
///
/// fn load() -> Result<ChatTable> {
///     Ok(ChatTable::default())
/// }
/// ```
pub type Result<T> = std::result::Result<T, ChatlensError>;

/// The error type for all chatlens operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ChatlensError {
    /// An I/O error occurred.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// A required external resource (stopword list, config file) could not be read.
    ///
    /// This is a fatal configuration error: the analysis never falls back to
    /// an empty substitute.
    #[error("Missing {kind} at {}: {source}", path.display())]
    MissingResource {
        /// What kind of resource was expected (e.g. "stopword list")
        kind: &'static str,
        /// Where it was looked up
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// The analysis configuration is malformed or out of range.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Description of what's wrong
        message: String,
    },

    /// Invalid date in a date-range filter.
    #[error("Invalid date '{input}'. Expected format: {expected}")]
    InvalidDate {
        /// The invalid date string that was provided
        input: String,
        /// Expected format description
        expected: &'static str,
    },

    /// The transcript produced no messages.
    ///
    /// Library parsing returns an empty table instead; this variant is used
    /// by callers that need to present the condition to a user.
    #[error("Invalid or empty chat file: no message lines could be parsed")]
    EmptyTranscript,

    /// CSV writing error.
    #[cfg(feature = "csv-output")]
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON parsing/serialization error.
    #[cfg(feature = "json-output")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// UTF-8 encoding error.
    #[error("UTF-8 encoding error in {context}: {source}")]
    Utf8 {
        /// Description of where the error occurred
        context: String,
        /// The underlying UTF-8 error
        #[source]
        source: std::string::FromUtf8Error,
    },
}

impl From<std::string::FromUtf8Error> for ChatlensError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        ChatlensError::Utf8 {
            context: "transcript input".to_string(),
            source: err,
        }
    }
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl ChatlensError {
    /// Creates a missing-resource error.
    pub fn missing_resource(kind: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        ChatlensError::MissingResource {
            kind,
            path: path.into(),
            source,
        }
    }

    /// Creates an invalid configuration error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        ChatlensError::InvalidConfig {
            message: message.into(),
        }
    }

    /// Creates an invalid date error.
    pub fn invalid_date(input: impl Into<String>) -> Self {
        ChatlensError::InvalidDate {
            input: input.into(),
            expected: "YYYY-MM-DD",
        }
    }

    /// Returns `true` if this is an IO error.
    pub fn is_io(&self) -> bool {
        matches!(self, ChatlensError::Io(_))
    }

    /// Returns `true` if an external resource was missing.
    pub fn is_missing_resource(&self) -> bool {
        matches!(self, ChatlensError::MissingResource { .. })
    }

    /// Returns `true` if this is a configuration error.
    pub fn is_invalid_config(&self) -> bool {
        matches!(self, ChatlensError::InvalidConfig { .. })
    }

    /// Returns `true` if this is a date-related error.
    pub fn is_invalid_date(&self) -> bool {
        matches!(self, ChatlensError::InvalidDate { .. })
    }

    /// Returns `true` if the transcript was empty or unparseable.
    pub fn is_empty_transcript(&self) -> bool {
        matches!(self, ChatlensError::EmptyTranscript)
    }
}
