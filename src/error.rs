//! Error types for the childminder statistics engine.
//!
//! The statistics functions themselves never fail: malformed input degrades
//! to zero-valued results. Errors only arise at the boundaries, when parsing
//! month keys and years, loading server configuration, or reading and
//! writing the JSON data files.

use thiserror::Error;

/// The main error type for the engine's I/O and validation boundaries.
///
/// # Example
///
/// ```
/// use assmat_engine::error::EngineError;
///
/// let error = EngineError::InvalidMonthKey {
///     key: "2025-13".to_string(),
/// };
/// assert_eq!(error.to_string(), "Invalid month key '2025-13': expected YYYY-MM");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// A month key was not of the form `YYYY-MM`.
    #[error("Invalid month key '{key}': expected YYYY-MM")]
    InvalidMonthKey {
        /// The rejected key.
        key: String,
    },

    /// A year was outside the supported range or not a number.
    #[error("Invalid year '{year}'")]
    InvalidYear {
        /// The rejected year, as received.
        year: String,
    },

    /// The server configuration file exists but could not be read.
    #[error("Cannot read configuration file '{path}': {message}")]
    ConfigUnreadable {
        /// The configuration file.
        path: String,
        /// The underlying I/O error.
        message: String,
    },

    /// A configuration source held an invalid value.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The file, or the environment variable, holding the value.
        path: String,
        /// What was wrong with it.
        message: String,
    },

    /// A data file could not be read or written.
    #[error("Storage I/O error on '{path}': {message}")]
    StorageIo {
        /// The file or directory involved.
        path: String,
        /// The underlying I/O error.
        message: String,
    },

    /// A data file exists but does not contain valid JSON for its shape.
    #[error("Failed to parse data file '{path}': {message}")]
    StorageParse {
        /// The file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
