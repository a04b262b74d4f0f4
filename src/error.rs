//! Error types for the sprite-colorkey crate.

use std::path::PathBuf;

/// Errors that can occur during planning and color-key processing.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A key color string could not be parsed as 6 hex digits.
    #[error("expected 6-character hex color, got '{input}'")]
    InvalidHexColor {
        /// The string that failed to parse.
        input: String,
    },

    /// A tolerance value outside the valid Manhattan-distance range.
    #[error("tolerance must be between 0 and 765, got {value}")]
    ToleranceOutOfRange {
        /// The rejected value.
        value: i64,
    },

    /// The batch output path exists but is not a directory.
    #[error("batch output '{0}' must be a directory")]
    OutputNotDirectory(PathBuf),

    /// The input path exists as neither a file nor a directory.
    #[error("input path '{0}' does not exist")]
    InputNotFound(PathBuf),

    /// Discovery produced no supported image files.
    #[error("no supported image files found")]
    NoSupportedFiles,

    /// A single input file has an unsupported extension.
    #[error("'{0}' is not a supported image format")]
    UnsupportedFormat(PathBuf),

    /// An I/O error occurred while reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized `Result` type for this crate.
pub type Result<T> = std::result::Result<T, Error>;
