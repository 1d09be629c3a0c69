//! Error types for PFM/PHM decoding.
//!
//! Header problems and stream faults are separate, user-reportable
//! outcomes; short reads and trailing bytes are diagnostics, not errors
//! (see [`crate::payload::ReadStatus`]).

use std::io;
use thiserror::Error;

/// Invalid or unusable header.
#[derive(Debug, Error)]
pub enum FormatError {
    /// Parsed dimensions imply an empty payload.
    #[error("no data: width {width} and height {height} imply an empty image")]
    NoData {
        /// Parsed width.
        width: i64,
        /// Parsed height.
        height: i64,
    },

    /// Parsed dimensions imply a payload over the 1 GB ceiling.
    #[error("calculated image size too large: width {width} and height {height} need more than 1 GB of data")]
    TooLarge {
        /// Parsed width.
        width: i64,
        /// Parsed height.
        height: i64,
    },

    /// Header text could not be tokenized or parsed.
    #[error("malformed header: {0}")]
    Malformed(String),
}

/// Load failure: bad header or stream fault.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Header is invalid.
    #[error(transparent)]
    Format(#[from] FormatError),

    /// The underlying stream faulted.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl LoadError {
    /// Process exit code for this failure.
    ///
    /// Matches the viewer contract: 2 for an empty image, 3 for an
    /// oversized one, 4 for any parse or stream fault.
    pub fn exit_code(&self) -> i32 {
        match self {
            LoadError::Format(FormatError::NoData { .. }) => 2,
            LoadError::Format(FormatError::TooLarge { .. }) => 3,
            LoadError::Format(FormatError::Malformed(_)) => 4,
            LoadError::Io(_) => 4,
        }
    }
}

/// Result type for load operations.
pub type LoadResult<T> = Result<T, LoadError>;
