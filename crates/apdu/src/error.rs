//! APDU error types

use crate::status::Operation;
use thiserror::Error;

/// Result type for request encoding
pub type InputResult<T> = std::result::Result<T, InputError>;

/// Result type for response decoding
pub type ResponseResult<T> = std::result::Result<T, ResponseError>;

/// Caller input rejected before any frame is built
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    /// Derivation path could not be parsed
    #[error("Invalid derivation path '{path}': {reason}")]
    InvalidPath {
        /// Offending path string
        path: String,
        /// What is wrong with it
        reason: String,
    },

    /// Quantization tag outside the known set
    #[error("Invalid quantization type: {0}")]
    InvalidQuantizationType(String),

    /// Value does not fit its fixed-width field
    #[error("Value for {field} needs {actual} bytes but the field is {width} bytes wide")]
    FieldOverflow {
        /// Field name
        field: &'static str,
        /// Field width in bytes
        width: usize,
        /// Minimal encoded length of the value
        actual: usize,
    },

    /// Hex string could not be decoded
    #[error("Invalid hex for {field}: {reason}")]
    InvalidHex {
        /// Field name
        field: &'static str,
        /// Decoder message
        reason: String,
    },

    /// Exact-width value of the wrong size
    #[error("Invalid length for {field}: expected {expected} bytes, got {actual}")]
    InvalidLength {
        /// Field name
        field: &'static str,
        /// Required size
        expected: usize,
        /// Supplied size
        actual: usize,
    },

    /// Single-frame payload larger than an APDU can carry
    #[error("Payload of {actual} bytes exceeds the {max} byte frame limit")]
    PayloadTooLarge {
        /// Maximum accepted size
        max: usize,
        /// Supplied size
        actual: usize,
    },

    /// First-frame header leaves no room for payload
    #[error("Header of {header} bytes does not fit a {chunk_size} byte frame")]
    HeaderOverflow {
        /// Header length
        header: usize,
        /// Configured chunk size
        chunk_size: usize,
    },

    /// Chunk size outside 1..=255
    #[error("Invalid chunk size: {0}")]
    InvalidChunkSize(usize),
}

impl InputError {
    pub(crate) fn invalid_path(path: &str, reason: impl Into<String>) -> Self {
        InputError::InvalidPath {
            path: path.to_string(),
            reason: reason.into(),
        }
    }
}

/// Device answered with something the parser cannot accept
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResponseError {
    /// Response shorter than the operation's minimum layout
    #[error("Unexpected response for {operation}: expected at least {expected} bytes, got {actual}")]
    UnexpectedResponse {
        /// Operation being decoded
        operation: Operation,
        /// Minimum length
        expected: usize,
        /// Received length
        actual: usize,
    },
}

impl ResponseError {
    pub(crate) fn too_short(operation: Operation, expected: usize, actual: usize) -> Self {
        ResponseError::UnexpectedResponse {
            operation,
            expected,
            actual,
        }
    }
}
