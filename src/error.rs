//! Error types for qrsmith

use crate::mode::QrSegmentMode;
use thiserror::Error;

/// Reasons an encode call can be rejected.
///
/// Every variant describes a problem with the caller's input. All of them are
/// raised while the input is classified or the symbol size is planned, so no
/// partially built symbol ever exists.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QrError {
    /// Unknown mode name, or data the requested mode cannot represent
    #[error("Mode error: {0}")]
    Mode(String),

    /// Error correction level token other than L, M, Q or H
    #[error("Invalid error correction level: {0:?}")]
    ErrorLevel(String),

    /// Version number outside 1 to 40
    #[error("Invalid version: {0} (must be between 1 and 40)")]
    Version(i64),

    /// Payload longer than every permitted version and level can hold
    #[error("Data overflow: {length} characters in {mode} mode, max capacity = {capacity}")]
    DataOverflow {
        mode: QrSegmentMode,
        length: usize,
        capacity: usize,
    },

    /// Text that the byte codec cannot represent, or an unknown codec name
    #[error("Value error: {0}")]
    Value(String),
}

/// Result type alias for qrsmith operations
pub type Result<T> = std::result::Result<T, QrError>;
