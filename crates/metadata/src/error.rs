//! Errors from parsing a serialized metadata array.

use thiserror::Error;

/// Failure modes when parsing the metadata array (spec.md §4.3).
#[derive(Debug, Error, Eq, PartialEq)]
pub enum ParseError {
    /// The buffer was not a whole multiple of [`crate::entry::ENTRY_SIZE`],
    /// or was shorter than `metadata_count * 6` bytes.
    #[error("metadata buffer is truncated: expected {expected} bytes, found {found}")]
    Truncated {
        /// Bytes the header's `metadata_count` implied.
        expected: usize,
        /// Bytes actually available.
        found: usize,
    },
    /// A `kind` byte outside `0x00..=0x04` was encountered in strict mode
    /// (mandatory for version `0x01`).
    #[error("reserved metadata kind 0x{0:02x} is not allowed under strict parsing")]
    ReservedKind(u8),
    /// `token_index` decreased between consecutive entries.
    #[error("metadata token_index is not non-decreasing: {previous} followed by {next}")]
    NonMonotonicTokenIndex {
        /// The previous entry's `token_index`.
        previous: u16,
        /// The offending entry's `token_index`.
        next: u16,
    },
}
