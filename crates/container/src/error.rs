//! Container parse failures (spec.md §4.5, §4.7).

use thiserror::Error;

use metadata::ParseError as MetadataParseError;

/// Failure modes when parsing a container's header envelope.
#[derive(Debug, Error, Clone, Eq, PartialEq)]
pub enum HeaderError {
    /// The first 4 bytes were not ASCII `"AURA"`.
    #[error("bad magic bytes {0:02x?}, expected 41 55 52 41")]
    BadMagic([u8; 4]),
    /// The version byte was not `0x01`.
    #[error("unsupported container version {0:#04x}")]
    UnsupportedVersion(u8),
    /// The method byte was outside `{0x00, 0x01, 0x02}`.
    #[error("unrecognized method byte {0:#04x}")]
    BadMethod(u8),
    /// `original_size` exceeded [`crate::MAX_MESSAGE_SIZE`].
    #[error("original_size {0} exceeds the maximum representable message size")]
    MessageTooLarge(u32),
    /// The buffer ended before the declared header fields could be read.
    #[error("container truncated while reading the header envelope")]
    Truncated,
}

/// Failure modes when parsing a full container (header, frequency table,
/// metadata array, and payload together).
#[derive(Debug, Error)]
pub enum ContainerError {
    /// The header envelope was malformed.
    #[error(transparent)]
    Header(#[from] HeaderError),
    /// The metadata array failed to parse.
    #[error(transparent)]
    Metadata(#[from] MetadataParseError),
    /// Method `0x01`'s frequency table did not sum to `ANS_SCALE`.
    #[error("frequency table sums to {0}, expected {expected}", expected = rans::ANS_SCALE)]
    UnnormalizedFrequencyTable(u32),
    /// The buffer had bytes remaining after every declared section was
    /// parsed (spec.md §4.5 validation step 5).
    #[error("{0} unexpected trailing bytes after the declared container sections")]
    TrailingBytes(usize),
    /// The buffer ended before a declared section (frequency table,
    /// metadata array, or payload) could be fully read.
    #[error("container truncated while reading {0}")]
    Truncated(&'static str),
}
