//! Error types for dictionary construction and token-stream parsing.

use thiserror::Error;

/// Failure modes when building a [`crate::Dictionary`].
#[derive(Debug, Error, Clone, Eq, PartialEq)]
pub enum DictionaryError {
    /// The dictionary already holds the maximum of 256 entries.
    #[error("dictionary already holds the maximum of 256 entries")]
    TooManyEntries,
    /// A snippet exceeded the 255-byte wire limit.
    #[error("dictionary entry is {0} bytes, exceeding the 255-byte limit")]
    EntryTooLong(usize),
}

/// Failure modes when parsing a tag-byte token stream (spec.md §3.3).
#[derive(Debug, Error, Clone, Eq, PartialEq)]
pub enum TokenStreamError {
    /// The stream ended mid-token.
    #[error("token stream truncated")]
    Truncated,
    /// A tag byte outside `0x00..=0x03` was encountered.
    #[error("unrecognized token tag byte {0:#04x}")]
    UnknownTag(u8),
    /// A template slot's byte content was not valid UTF-8.
    #[error("template slot contains invalid UTF-8")]
    InvalidUtf8,
}

/// Failure modes when tokenizing raw input (spec.md §4.2).
#[derive(Debug, Error)]
pub enum TokenizeError {
    /// The input exceeds the codec's maximum representable message size.
    #[error("input is {0} bytes, exceeding the maximum representable message size")]
    InputTooLarge(usize),
}

/// Failure modes when replaying a token stream back into bytes
/// (decode-side reconstruction, spec.md §4.4).
#[derive(Debug, Error, Clone, Eq, PartialEq)]
pub enum ReplayError {
    /// A [`crate::Token::Dictionary`] referenced an id outside the
    /// dictionary's registered range.
    #[error("dictionary token referenced unknown id {0}")]
    UnknownDictionaryId(u8),
    /// A [`crate::Token::Match`] distance reached further back than the
    /// bytes produced so far.
    #[error("match distance {distance} exceeds {produced} bytes produced so far")]
    DistanceTooLarge {
        /// The offending distance.
        distance: u16,
        /// Bytes produced before this token.
        produced: usize,
    },
    /// A [`crate::Token::Template`] referenced a template id missing from
    /// the registry supplied at decode time.
    #[error("template token referenced unknown id {0}")]
    UnknownTemplateId(u16),
    /// Formatting a template's captured slots failed.
    #[error(transparent)]
    TemplateFormat(#[from] template::FormatError),
}
