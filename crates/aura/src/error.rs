//! Top-level error types for the compression driver's public contract
//! (spec.md §7).

use thiserror::Error;

/// Failure modes when decoding a container back to plaintext.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The container's header, frequency table, or metadata array failed
    /// to parse.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// A `0x01` payload's rANS bitstream did not decode to a consistent
    /// end state.
    #[error(transparent)]
    RangeCoder(#[from] rans::RangeCoderError),
    /// Token replay failed to resolve a dictionary, match, or template
    /// reference in the decoded token stream.
    #[error(transparent)]
    Replay(#[from] tokenizer::ReplayError),
    /// A `0x02` or `0x01` payload's byte stream failed to tag-decode.
    #[error(transparent)]
    TokenStream(#[from] tokenizer::TokenStreamError),
    /// A `0x02` payload referenced a template id, or wrong slot count,
    /// that the registry supplied at decode time rejects — spec.md §7
    /// calls this `UnknownTemplateId`, "implies peer mismatch".
    #[error(transparent)]
    TemplateFormat(#[from] template::FormatError),
    /// Decoded length did not match the header's declared
    /// `original_size` (spec.md §4.7: "Token replay produces length ≠
    /// `original_size`" is a `CorruptPayload` condition).
    #[error("decoded {actual} bytes, expected original_size {expected}")]
    LengthMismatch {
        /// Bytes actually produced.
        actual: usize,
        /// The header's declared `original_size`.
        expected: u32,
    },
    /// A `0x01` payload was shorter than the 4-byte token-stream-length
    /// prefix the driver writes ahead of the rANS bitstream.
    #[error("hybrid payload truncated before its token-stream-length prefix")]
    MalformedHybridPayload,
    /// A `0x02` payload did not parse to exactly one `Token::Template`.
    #[error("template-only payload is malformed")]
    MalformedTemplatePayload,
}

/// Failure modes when parsing a container (shared by `decompress` and
/// `extract_metadata`).
#[derive(Debug, Error)]
pub enum ParseError {
    /// The container envelope (header, frequency table, metadata array,
    /// or trailing-byte check) failed to parse.
    #[error(transparent)]
    Container(#[from] container::ContainerError),
}
