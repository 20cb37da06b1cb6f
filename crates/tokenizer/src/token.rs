//! The [`Token`] union and its tag-byte wire encoding (spec.md §3.3).

use crate::error::TokenStreamError;

/// Minimum LZ77 match length the tokenizer will emit.
pub const MIN_MATCH_LEN: usize = 3;
/// Maximum LZ77 match length, capped to keep the single-byte length
/// encoding of spec.md §3.3 viable (classic deflate convention).
pub const MAX_MATCH_LEN: usize = 258;
/// Maximum LZ77 back-reference distance.
pub const MAX_MATCH_DISTANCE: usize = 32768;

/// One element of the token stream emitted by the tokenizer.
///
/// The serialization tag byte is deliberately equal to the enum
/// discriminant used here, so encode/decode share one mapping.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Token {
    /// A single uncompressed byte.
    Literal(u8),
    /// An 8-bit dictionary snippet reference.
    Dictionary(u8),
    /// An LZ77 back-reference. `1 <= distance <= 32768`, `3 <= length <= 258`.
    Match {
        /// Distance back into the window.
        distance: u16,
        /// Number of bytes copied.
        length: u16,
    },
    /// A whole-message template match with its captured slot values.
    Template {
        /// The matched template's id.
        id: u16,
        /// Captured slot values, ordered by slot index.
        slots: Vec<String>,
    },
}

impl Token {
    const TAG_LITERAL: u8 = 0x00;
    const TAG_DICTIONARY: u8 = 0x01;
    const TAG_MATCH: u8 = 0x02;
    const TAG_TEMPLATE: u8 = 0x03;

    /// Appends this token's tag-byte encoding to `out`.
    pub fn write_to(&self, out: &mut Vec<u8>) {
        match self {
            Self::Literal(byte) => {
                out.push(Self::TAG_LITERAL);
                out.push(*byte);
            }
            Self::Dictionary(id) => {
                out.push(Self::TAG_DICTIONARY);
                out.push(*id);
            }
            Self::Match { distance, length } => {
                out.push(Self::TAG_MATCH);
                out.extend_from_slice(&distance.to_be_bytes());
                out.push((*length - MIN_MATCH_LEN as u16) as u8);
            }
            Self::Template { id, slots } => {
                out.push(Self::TAG_TEMPLATE);
                out.extend_from_slice(&id.to_be_bytes());
                out.push(slots.len() as u8);
                for slot in slots {
                    let bytes = slot.as_bytes();
                    out.extend_from_slice(&(bytes.len() as u16).to_be_bytes());
                    out.extend_from_slice(bytes);
                }
            }
        }
    }
}

/// Serializes a full token stream to the tag-byte encoding of spec.md §3.3.
#[must_use]
pub fn serialize_tokens(tokens: &[Token]) -> Vec<u8> {
    let mut out = Vec::new();
    for token in tokens {
        token.write_to(&mut out);
    }
    out
}

/// Parses a tag-byte stream back into a token sequence.
///
/// # Errors
///
/// Returns [`TokenStreamError`] if the stream is truncated mid-token or
/// carries an unrecognized tag byte.
pub fn parse_tokens(bytes: &[u8]) -> Result<Vec<Token>, TokenStreamError> {
    let mut tokens = Vec::new();
    let mut pos = 0usize;

    macro_rules! take {
        ($n:expr) => {{
            let n = $n;
            if pos + n > bytes.len() {
                return Err(TokenStreamError::Truncated);
            }
            let slice = &bytes[pos..pos + n];
            pos += n;
            slice
        }};
    }

    while pos < bytes.len() {
        let tag = take!(1)[0];
        match tag {
            Token::TAG_LITERAL => {
                let byte = take!(1)[0];
                tokens.push(Token::Literal(byte));
            }
            Token::TAG_DICTIONARY => {
                let id = take!(1)[0];
                tokens.push(Token::Dictionary(id));
            }
            Token::TAG_MATCH => {
                let dist = take!(2);
                let distance = u16::from_be_bytes([dist[0], dist[1]]);
                let len_byte = take!(1)[0];
                let length = len_byte as u16 + MIN_MATCH_LEN as u16;
                tokens.push(Token::Match { distance, length });
            }
            Token::TAG_TEMPLATE => {
                let id_bytes = take!(2);
                let id = u16::from_be_bytes([id_bytes[0], id_bytes[1]]);
                let slot_count = take!(1)[0];
                let mut slots = Vec::with_capacity(slot_count as usize);
                for _ in 0..slot_count {
                    let len_bytes = take!(2);
                    let len = u16::from_be_bytes([len_bytes[0], len_bytes[1]]) as usize;
                    let text_bytes = take!(len);
                    let text = std::str::from_utf8(text_bytes)
                        .map_err(|_| TokenStreamError::InvalidUtf8)?
                        .to_string();
                    slots.push(text);
                }
                tokens.push(Token::Template { id, slots });
            }
            other => return Err(TokenStreamError::UnknownTag(other)),
        }
    }

    Ok(tokens)
}
