//! Serialization and parsing of the metadata array as a whole.

use crate::entry::{MetadataEntry, ENTRY_SIZE};
use crate::error::ParseError;
use crate::kind::Kind;

/// Whether [`parse`] rejects or skips reserved `kind` bytes.
///
/// The decoder MUST use [`ParseMode::Strict`] for container version `0x01`
/// (spec.md §4.3); [`ParseMode::Lenient`] exists for forward-looking tools
/// that only want to summarize what they recognize.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum ParseMode {
    /// Reject any entry whose `kind` is outside `0x00..=0x04`.
    Strict,
    /// Skip entries whose `kind` is outside `0x00..=0x04`.
    Lenient,
}

/// Serializes `entries` to the 6-bytes-per-entry big-endian layout.
#[must_use]
pub fn serialize(entries: &[MetadataEntry]) -> Vec<u8> {
    let mut out = Vec::with_capacity(entries.len() * ENTRY_SIZE);
    for entry in entries {
        entry.write_to(&mut out);
    }
    out
}

/// Parses `count` metadata entries from the front of `bytes`.
///
/// Validates that `token_index` is non-decreasing across the array and (in
/// [`ParseMode::Strict`]) that every `kind` byte is recognized.
///
/// # Errors
///
/// See [`ParseError`].
pub fn parse(bytes: &[u8], count: u16, mode: ParseMode) -> Result<Vec<MetadataEntry>, ParseError> {
    let expected = count as usize * ENTRY_SIZE;
    if bytes.len() < expected {
        return Err(ParseError::Truncated {
            expected,
            found: bytes.len(),
        });
    }

    let mut out = Vec::with_capacity(count as usize);
    let mut last_index: Option<u16> = None;

    for chunk in bytes[..expected].chunks_exact(ENTRY_SIZE) {
        let token_index = u16::from_be_bytes([chunk[0], chunk[1]]);
        let kind_byte = chunk[2];
        let value = u16::from_be_bytes([chunk[3], chunk[4]]);
        let flags = chunk[5];

        if let Some(previous) = last_index {
            if token_index < previous {
                return Err(ParseError::NonMonotonicTokenIndex {
                    previous,
                    next: token_index,
                });
            }
        }
        last_index = Some(token_index);

        let Some(kind) = Kind::from_byte(kind_byte) else {
            match mode {
                ParseMode::Strict => {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(kind = kind_byte, "rejecting reserved metadata kind");
                    return Err(ParseError::ReservedKind(kind_byte));
                }
                ParseMode::Lenient => continue,
            }
        };

        out.push(MetadataEntry {
            token_index,
            kind,
            value,
            flags,
        });
    }

    Ok(out)
}
