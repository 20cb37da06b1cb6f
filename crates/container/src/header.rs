//! The fixed 16-byte header envelope (spec.md §6.1).

use crate::error::HeaderError;
use crate::MAX_MESSAGE_SIZE;

/// ASCII magic bytes opening every container.
pub const MAGIC: [u8; 4] = *b"AURA";
/// The only container version this core understands.
pub const VERSION: u8 = 0x01;
/// Byte width of the fixed header, before any frequency table or metadata.
pub const HEADER_SIZE: usize = 16;

/// Which payload encoding a container uses.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Method {
    /// Uncompressed fallback: payload is the original bytes verbatim.
    Fallback,
    /// Tokenize → rANS hybrid pipeline.
    Hybrid,
    /// Whole-message template match only.
    TemplateOnly,
}

impl Method {
    /// The wire-format byte for this method.
    #[must_use]
    pub const fn to_byte(self) -> u8 {
        match self {
            Self::Fallback => 0x00,
            Self::Hybrid => 0x01,
            Self::TemplateOnly => 0x02,
        }
    }

    /// Decodes a wire-format byte.
    ///
    /// # Errors
    ///
    /// Returns [`HeaderError::BadMethod`] for any byte outside
    /// `{0x00, 0x01, 0x02}`.
    pub const fn from_byte(byte: u8) -> Result<Self, HeaderError> {
        match byte {
            0x00 => Ok(Self::Fallback),
            0x01 => Ok(Self::Hybrid),
            0x02 => Ok(Self::TemplateOnly),
            other => Err(HeaderError::BadMethod(other)),
        }
    }
}

/// The fixed-width fields preceding the frequency table, metadata array,
/// and payload.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Header {
    /// The container's payload encoding.
    pub method: Method,
    /// Length of the original, uncompressed message.
    pub original_size: u32,
    /// Length of the payload section in bytes.
    pub payload_size: u32,
    /// Number of entries in the metadata array.
    pub metadata_count: u16,
}

impl Header {
    /// Serializes the 16-byte header envelope (magic through
    /// `metadata_count`).
    #[must_use]
    pub fn to_bytes(self) -> [u8; HEADER_SIZE] {
        let mut out = [0u8; HEADER_SIZE];
        out[0..4].copy_from_slice(&MAGIC);
        out[4] = VERSION;
        out[5] = self.method.to_byte();
        out[6..10].copy_from_slice(&self.original_size.to_be_bytes());
        out[10..14].copy_from_slice(&self.payload_size.to_be_bytes());
        out[14..16].copy_from_slice(&self.metadata_count.to_be_bytes());
        out
    }

    /// Parses the 16-byte header envelope from the front of `bytes`,
    /// validating magic, version, method, and `original_size` in that
    /// order (spec.md §4.5 steps 1-4).
    ///
    /// # Errors
    ///
    /// See [`HeaderError`].
    pub fn parse(bytes: &[u8]) -> Result<Self, HeaderError> {
        if bytes.len() < HEADER_SIZE {
            return Err(HeaderError::Truncated);
        }

        let magic: [u8; 4] = bytes[0..4].try_into().unwrap();
        if magic != MAGIC {
            return Err(HeaderError::BadMagic(magic));
        }

        let version = bytes[4];
        if version != VERSION {
            return Err(HeaderError::UnsupportedVersion(version));
        }

        let method = Method::from_byte(bytes[5])?;

        let original_size = u32::from_be_bytes(bytes[6..10].try_into().unwrap());
        if original_size > MAX_MESSAGE_SIZE {
            return Err(HeaderError::MessageTooLarge(original_size));
        }

        let payload_size = u32::from_be_bytes(bytes[10..14].try_into().unwrap());
        let metadata_count = u16::from_be_bytes(bytes[14..16].try_into().unwrap());

        Ok(Self {
            method,
            original_size,
            payload_size,
            metadata_count,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_header_bytes() {
        let header = Header {
            method: Method::Hybrid,
            original_size: 1000,
            payload_size: 42,
            metadata_count: 7,
        };
        let bytes = header.to_bytes();
        assert_eq!(Header::parse(&bytes).unwrap(), header);
    }

    #[test]
    fn rejects_bad_magic() {
        let mut bytes = Header {
            method: Method::Fallback,
            original_size: 0,
            payload_size: 0,
            metadata_count: 0,
        }
        .to_bytes();
        bytes[0] = b'X';
        assert!(matches!(Header::parse(&bytes), Err(HeaderError::BadMagic(_))));
    }

    #[test]
    fn rejects_unsupported_version() {
        let mut bytes = Header {
            method: Method::Fallback,
            original_size: 0,
            payload_size: 0,
            metadata_count: 0,
        }
        .to_bytes();
        bytes[4] = 0x02;
        assert!(matches!(
            Header::parse(&bytes),
            Err(HeaderError::UnsupportedVersion(0x02))
        ));
    }

    #[test]
    fn rejects_bad_method() {
        let mut bytes = Header {
            method: Method::Fallback,
            original_size: 0,
            payload_size: 0,
            metadata_count: 0,
        }
        .to_bytes();
        bytes[5] = 0x0F;
        assert!(matches!(Header::parse(&bytes), Err(HeaderError::BadMethod(0x0F))));
    }

    #[test]
    fn rejects_oversized_message() {
        let mut bytes = Header {
            method: Method::Fallback,
            original_size: 0,
            payload_size: 0,
            metadata_count: 0,
        }
        .to_bytes();
        bytes[6..10].copy_from_slice(&(MAX_MESSAGE_SIZE + 1).to_be_bytes());
        assert!(matches!(Header::parse(&bytes), Err(HeaderError::MessageTooLarge(_))));
    }

    #[test]
    fn rejects_truncated_header() {
        assert!(matches!(Header::parse(&[0u8; 10]), Err(HeaderError::Truncated)));
    }
}
