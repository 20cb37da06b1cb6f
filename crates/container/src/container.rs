//! The full container envelope: header, frequency table, metadata array,
//! and payload (spec.md §3.5, §6.1).

use metadata::{codec::ParseMode, MetadataEntry};
use rans::FrequencyTable;

use crate::error::ContainerError;
use crate::header::{Header, Method, HEADER_SIZE};

/// Byte width of the on-wire frequency table (method `0x01` only).
pub const FREQUENCY_TABLE_SIZE: usize = 512;

/// A fully parsed or fully assembled AURA container.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Container {
    /// The container's payload encoding and size fields.
    pub header: Header,
    /// Present only for [`Method::Hybrid`]; `None` otherwise.
    pub frequencies: Option<[u16; 256]>,
    /// The metadata side-channel array.
    pub metadata: Vec<MetadataEntry>,
    /// The method-dependent payload bytes.
    pub payload: Vec<u8>,
}

impl Container {
    /// Assembles a container, computing `header.payload_size` and
    /// `header.metadata_count` from `metadata` and `payload`.
    #[must_use]
    pub fn new(
        method: Method,
        original_size: u32,
        frequencies: Option<[u16; 256]>,
        metadata: Vec<MetadataEntry>,
        payload: Vec<u8>,
    ) -> Self {
        let header = Header {
            method,
            original_size,
            payload_size: payload.len() as u32,
            metadata_count: metadata.len() as u16,
        };
        Self {
            header,
            frequencies,
            metadata,
            payload,
        }
    }

    /// Serializes the full container to its bit-exact wire form
    /// (spec.md §6.1).
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.total_size());
        out.extend_from_slice(&self.header.to_bytes());
        if let Some(freq) = &self.frequencies {
            for f in freq {
                out.extend_from_slice(&f.to_be_bytes());
            }
        }
        out.extend_from_slice(&metadata::codec::serialize(&self.metadata));
        out.extend_from_slice(&self.payload);
        out
    }

    /// Parses a full container, validating every invariant from spec.md
    /// §4.5 in order: magic, version, method, size, trailing bytes, then
    /// (for method `0x01`) the frequency-table sum. `mode` governs the
    /// metadata array's reserved-`kind` handling; version `0x01` containers
    /// require [`ParseMode::Strict`] (spec.md §4.3), but a caller configured
    /// for forward-looking leniency may pass [`ParseMode::Lenient`].
    ///
    /// # Errors
    ///
    /// See [`ContainerError`].
    pub fn parse(bytes: &[u8], mode: ParseMode) -> Result<Self, ContainerError> {
        let header = Header::parse(bytes)?;
        let mut pos = HEADER_SIZE;

        let frequencies = if header.method == Method::Hybrid {
            if bytes.len() < pos + FREQUENCY_TABLE_SIZE {
                return Err(ContainerError::Truncated("frequency table"));
            }
            let mut freq = [0u16; 256];
            for (i, f) in freq.iter_mut().enumerate() {
                let offset = pos + i * 2;
                *f = u16::from_be_bytes([bytes[offset], bytes[offset + 1]]);
            }
            pos += FREQUENCY_TABLE_SIZE;

            let sum: u32 = freq.iter().map(|&f| u32::from(f)).sum();
            if sum != u32::from(rans::ANS_SCALE) {
                #[cfg(feature = "tracing")]
                tracing::warn!(sum, "rejecting container with unnormalized frequency table");
                return Err(ContainerError::UnnormalizedFrequencyTable(sum));
            }
            Some(freq)
        } else {
            None
        };

        let metadata_bytes_len = header.metadata_count as usize * metadata::ENTRY_SIZE;
        if bytes.len() < pos + metadata_bytes_len {
            return Err(ContainerError::Truncated("metadata array"));
        }
        let metadata = metadata::codec::parse(&bytes[pos..], header.metadata_count, mode)?;
        pos += metadata_bytes_len;

        let payload_len = header.payload_size as usize;
        if bytes.len() < pos + payload_len {
            return Err(ContainerError::Truncated("payload"));
        }
        let payload = bytes[pos..pos + payload_len].to_vec();
        pos += payload_len;

        if pos != bytes.len() {
            #[cfg(feature = "tracing")]
            tracing::warn!(trailing = bytes.len() - pos, "rejecting container with trailing bytes");
            return Err(ContainerError::TrailingBytes(bytes.len() - pos));
        }

        Ok(Self {
            header,
            frequencies,
            metadata,
            payload,
        })
    }

    /// Parses only the header and metadata array, skipping the frequency
    /// table and payload sections by offset arithmetic rather than reading
    /// their bytes.
    ///
    /// This is the fast path behind `aura::extract_metadata` (spec.md §4.6
    /// "Metadata fast-path"): it validates that the declared sections fit
    /// within `bytes`, but never copies or inspects the frequency table or
    /// payload, and never checks the frequency-table sum. `mode` governs
    /// the metadata array's reserved-`kind` handling, same as
    /// [`Container::parse`].
    ///
    /// # Errors
    ///
    /// See [`ContainerError`]. Trailing bytes after the declared payload
    /// are not detected here; only [`Container::parse`] enforces that.
    pub fn parse_header_and_metadata(bytes: &[u8], mode: ParseMode) -> Result<(Header, Vec<MetadataEntry>), ContainerError> {
        let header = Header::parse(bytes)?;
        let mut pos = HEADER_SIZE;

        if header.method == Method::Hybrid {
            if bytes.len() < pos + FREQUENCY_TABLE_SIZE {
                return Err(ContainerError::Truncated("frequency table"));
            }
            pos += FREQUENCY_TABLE_SIZE;
        }

        let metadata_bytes_len = header.metadata_count as usize * metadata::ENTRY_SIZE;
        if bytes.len() < pos + metadata_bytes_len {
            return Err(ContainerError::Truncated("metadata array"));
        }
        let metadata = metadata::codec::parse(&bytes[pos..pos + metadata_bytes_len], header.metadata_count, mode)?;
        pos += metadata_bytes_len;

        if bytes.len() < pos + header.payload_size as usize {
            return Err(ContainerError::Truncated("payload"));
        }

        Ok((header, metadata))
    }

    /// The total serialized size of this container in bytes.
    #[must_use]
    pub fn total_size(&self) -> usize {
        HEADER_SIZE
            + self.frequencies.map_or(0, |_| FREQUENCY_TABLE_SIZE)
            + self.metadata.len() * metadata::ENTRY_SIZE
            + self.payload.len()
    }

    /// Builds a [`FrequencyTable`] from this container's stored
    /// frequencies, if any (method `0x01` only).
    #[must_use]
    pub fn frequency_table(&self) -> Option<FrequencyTable> {
        self.frequencies.map(FrequencyTable::from_frequencies)
    }
}
