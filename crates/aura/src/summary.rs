//! The metadata fast-path summary (spec.md §4.6 "Metadata fast-path").

use container::Method;
use metadata::{FallbackReason, Kind, MetadataEntry};

/// The result of [`crate::extract_metadata`]: everything a collaborator
/// can learn about a container without decompressing its payload.
#[derive(Debug, Clone, PartialEq)]
pub struct MetadataSummary {
    /// The container's payload encoding.
    pub method: Method,
    /// The header's declared original (uncompressed) length.
    pub original_size: u32,
    /// The header's declared payload length.
    pub payload_size: u32,
    /// Number of entries in the metadata array.
    pub metadata_count: u16,
    /// Every `kind=0x03` (template) value in the metadata array, in
    /// array order.
    pub template_ids: Vec<u16>,
    /// Whether any `kind=0x04` (fallback) entry is present.
    pub is_fallback: bool,
    /// The fallback reason code, if `is_fallback`.
    pub fallback_reason: Option<u16>,
    /// Per-kind entry counts, indexed by [`Kind::to_byte`]
    /// (`0x00..=0x04`); index `5` counts reserved kinds skipped under
    /// lenient parsing.
    pub kind_counts: [u32; 6],
}

impl MetadataSummary {
    /// Builds a summary from a parsed header and metadata array.
    #[must_use]
    pub fn from_parts(
        method: Method,
        original_size: u32,
        payload_size: u32,
        metadata: &[MetadataEntry],
    ) -> Self {
        let mut template_ids = Vec::new();
        let mut is_fallback = false;
        let mut fallback_reason = None;
        let mut kind_counts = [0u32; 6];

        for entry in metadata {
            kind_counts[entry.kind.to_byte() as usize] += 1;
            match entry.kind {
                Kind::Template => template_ids.push(entry.value),
                Kind::Fallback => {
                    is_fallback = true;
                    fallback_reason = Some(entry.value);
                }
                _ => {}
            }
        }

        Self {
            method,
            original_size,
            payload_size,
            metadata_count: metadata.len() as u16,
            template_ids,
            is_fallback,
            fallback_reason,
            kind_counts,
        }
    }

    /// The fallback reason as a typed [`FallbackReason`], if recognized.
    #[must_use]
    pub fn fallback_reason(&self) -> Option<FallbackReason> {
        self.fallback_reason.and_then(FallbackReason::from_u16)
    }

    /// `original_size / total_container_size`, the same ratio definition
    /// used by the compression decision procedure (spec.md §4.6, §9
    /// "Compression 'ratio' definition"). Pure computation over fields
    /// already required by this summary; adds no new wire field.
    #[must_use]
    pub fn ratio(&self, total_container_size: usize) -> f64 {
        if total_container_size == 0 {
            return 0.0;
        }
        f64::from(self.original_size) / total_container_size as f64
    }
}
