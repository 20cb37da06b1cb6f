//! Tunable thresholds for the compression decision procedure (spec.md §6.4).

/// Configuration for a [`crate::Codec`] instance.
///
/// Constructed once at codec startup and treated as immutable for the
/// lifetime of the codec, consistent with the registry and dictionary it
/// is paired with (spec.md §5).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CodecOptions {
    /// Inputs shorter than this always emit method `0x00` (spec.md §4.6
    /// step 1).
    pub min_compression_size: u32,
    /// Minimum `original_size / trial_container_size` ratio required to
    /// prefer the hybrid method over fallback.
    pub hybrid_threshold: f32,
    /// Minimum ratio required to prefer the template-only method over
    /// the hybrid trial.
    pub template_threshold: f32,
    /// LZ77 sliding window size; must be a power of two no greater than
    /// `2^17`.
    pub lz_window_bytes: u32,
    /// Whether `decompress`/`extract_metadata` reject reserved metadata
    /// `kind` bytes. Version `0x01` containers require this to be `true`.
    pub strict_parse: bool,
}

impl Default for CodecOptions {
    fn default() -> Self {
        Self {
            min_compression_size: 50,
            hybrid_threshold: 1.1,
            template_threshold: 3.0,
            lz_window_bytes: 32_768,
            strict_parse: true,
        }
    }
}

impl CodecOptions {
    /// Validates the structural constraints spec.md §6.4 places on
    /// `lz_window_bytes` (a power of two, at most `2^17`).
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.lz_window_bytes > 0
            && self.lz_window_bytes.is_power_of_two()
            && self.lz_window_bytes <= 1 << 17
    }
}
