//! Error types for frequency-table construction and rANS decode.

use thiserror::Error;

/// Failure modes when normalizing a raw byte-frequency histogram.
#[derive(Debug, Error, Clone, Eq, PartialEq)]
pub enum FrequencyError {
    /// The input the histogram was built from was empty; there is nothing
    /// to normalize.
    #[error("cannot build a frequency table from zero input bytes")]
    EmptyInput,
}

/// Failure modes when decoding a rANS bitstream.
#[derive(Debug, Error, Clone, Eq, PartialEq)]
pub enum RangeCoderError {
    /// The bitstream was exhausted before the expected number of symbols
    /// had been produced.
    #[error("rANS bitstream exhausted after {produced} of {expected} symbols")]
    Truncated {
        /// Symbols successfully decoded before exhaustion.
        produced: usize,
        /// Symbols the caller expected.
        expected: usize,
    },
    /// Decoding finished but the final state did not equal the encoder's
    /// initial-state constant, indicating a corrupt or truncated payload.
    #[error("rANS final state {actual:#010x} does not match expected {expected:#010x}")]
    CorruptPayload {
        /// The state actually observed after decoding.
        actual: u32,
        /// The state the decoder expects to observe (the encoder's initial
        /// state constant).
        expected: u32,
    },
    /// The frequency table handed to the decoder did not sum to
    /// [`crate::ANS_SCALE`].
    #[error("frequency table sums to {0}, expected {}", crate::ANS_SCALE)]
    UnnormalizedFrequencyTable(u32),
}
