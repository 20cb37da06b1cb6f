//! The compression driver: the never-worse decision procedure and the
//! matching decode dispatch (spec.md §4.6, §4.7).

use container::{Container, Method};
use metadata::{FallbackReason, Kind, MetadataEntry, ParseMode};
use template::{Registry, RegistrationError};
use tokenizer::{Dictionary, Token};

use crate::error::{DecodeError, ParseError};
use crate::options::CodecOptions;
use crate::summary::MetadataSummary;

/// A compression codec bound to a fixed template registry, dictionary, and
/// option set.
///
/// The registry and dictionary are shared, immutable-by-convention state
/// (spec.md §5): construct a `Codec` once per process and reuse it across
/// every `compress`/`decompress` call, mirroring how the teacher repo binds
/// its checksum and block-matching tables once per transfer rather than
/// re-deriving them per call.
#[derive(Debug, Clone)]
pub struct Codec {
    registry: Registry,
    dictionary: Dictionary,
    options: CodecOptions,
}

impl Codec {
    /// Builds a codec from an already-populated registry and dictionary.
    #[must_use]
    pub fn new(registry: Registry, dictionary: Dictionary, options: CodecOptions) -> Self {
        Self {
            registry,
            dictionary,
            options,
        }
    }

    /// Registers an additional template on this codec's registry.
    ///
    /// # Errors
    ///
    /// See [`RegistrationError`]. Encoders and decoders sharing a codec
    /// must register templates identically, and in the same order relative
    /// to any duplicate-pattern ties, or `match_text`'s lowest-id-wins rule
    /// will disagree between peers (spec.md §5).
    pub fn register_template(&mut self, id: u16, pattern: &str) -> Result<(), RegistrationError> {
        self.registry.register_template(id, pattern)
    }

    /// This codec's option set.
    #[must_use]
    pub const fn options(&self) -> &CodecOptions {
        &self.options
    }

    /// The metadata parse mode this codec's `strict_parse` option maps to
    /// (spec.md §6.4).
    const fn parse_mode(&self) -> ParseMode {
        if self.options.strict_parse {
            ParseMode::Strict
        } else {
            ParseMode::Lenient
        }
    }

    /// Compresses `text` into a self-describing container, never producing
    /// a result worse than the uncompressed fallback plus its fixed
    /// overhead (spec.md §4.6).
    #[must_use]
    pub fn compress(&self, text: &[u8]) -> Container {
        let original_size = text.len() as u32;

        if text.len() < self.options.min_compression_size as usize {
            #[cfg(feature = "tracing")]
            tracing::debug!(size = text.len(), "input below min_compression_size, falling back");
            return self.fallback_container(text, original_size, FallbackReason::TooSmall);
        }

        if let Some(candidate) = self.try_template_only(text, original_size) {
            let ratio = f64::from(original_size) / candidate.total_size() as f64;
            if ratio >= f64::from(self.options.template_threshold) {
                #[cfg(feature = "tracing")]
                tracing::debug!(ratio, "committing template-only container");
                return candidate;
            }
        }

        match self.try_hybrid(text, original_size) {
            Some(candidate) => {
                let ratio = f64::from(original_size) / candidate.total_size() as f64;
                if ratio >= f64::from(self.options.hybrid_threshold) {
                    #[cfg(feature = "tracing")]
                    tracing::debug!(ratio, "committing hybrid container");
                    return candidate;
                }
                let reason = if ratio < 1.0 {
                    FallbackReason::Incompressible
                } else {
                    FallbackReason::BelowThreshold
                };
                #[cfg(feature = "tracing")]
                tracing::debug!(ratio, ?reason, "hybrid trial below threshold, falling back");
                self.fallback_container(text, original_size, reason)
            }
            None => {
                #[cfg(feature = "tracing")]
                tracing::warn!("hybrid trial failed internally, falling back");
                self.fallback_container(text, original_size, FallbackReason::CodecError)
            }
        }
    }

    /// Attempts the whole-message template fast path (spec.md §4.6 step 2).
    fn try_template_only(&self, text: &[u8], original_size: u32) -> Option<Container> {
        let as_str = std::str::from_utf8(text).ok()?;
        let m = self.registry.match_text(as_str)?;
        let payload = encode_template_payload(m.template_id, &m.slots);
        let metadata = vec![MetadataEntry::new(0, Kind::Template, m.template_id)];
        Some(Container::new(Method::TemplateOnly, original_size, None, metadata, payload))
    }

    /// Attempts the tokenize → rANS hybrid trial (spec.md §4.6 step 3).
    /// Returns `None` on any internal failure, which the caller downgrades
    /// to a fallback with reason `codec_error`.
    fn try_hybrid(&self, text: &[u8], original_size: u32) -> Option<Container> {
        let max_distance = self.options.lz_window_bytes as usize;
        let (tokens, metadata) = tokenizer::tokenize(text, &self.registry, &self.dictionary, max_distance).ok()?;
        let token_bytes = tokenizer::serialize_tokens(&tokens);
        if token_bytes.is_empty() {
            return None;
        }
        let table = rans::FrequencyTable::build(&token_bytes).ok()?;
        let bitstream = rans::encode(&token_bytes, &table);

        let mut payload = Vec::with_capacity(4 + bitstream.len());
        payload.extend_from_slice(&(token_bytes.len() as u32).to_be_bytes());
        payload.extend_from_slice(&bitstream);

        Some(Container::new(Method::Hybrid, original_size, Some(*table.frequencies()), metadata, payload))
    }

    /// Builds an uncompressed fallback container with a single
    /// `kind=fallback` metadata entry (spec.md §4.6 step 4).
    fn fallback_container(&self, text: &[u8], original_size: u32, reason: FallbackReason) -> Container {
        let metadata = vec![MetadataEntry::new(0, Kind::Fallback, reason as u16)];
        Container::new(Method::Fallback, original_size, None, metadata, text.to_vec())
    }

    /// Reconstructs the original plaintext from a parsed container.
    ///
    /// # Errors
    ///
    /// See [`DecodeError`]. Every failure mode implies either a corrupt
    /// container or a registry/dictionary mismatch between encoder and
    /// decoder (spec.md §4.7).
    pub fn decompress(&self, container: &Container) -> Result<Vec<u8>, DecodeError> {
        let original_size = container.header.original_size as usize;
        let bytes = match container.header.method {
            Method::Fallback => container.payload.clone(),
            Method::TemplateOnly => {
                let (id, slots) = decode_template_payload(&container.payload)?;
                self.registry.format_template(id, &slots)?.into_bytes()
            }
            Method::Hybrid => self.decode_hybrid(container)?,
        };

        if bytes.len() != original_size {
            return Err(DecodeError::LengthMismatch {
                actual: bytes.len(),
                expected: container.header.original_size,
            });
        }
        Ok(bytes)
    }

    fn decode_hybrid(&self, container: &Container) -> Result<Vec<u8>, DecodeError> {
        let table = container
            .frequency_table()
            .expect("a parsed hybrid container always carries a frequency table");

        if container.payload.len() < 4 {
            return Err(DecodeError::MalformedHybridPayload);
        }
        let token_len = u32::from_be_bytes(container.payload[0..4].try_into().unwrap()) as usize;
        let bitstream = &container.payload[4..];

        let token_bytes = rans::decode(bitstream, &table, token_len)?;
        let tokens = tokenizer::parse_tokens(&token_bytes)?;
        Ok(tokenizer::replay(&tokens, &self.dictionary, &self.registry)?)
    }

    /// Summarizes a container's metadata without decompressing its
    /// payload or reading its frequency table (spec.md §4.6 "Metadata
    /// fast-path", §6.4).
    ///
    /// # Errors
    ///
    /// See [`ParseError`].
    pub fn extract_metadata(&self, container_bytes: &[u8]) -> Result<MetadataSummary, ParseError> {
        let (header, metadata) = Container::parse_header_and_metadata(container_bytes, self.parse_mode())?;
        Ok(MetadataSummary::from_parts(header.method, header.original_size, header.payload_size, &metadata))
    }

    /// Parses a full container from its wire bytes and decodes it back to
    /// plaintext in one step, honoring `CodecOptions::strict_parse` for the
    /// metadata array's reserved-`kind` handling (spec.md §6.4).
    ///
    /// # Errors
    ///
    /// See [`DecodeError`].
    pub fn decode_bytes(&self, container_bytes: &[u8]) -> Result<Vec<u8>, DecodeError> {
        let container = Container::parse(container_bytes, self.parse_mode()).map_err(ParseError::from)?;
        self.decompress(&container)
    }
}

/// Encodes a template match's payload: `[template_id u16][slot_count
/// u8]` followed by `[len u16][utf8 bytes]` per slot (spec.md §6.1). This
/// is exactly [`Token::Template`]'s wire encoding with its leading tag byte
/// stripped, since the two formats are required to agree byte-for-byte.
fn encode_template_payload(template_id: u16, slots: &[String]) -> Vec<u8> {
    let mut out = Vec::new();
    Token::Template {
        id: template_id,
        slots: slots.to_vec(),
    }
    .write_to(&mut out);
    out.drain(..1);
    out
}

/// Inverse of [`encode_template_payload`]: reparses by restoring the
/// `Token::Template` tag byte and delegating to the shared token parser. A
/// well-formed template-only payload parses to exactly one token; any
/// trailing bytes indicate a malformed payload.
fn decode_template_payload(payload: &[u8]) -> Result<(u16, Vec<String>), DecodeError> {
    let mut tagged = Vec::with_capacity(1 + payload.len());
    tagged.push(0x03);
    tagged.extend_from_slice(payload);
    let mut tokens = tokenizer::parse_tokens(&tagged)?;
    if tokens.len() != 1 {
        return Err(DecodeError::MalformedTemplatePayload);
    }
    match tokens.remove(0) {
        Token::Template { id, slots } => Ok((id, slots)),
        _ => Err(DecodeError::MalformedTemplatePayload),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use template::RegistryBuilder;

    const TEMPLATE_TEXT: &str =
        "Thank you for contacting support. Your issue has been escalated to tier 2 and a representative will contact you within 24 hours.";

    fn codec_with_template() -> Codec {
        let registry = RegistryBuilder::new()
            .with_template(
                100,
                "Thank you for contacting support. Your issue has been escalated to tier {0} and a representative will contact you within 24 hours.",
            )
            .unwrap()
            .build();
        Codec::new(registry, Dictionary::new(), CodecOptions::default())
    }

    #[test]
    fn below_minimum_size_falls_back_with_reason_too_small() {
        let codec = Codec::new(Registry::new(), Dictionary::new(), CodecOptions::default());
        let container = codec.compress(b"short");
        assert_eq!(container.header.method, Method::Fallback);
        assert_eq!(container.metadata, vec![MetadataEntry::new(0, Kind::Fallback, FallbackReason::TooSmall as u16)]);
    }

    #[test]
    fn template_match_commits_method_template_only() {
        let codec = codec_with_template();
        let container = codec.compress(TEMPLATE_TEXT.as_bytes());
        assert_eq!(container.header.method, Method::TemplateOnly);
        let decoded = codec.decompress(&container).unwrap();
        assert_eq!(decoded, TEMPLATE_TEXT.as_bytes());
    }

    #[test]
    fn repetitive_text_round_trips_regardless_of_chosen_method() {
        let codec = Codec::new(Registry::new(), Dictionary::new(), CodecOptions::default());
        let sentence = "the quick brown fox jumps over the lazy dog. ";
        let text = sentence.repeat(20);
        let container = codec.compress(text.as_bytes());
        let decoded = codec.decompress(&container).unwrap();
        assert_eq!(decoded, text.as_bytes());
        assert!(container.total_size() <= text.len() + container::MAX_OVERHEAD);
    }

    #[test]
    fn incompressible_random_bytes_fall_back() {
        let codec = Codec::new(Registry::new(), Dictionary::new(), CodecOptions::default());
        // A long, maximally non-repetitive byte sequence: every distinct
        // byte value, so no LZ77 match nor a skewed-enough frequency table
        // clears the hybrid_threshold.
        let text: Vec<u8> = (0..=255u8).collect();
        let container = codec.compress(&text);
        assert_eq!(container.header.method, Method::Fallback);
        let decoded = codec.decompress(&container).unwrap();
        assert_eq!(decoded, text);
    }

    #[test]
    fn extract_metadata_matches_full_decode_for_template_only() {
        let codec = codec_with_template();
        let text = b"Yes, I can help with that. What specific topic would you like to know more about?";
        let container = codec.compress(text);
        let bytes = container.to_bytes();
        let summary = codec.extract_metadata(&bytes).unwrap();
        assert_eq!(summary.template_ids, vec![100]);
        assert_eq!(summary.original_size as usize, codec.decompress(&container).unwrap().len());
    }

    #[test]
    fn decode_bytes_round_trips_through_raw_wire_bytes() {
        let codec = codec_with_template();
        let container = codec.compress(TEMPLATE_TEXT.as_bytes());
        let bytes = container.to_bytes();
        assert_eq!(codec.decode_bytes(&bytes).unwrap(), TEMPLATE_TEXT.as_bytes());
    }

    #[test]
    fn strict_parse_false_tolerates_a_reserved_metadata_kind_byte() {
        let strict = Codec::new(Registry::new(), Dictionary::new(), CodecOptions::default());
        let lenient = Codec::new(
            Registry::new(),
            Dictionary::new(),
            CodecOptions {
                strict_parse: false,
                ..CodecOptions::default()
            },
        );

        let text = b"short enough to stay fallback";
        let mut container = strict.fallback_container(text, text.len() as u32, FallbackReason::TooSmall);
        container.metadata.push(MetadataEntry::new(0, Kind::Fallback, 0));
        container.header.metadata_count = container.metadata.len() as u16;
        let mut bytes = container.to_bytes();
        // Corrupt the second metadata entry's kind byte to a reserved value.
        let kind_offset = container::HEADER_SIZE + metadata::ENTRY_SIZE + 2;
        bytes[kind_offset] = 0xAA;

        assert!(strict.extract_metadata(&bytes).is_err());
        assert!(lenient.extract_metadata(&bytes).is_ok());
        assert!(strict.decode_bytes(&bytes).is_err());
        assert!(lenient.decode_bytes(&bytes).is_ok());
    }

    #[test]
    fn lz_window_bytes_narrower_than_default_shortens_the_usable_back_reference_range() {
        let narrow = Codec::new(
            Registry::new(),
            Dictionary::new(),
            CodecOptions {
                lz_window_bytes: 64,
                ..CodecOptions::default()
            },
        );
        let wide = Codec::new(Registry::new(), Dictionary::new(), CodecOptions::default());

        // A repeat 100 bytes back: reachable with the default 32 KiB window,
        // not reachable with a 64-byte window.
        let mut text = vec![b'x'; 100];
        text.extend_from_slice(b"the quick brown fox jumps over the lazy dog");
        text.extend_from_slice(&vec![b'y'; 100]);
        text.extend_from_slice(b"the quick brown fox jumps over the lazy dog");

        let (narrow_tokens, _) =
            tokenizer::tokenize(&text, &Registry::new(), &Dictionary::new(), narrow.options().lz_window_bytes as usize).unwrap();
        let (wide_tokens, _) =
            tokenizer::tokenize(&text, &Registry::new(), &Dictionary::new(), wide.options().lz_window_bytes as usize).unwrap();

        assert!(wide_tokens.iter().any(|t| matches!(t, Token::Match { distance, .. } if *distance as usize > 64)));
        assert!(!narrow_tokens.iter().any(|t| matches!(t, Token::Match { distance, .. } if *distance as usize > 64)));

        let narrow_container = narrow.compress(&text);
        assert_eq!(narrow.decompress(&narrow_container).unwrap(), text);
        let wide_container = wide.compress(&text);
        assert_eq!(wide.decompress(&wide_container).unwrap(), text);
    }
}
