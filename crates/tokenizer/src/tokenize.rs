//! The tokenizer algorithm and its decode-side inverse (spec.md §4.2, §4.4
//! "token stream replay").

use metadata::{Kind, MetadataEntry};
use template::Registry;

use crate::dictionary::Dictionary;
use crate::error::{ReplayError, TokenizeError};
use crate::token::{Token, MAX_MATCH_DISTANCE};
use crate::window::Window;

/// Minimum dictionary snippet length worth matching as a back-reference
/// rather than falling through to LZ77 (spec.md §4.2 step 3).
const MIN_DICTIONARY_MATCH_LEN: usize = 4;

/// Tokenizes `text`, producing the token stream and its parallel metadata
/// array (spec.md §4.2).
///
/// Attempts a whole-message template match first; if none is found, walks
/// `text` left-to-right choosing among a dictionary-snippet match, an
/// LZ77 back-reference, and a literal byte at each position. `max_distance`
/// bounds how far back an LZ77 match may reach (`CodecOptions::lz_window_bytes`
/// at the `aura` layer), clamped to [`MAX_MATCH_DISTANCE`].
///
/// # Errors
///
/// Returns [`TokenizeError::InputTooLarge`] if `text` cannot be addressed
/// by the token-index space this container format assumes.
pub fn tokenize(
    text: &[u8],
    registry: &Registry,
    dict: &Dictionary,
    max_distance: usize,
) -> Result<(Vec<Token>, Vec<MetadataEntry>), TokenizeError> {
    if text.len() > u32::MAX as usize {
        return Err(TokenizeError::InputTooLarge(text.len()));
    }

    if let Ok(as_str) = std::str::from_utf8(text) {
        if let Some(m) = registry.match_text(as_str) {
            #[cfg(feature = "tracing")]
            tracing::trace!(template_id = m.template_id, "whole-message template match");
            let token = Token::Template {
                id: m.template_id,
                slots: m.slots,
            };
            let metadata = vec![MetadataEntry::new(0, Kind::Template, m.template_id)];
            return Ok((vec![token], metadata));
        }
    }

    let seed = dict.seed_bytes();
    let mut buffer = seed.clone();
    buffer.extend_from_slice(text);
    let seed_len = seed.len();

    // The window indexes the whole buffer up front; `Window::longest_match`
    // only ever considers candidates strictly before the query position, so
    // indexing bytes that have not been "produced" yet at a given `p` is
    // harmless (they are simply never looked up before `p` reaches them).
    let window = Window::new(&buffer, max_distance);

    let mut tokens = Vec::new();
    let mut metadata = Vec::new();
    let mut p = 0usize;

    while p < text.len() {
        let abs_pos = seed_len + p;

        if let Some((id, len)) = dict.longest_match_at(&text[p..]) {
            if len >= MIN_DICTIONARY_MATCH_LEN {
                tokens.push(Token::Dictionary(id));
                metadata.push(MetadataEntry::new(tokens.len() as u16 - 1, Kind::Dictionary, id as u16));
                p += len;
                continue;
            }
        }

        if let Some((distance, length)) = window.longest_match(abs_pos) {
            let capped_distance = distance.min(0xFFFF);
            tokens.push(Token::Match { distance, length });
            metadata.push(MetadataEntry::new(
                tokens.len() as u16 - 1,
                Kind::LzMatch,
                capped_distance,
            ));
            p += length as usize;
            continue;
        }

        tokens.push(Token::Literal(text[p]));
        p += 1;
    }

    Ok((tokens, metadata))
}

/// Reconstructs the original bytes from a token stream (the inverse of
/// [`tokenize`]'s byte expansion, spec.md §4.2 invariant: "concatenating
/// the byte expansions of the emitted tokens reproduces `text` exactly").
///
/// # Errors
///
/// Returns [`ReplayError`] if a token references a dictionary id, match
/// distance, or template id that cannot be resolved against `dict` and
/// `registry`.
pub fn replay(
    tokens: &[Token],
    dict: &Dictionary,
    registry: &Registry,
) -> Result<Vec<u8>, ReplayError> {
    // `tokenize` seeds the LZ77 window with the dictionary's bytes (spec.md
    // §4.2, §4.6: "replay tokens against an empty 32 KiB window seeded by
    // the dictionary"), so `Token::Match` distances can reach back into that
    // seed region. Mirror the same seed here and trim it off before
    // returning, rather than exposing it to the caller.
    let seed = dict.seed_bytes();
    let seed_len = seed.len();
    let mut out = seed;

    for token in tokens {
        match token {
            Token::Literal(byte) => out.push(*byte),
            Token::Dictionary(id) => {
                let snippet = dict
                    .get(*id)
                    .ok_or(ReplayError::UnknownDictionaryId(*id))?;
                out.extend_from_slice(snippet);
            }
            Token::Match { distance, length } => {
                let distance = *distance as usize;
                if distance == 0 || distance > out.len() {
                    return Err(ReplayError::DistanceTooLarge {
                        distance: *distance,
                        produced: out.len() - seed_len,
                    });
                }
                let start = out.len() - distance;
                for i in 0..*length as usize {
                    let byte = out[start + i];
                    out.push(byte);
                }
            }
            Token::Template { id, slots } => {
                let formatted = registry
                    .format_template(*id, slots)
                    .map_err(ReplayError::TemplateFormat)?;
                out.extend_from_slice(formatted.as_bytes());
            }
        }
    }

    Ok(out.split_off(seed_len))
}
