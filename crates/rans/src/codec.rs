//! rANS encode and decode (spec.md §4.4).

use crate::error::RangeCoderError;
use crate::freq::FrequencyTable;
use crate::ANS_SCALE;

/// Renormalization lower bound `L = ANS_SCALE << 8`. Also the encoder's
/// initial state and the exact state a correct decode must end on.
pub const INITIAL_STATE: u32 = (ANS_SCALE as u32) << 8;

/// Encodes `data` against `table` into a standalone rANS bitstream.
///
/// Symbols are processed in reverse order so that decoding, which runs
/// forward through the returned bytes, recovers `data` in its original
/// order (spec.md §4.4). The byte-emission order produced by that reverse
/// pass is itself backwards relative to decode consumption, so the body is
/// reversed before the final state is prefixed to it.
///
/// # Panics
///
/// Panics (via an internal `debug_assert`) if `data` contains a byte whose
/// frequency in `table` is zero; callers always build `table` from `data`
/// itself via [`FrequencyTable::build`], so this cannot occur in practice.
#[must_use]
pub fn encode(data: &[u8], table: &FrequencyTable) -> Vec<u8> {
    let mut x = INITIAL_STATE;
    let mut body = Vec::new();

    for &symbol in data.iter().rev() {
        let f = u32::from(table.freq(symbol));
        debug_assert!(f > 0, "symbol {symbol} has zero frequency in the supplied table");
        let cumulative = u32::from(table.cumulative(symbol));

        let cutoff = f << 16;
        while x >= cutoff {
            body.push((x & 0xFF) as u8);
            x >>= 8;
        }

        x = (x / f) * ANS_SCALE as u32 + cumulative + (x % f);
    }

    body.reverse();

    let mut out = Vec::with_capacity(4 + body.len());
    out.extend_from_slice(&x.to_be_bytes());
    out.extend_from_slice(&body);
    out
}

/// Decodes `count` bytes from a rANS bitstream produced by [`encode`].
///
/// # Errors
///
/// Returns [`RangeCoderError::Truncated`] if the bitstream runs out before
/// `count` symbols have been produced, or
/// [`RangeCoderError::CorruptPayload`] if the final state does not equal
/// [`INITIAL_STATE`].
pub fn decode(bytes: &[u8], table: &FrequencyTable, count: usize) -> Result<Vec<u8>, RangeCoderError> {
    if bytes.len() < 4 {
        return Err(RangeCoderError::Truncated {
            produced: 0,
            expected: count,
        });
    }

    let mut x = u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
    let mut pos = 4usize;
    let mut out = Vec::with_capacity(count);

    for _ in 0..count {
        let slot = (x & (ANS_SCALE as u32 - 1)) as u16;
        let symbol = table.symbol_at(slot);
        let f = u32::from(table.freq(symbol));
        let cumulative = u32::from(table.cumulative(symbol));

        x = f * (x >> 12) + u32::from(slot) - cumulative;

        while x < INITIAL_STATE {
            if pos >= bytes.len() {
                #[cfg(feature = "tracing")]
                tracing::warn!(produced = out.len(), expected = count, "rANS bitstream exhausted early");
                return Err(RangeCoderError::Truncated {
                    produced: out.len(),
                    expected: count,
                });
            }
            x = (x << 8) | u32::from(bytes[pos]);
            pos += 1;
        }

        out.push(symbol);
    }

    if x != INITIAL_STATE {
        #[cfg(feature = "tracing")]
        tracing::warn!(actual = x, expected = INITIAL_STATE, "rANS final state mismatch");
        return Err(RangeCoderError::CorruptPayload {
            actual: x,
            expected: INITIAL_STATE,
        });
    }

    Ok(out)
}
