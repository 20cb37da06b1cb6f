//! Pattern compilation and the slot-matching engine (spec.md §3.1, §4.1).
//!
//! A pattern is compiled into an alternating sequence of literal runs and
//! slot references: `[Lit, Slot, Lit, Slot, ..., Lit]`. The literal at index
//! `0` and the literal at the end may be empty but are always present, which
//! keeps the matcher's recursion simple: it never needs to special-case "no
//! literal here".

use std::collections::HashMap;

use crate::error::PatternError;

/// One slot reference inside a compiled pattern.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub(crate) struct SlotRef(pub u8);

/// A pattern compiled from its textual `{N}` form into literal/slot tokens.
#[derive(Debug, Clone, Eq, PartialEq)]
pub(crate) struct CompiledPattern {
    /// `literals.len() == slots.len() + 1`.
    literals: Vec<String>,
    slots: Vec<SlotRef>,
    /// Number of *distinct* slot indices referenced by the pattern.
    slot_count: u8,
    /// Highest slot index referenced by the pattern (valid when `slot_count > 0`).
    max_slot_index: u8,
}

impl CompiledPattern {
    /// Compiles `pattern`, applying the `{{`/`}}` escape rule and validating
    /// that every `{N}` placeholder is a decimal integer below 16.
    pub(crate) fn compile(pattern: &str) -> Result<Self, PatternError> {
        let bytes = pattern.as_bytes();
        let mut literals = Vec::new();
        let mut slots = Vec::new();
        let mut current = String::new();
        let mut seen = [false; 16];
        let mut max_slot_index = 0u8;
        let mut i = 0usize;

        while i < bytes.len() {
            match bytes[i] {
                b'{' if bytes.get(i + 1) == Some(&b'{') => {
                    current.push('{');
                    i += 2;
                }
                b'}' if bytes.get(i + 1) == Some(&b'}') => {
                    current.push('}');
                    i += 2;
                }
                b'{' => {
                    let Some(close) = pattern[i + 1..].find('}') else {
                        return Err(PatternError::UnterminatedSlot(i));
                    };
                    let digits = &pattern[i + 1..i + 1 + close];
                    let index: u32 = digits
                        .parse()
                        .map_err(|_| PatternError::NotADecimal(digits.to_string()))?;
                    if index >= 16 {
                        return Err(PatternError::SlotIndexOutOfRange(index));
                    }
                    let index = index as u8;
                    literals.push(std::mem::take(&mut current));
                    slots.push(SlotRef(index));
                    if !seen[index as usize] {
                        seen[index as usize] = true;
                    }
                    max_slot_index = max_slot_index.max(index);
                    i += 1 + close + 1;
                }
                b'}' => return Err(PatternError::UnmatchedClosingBrace(i)),
                other => {
                    // Safe: we only ever advance by whole UTF-8 characters
                    // below; single-byte ASCII fast path handled here.
                    let ch_len = utf8_char_len(other);
                    current.push_str(&pattern[i..i + ch_len]);
                    i += ch_len;
                }
            }
        }
        literals.push(current);

        let slot_count = seen.iter().filter(|s| **s).count() as u8;

        Ok(Self {
            literals,
            slots,
            slot_count,
            max_slot_index,
        })
    }

    pub(crate) fn slot_count(&self) -> u8 {
        self.slot_count
    }

    pub(crate) fn max_slot_index(&self) -> u8 {
        self.max_slot_index
    }

    /// Attempts to match `text` against this pattern, returning the captured
    /// slot values ordered by slot index (spec.md §4.1 matching algorithm).
    pub(crate) fn match_text(&self, text: &str) -> Option<Vec<String>> {
        let mut captures: HashMap<u8, (usize, usize)> = HashMap::default();
        let matched_end = self.match_from(0, 0, text.as_bytes(), &mut captures)?;
        if matched_end != text.len() {
            return None;
        }
        let mut out = vec![String::new(); self.max_slot_index as usize + 1];
        for (idx, (start, end)) in captures {
            out[idx as usize] = text[start..end].to_string();
        }
        Some(out)
    }

    /// Reconstructs the original text for `slots`, substituting every
    /// occurrence of `{i}` with `slots[i]`.
    pub(crate) fn format(&self, slots: &[&str]) -> String {
        let mut out = String::new();
        for (i, lit) in self.literals.iter().enumerate() {
            out.push_str(lit);
            if let Some(slot) = self.slots.get(i) {
                out.push_str(slots[slot.0 as usize]);
            }
        }
        out
    }

    /// Recursively matches starting at `literals[lit_idx]` against
    /// `text[pos..]`. Returns the end offset on success.
    fn match_from(
        &self,
        lit_idx: usize,
        pos: usize,
        text: &[u8],
        captures: &mut HashMap<u8, (usize, usize)>,
    ) -> Option<usize> {
        let lit = self.literals[lit_idx].as_bytes();
        if !text[pos..].starts_with(lit) {
            return None;
        }
        let pos = pos + lit.len();

        let Some(&slot) = self.slots.get(lit_idx) else {
            // Last literal: the whole pattern matched iff this is the end.
            return Some(pos);
        };

        // Adjacent placeholders (an empty literal sitting between two
        // slots) are allowed to capture a zero-length value; otherwise a
        // slot must capture at least one byte (spec.md §4.1 invariant (b)).
        let adjacent = lit_idx > 0 && self.slots.get(lit_idx - 1).is_some() && lit.is_empty();
        let min_len = if adjacent { 0 } else { 1 };

        let next_lit = self.literals[lit_idx + 1].as_bytes();
        let mut candidate_end = pos + min_len;
        while candidate_end <= text.len() {
            if text[candidate_end..].starts_with(next_lit) {
                let capture = (pos, candidate_end);
                let mut undo = None;
                match captures.get(&slot.0) {
                    Some(existing) if text[existing.0..existing.1] != text[capture.0..capture.1] =>
                    {
                        candidate_end += 1;
                        continue;
                    }
                    Some(_) => {}
                    None => {
                        captures.insert(slot.0, capture);
                        undo = Some(slot.0);
                    }
                }
                if let Some(end) = self.match_from(lit_idx + 1, candidate_end, text, captures) {
                    return Some(end);
                }
                if let Some(key) = undo {
                    captures.remove(&key);
                }
            }
            candidate_end += 1;
        }
        None
    }
}

/// Byte length of the UTF-8 sequence starting with `first_byte`.
const fn utf8_char_len(first_byte: u8) -> usize {
    if first_byte & 0x80 == 0 {
        1
    } else if first_byte & 0xE0 == 0xC0 {
        2
    } else if first_byte & 0xF0 == 0xE0 {
        3
    } else {
        4
    }
}
