//! The dictionary snippet table (spec.md §6.2).

use crate::error::DictionaryError;

/// A fixed table of up to 256 short UTF-8 byte sequences, shared between
/// encoder and decoder and used to seed the LZ77 window so common phrases
/// compress to a single [`crate::Token::Dictionary`] reference.
///
/// Must be byte-identical on peer endpoints: two codecs built from
/// different dictionaries will not interoperate (spec.md §6.2).
#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    entries: Vec<Vec<u8>>,
}

impl Dictionary {
    /// The longest snippet the wire format can encode.
    pub const MAX_ENTRY_LEN: usize = 255;
    /// The largest number of entries the 8-bit id space can address.
    pub const MAX_ENTRIES: usize = 256;

    /// Creates an empty dictionary (no snippets will ever match).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a snippet, returning its assigned id.
    ///
    /// # Errors
    ///
    /// Returns [`DictionaryError::TooManyEntries`] if the dictionary
    /// already holds 256 entries, or [`DictionaryError::EntryTooLong`] if
    /// `snippet` exceeds 255 bytes.
    pub fn push(&mut self, snippet: impl Into<Vec<u8>>) -> Result<u8, DictionaryError> {
        if self.entries.len() >= Self::MAX_ENTRIES {
            return Err(DictionaryError::TooManyEntries);
        }
        let snippet = snippet.into();
        if snippet.len() > Self::MAX_ENTRY_LEN {
            return Err(DictionaryError::EntryTooLong(snippet.len()));
        }
        let id = self.entries.len() as u8;
        self.entries.push(snippet);
        Ok(id)
    }

    /// Returns the snippet bytes registered under `id`.
    #[must_use]
    pub fn get(&self, id: u8) -> Option<&[u8]> {
        self.entries.get(id as usize).map(Vec::as_slice)
    }

    /// The number of registered snippets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the dictionary holds no snippets.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The concatenation of every snippet, in registration order; this is
    /// the seed content for the LZ77 sliding window (spec.md §4.2 step 2).
    #[must_use]
    pub fn seed_bytes(&self) -> Vec<u8> {
        self.entries.concat()
    }

    /// Finds the longest snippet matching a prefix of `haystack`, returning
    /// its id and length. Ties (equal length) favor the lowest id.
    #[must_use]
    pub fn longest_match_at(&self, haystack: &[u8]) -> Option<(u8, usize)> {
        let mut best: Option<(u8, usize)> = None;
        for (id, snippet) in self.entries.iter().enumerate() {
            if !snippet.is_empty() && haystack.starts_with(snippet.as_slice()) {
                let len = snippet.len();
                if best.is_none_or(|(_, best_len)| len > best_len) {
                    best = Some((id as u8, len));
                }
            }
        }
        best
    }
}

/// On-disk JSON form of a [`Dictionary`] (spec.md §6.2 "loaded from a
/// configuration artifact").
#[cfg(feature = "serde")]
pub mod store {
    use super::{Dictionary, DictionaryError};
    use serde::{Deserialize, Serialize};
    use std::path::Path;
    use thiserror::Error;

    /// On-disk schema: an ordered list of snippet strings; position is id.
    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct DictionaryFile {
        /// Snippets in id order.
        pub entries: Vec<String>,
    }

    /// Failure modes when loading a dictionary document.
    #[derive(Debug, Error)]
    pub enum DictionaryStoreError {
        /// The document could not be read from disk.
        #[error("failed to read dictionary: {0}")]
        Io(#[from] std::io::Error),
        /// The document was not valid JSON.
        #[error("failed to parse dictionary: {0}")]
        Json(#[from] serde_json::Error),
        /// An entry was rejected while building the in-memory dictionary.
        #[error(transparent)]
        Dictionary(#[from] DictionaryError),
    }

    impl DictionaryFile {
        /// Loads a dictionary document from `path`.
        ///
        /// # Errors
        ///
        /// See [`DictionaryStoreError`].
        pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, DictionaryStoreError> {
            let text = std::fs::read_to_string(path)?;
            Ok(serde_json::from_str(&text)?)
        }

        /// Builds a [`Dictionary`] from this document's entries.
        ///
        /// # Errors
        ///
        /// See [`DictionaryStoreError`].
        pub fn into_dictionary(self) -> Result<Dictionary, DictionaryStoreError> {
            let mut dict = Dictionary::new();
            for entry in self.entries {
                dict.push(entry.into_bytes())?;
            }
            Ok(dict)
        }
    }
}
