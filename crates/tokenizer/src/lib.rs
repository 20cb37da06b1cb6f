#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `tokenizer` turns raw message bytes into the token stream and metadata
//! array described in the AURA wire format: a whole-message template match,
//! or a left-to-right walk choosing among dictionary-snippet references,
//! LZ77 back-references, and literal bytes.
//!
//! # Design
//!
//! [`Token`] is the shared in-memory and on-wire representation; its
//! tag-byte encoding lives in [`token`]. [`tokenize`] implements the
//! encoder's analysis pass, [`replay`] its exact inverse (used by the
//! compression driver's decoder to reconstruct bytes for method `0x01`).
//! [`Dictionary`] holds the snippet table that seeds the LZ77 window, and
//! [`window::Window`] is the sliding-window match finder itself.
//!
//! # Invariants
//!
//! - Concatenating the byte expansions of a token stream reproduces the
//!   original input exactly.
//! - A whole-message template match, if found, is the sole token emitted;
//!   no LZ77 or dictionary tokens accompany it.
//!
//! # Errors
//!
//! See [`error::TokenizeError`] and [`error::ReplayError`].
//!
//! # Examples
//!
//! ```
//! use template::Registry;
//! use tokenizer::{tokenize, replay, Dictionary, MAX_MATCH_DISTANCE};
//!
//! let registry = Registry::new();
//! let dict = Dictionary::new();
//! let text = b"hello hello hello";
//! let (tokens, _metadata) = tokenize(text, &registry, &dict, MAX_MATCH_DISTANCE).unwrap();
//! let rebuilt = replay(&tokens, &dict, &registry).unwrap();
//! assert_eq!(rebuilt, text);
//! ```
//!
//! # See also
//!
//! - `metadata` for the side-channel records emitted alongside tokens.
//! - `aura` for where `tokenize`/`replay` sit inside the full compress and
//!   decompress pipelines.

pub mod dictionary;
pub mod error;
pub mod token;
mod tokenize;
mod window;

pub use dictionary::Dictionary;
pub use error::{DictionaryError, ReplayError, TokenStreamError, TokenizeError};
pub use token::{parse_tokens, serialize_tokens, Token, MAX_MATCH_DISTANCE, MAX_MATCH_LEN, MIN_MATCH_LEN};
pub use tokenize::{replay, tokenize};
pub use window::Window;
