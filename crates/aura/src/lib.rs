#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `aura` is the compression driver: it owns the never-worse decision
//! procedure that chooses between an uncompressed, template-only, or
//! hybrid LZ77+rANS container for a given message, the matching decode
//! dispatch, and the metadata-only fast path that lets a collaborator
//! classify a container without paying for a full decompress.
//!
//! # Design
//!
//! [`Codec`] binds a [`template::Registry`], a [`tokenizer::Dictionary`],
//! and a [`CodecOptions`] together; `compress`/`decompress` are its only
//! entry points that touch payload bytes, and `extract_metadata` is the
//! one that deliberately does not. The six underlying layers —
//! templates, tokenization, metadata, entropy coding, and the container
//! envelope — each live in their own crate; this crate's job is solely
//! the encode decision and the corresponding decode dispatch.
//!
//! # Invariants
//!
//! - `decompress(compress(text)) == text` for every `text`.
//! - `compress(text)`'s serialized size never exceeds `text.len() +
//!   container::MAX_OVERHEAD`.
//! - `extract_metadata` never reads a container's frequency table or
//!   payload bytes.
//!
//! # Errors
//!
//! See [`DecodeError`] and [`ParseError`].
//!
//! # Examples
//!
//! ```
//! use aura::{Codec, CodecOptions};
//! use template::Registry;
//! use tokenizer::Dictionary;
//!
//! let codec = Codec::new(Registry::new(), Dictionary::new(), CodecOptions::default());
//! let text = b"the quick brown fox jumps over the lazy dog. the quick brown fox jumps over the lazy dog.";
//! let container = codec.compress(text);
//! assert_eq!(codec.decompress(&container).unwrap(), text);
//!
//! let summary = codec.extract_metadata(&container.to_bytes()).unwrap();
//! assert_eq!(summary.original_size as usize, text.len());
//! ```
//!
//! # See also
//!
//! - `template`, `tokenizer`, `metadata`, `rans`, `container` for the
//!   individual pipeline stages this crate orchestrates.

mod driver;
mod error;
mod options;
mod summary;

pub use driver::Codec;
pub use error::{DecodeError, ParseError};
pub use options::CodecOptions;
pub use summary::MetadataSummary;

pub use template::RegistrationError;
