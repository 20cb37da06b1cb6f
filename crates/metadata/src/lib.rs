#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `metadata` implements the AURA codec's metadata side-channel: the
//! fixed-width records that describe the token stream well enough for a
//! downstream consumer to classify, route, or screen a message without
//! decompressing the payload.
//!
//! # Design
//!
//! Metadata is produced inline by the tokenizer and the compression driver;
//! this crate's only centralized responsibility is serializing a
//! `Vec<MetadataEntry>` to the 6-bytes-per-entry layout and parsing it back
//! (spec.md §4.3). The array is kept as a side channel, never interleaved
//! into the entropy-coded bitstream, so a reader can stop after the header
//! envelope.
//!
//! # Invariants
//!
//! - `token_index` is non-decreasing across the parsed array.
//! - Reserved `kind` bytes (`0x05..=0xFF`) are rejected under
//!   [`codec::ParseMode::Strict`], which is mandatory for container
//!   version `0x01`.
//!
//! # Errors
//!
//! See [`error::ParseError`].
//!
//! # Examples
//!
//! ```
//! use metadata::{codec, Kind, MetadataEntry};
//!
//! let entries = vec![MetadataEntry::new(0, Kind::Template, 100)];
//! let bytes = codec::serialize(&entries);
//! let parsed = codec::parse(&bytes, 1, codec::ParseMode::Strict).unwrap();
//! assert_eq!(parsed, entries);
//! ```
//!
//! # See also
//!
//! - `container` for where the metadata array sits inside the container
//!   envelope (spec.md §6.1).
//! - `aura` for the fast-path `extract_metadata` API that only ever reads
//!   this array.

pub mod codec;
pub mod entry;
pub mod error;
pub mod kind;

pub use codec::{parse, serialize, ParseMode};
pub use entry::{MetadataEntry, ENTRY_SIZE};
pub use error::ParseError;
pub use kind::{FallbackReason, Kind};
